//! Block and item materials plus the property table every predicate reads.
//!
//! One enum covers both placed blocks and inventory items; `is_block()`
//! separates them.  Names are the game's lower snake case identifiers
//! (`diamond_ore`, `cooked_beef`) in TOML, CSV and logs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Hardness class used by the mining duration table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MaterialCategory {
    /// Air, liquids, fire, plants: nothing to mine.
    NonSolid,
    /// Dirt, grass, sand, gravel.
    Soil,
    /// Stone and cobblestone.
    Stone,
    /// Coal, iron and gold ores.
    Ore,
    /// Diamond ore.
    Gem,
    Log,
    Obsidian,
    /// Everything else that is a block (planks, leaves, bedrock, furniture).
    Other,
    /// Not a block at all.
    Item,
}

macro_rules! materials {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Every block and item the engine knows about.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Material {
            $($variant),*
        }

        impl Material {
            /// All materials in declaration order.
            pub const ALL: &'static [Material] = &[$(Material::$variant),*];

            /// Lower snake case identifier.
            pub fn name(self) -> &'static str {
                match self {
                    $(Material::$variant => $name),*
                }
            }
        }
    };
}

materials! {
    // blocks
    Air             => "air",
    CaveAir         => "cave_air",
    Bedrock         => "bedrock",
    Stone           => "stone",
    Cobblestone     => "cobblestone",
    Dirt            => "dirt",
    GrassBlock      => "grass_block",
    Sand            => "sand",
    Gravel          => "gravel",
    Water           => "water",
    Lava            => "lava",
    Fire            => "fire",
    TallGrass       => "tall_grass",
    Torch           => "torch",
    OakLog          => "oak_log",
    BirchLog        => "birch_log",
    OakPlanks       => "oak_planks",
    OakLeaves       => "oak_leaves",
    CoalOre         => "coal_ore",
    IronOre         => "iron_ore",
    GoldOre         => "gold_ore",
    DiamondOre      => "diamond_ore",
    Obsidian        => "obsidian",
    Chest           => "chest",
    Furnace         => "furnace",
    CraftingTable   => "crafting_table",
    EnchantingTable => "enchanting_table",
    // items
    Coal                 => "coal",
    RawIron              => "raw_iron",
    RawGold              => "raw_gold",
    Diamond              => "diamond",
    GoldenApple          => "golden_apple",
    EnchantedGoldenApple => "enchanted_golden_apple",
    MushroomStew         => "mushroom_stew",
    SuspiciousStew       => "suspicious_stew",
    CookedBeef           => "cooked_beef",
    CookedPorkchop       => "cooked_porkchop",
    Bread                => "bread",
    Apple                => "apple",
    Carrot               => "carrot",
    Potato               => "potato",
    CookedChicken        => "cooked_chicken",
    CookedCod            => "cooked_cod",
    MilkBucket           => "milk_bucket",
    Bucket               => "bucket",
}

/// Healing items in the order survival tries them.
pub const HEALING_ITEMS: &[Material] = &[
    Material::GoldenApple,
    Material::EnchantedGoldenApple,
    Material::MushroomStew,
    Material::SuspiciousStew,
];

/// Food items in the order survival tries them.
pub const FOOD_ITEMS: &[Material] = &[
    Material::CookedBeef,
    Material::CookedPorkchop,
    Material::Bread,
    Material::Apple,
    Material::Carrot,
    Material::Potato,
    Material::CookedChicken,
    Material::CookedCod,
];

impl Material {
    /// `true` for anything that can occupy a block position.
    pub fn is_block(self) -> bool {
        self <= Material::EnchantingTable
    }

    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Material::Air | Material::CaveAir)
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }

    /// Blocks that damage an entity standing in or on them.
    #[inline]
    pub fn is_hazard(self) -> bool {
        matches!(self, Material::Lava | Material::Fire)
    }

    /// Blocks an entity collides with.
    pub fn is_solid(self) -> bool {
        self.is_block()
            && !self.is_air()
            && !self.is_liquid()
            && !matches!(self, Material::Fire | Material::TallGrass | Material::Torch)
    }

    /// Player-made containers and stations, never mined or targeted.
    #[inline]
    pub fn is_furniture(self) -> bool {
        matches!(
            self,
            Material::Chest | Material::Furnace | Material::CraftingTable | Material::EnchantingTable
        )
    }

    /// Whether an agent may break this block.
    pub fn is_minable(self) -> bool {
        self.is_block()
            && !self.is_air()
            && !self.is_liquid()
            && !self.is_furniture()
            && !matches!(self, Material::Bedrock | Material::Fire)
    }

    /// Whether a block may be placed into a position holding `self`.
    #[inline]
    pub fn is_replaceable(self) -> bool {
        self.is_air() || self.is_liquid()
    }

    /// What breaking this block yields (one unit).
    pub fn drop(self) -> Material {
        match self {
            Material::DiamondOre => Material::Diamond,
            Material::IronOre    => Material::RawIron,
            Material::GoldOre    => Material::RawGold,
            Material::CoalOre    => Material::Coal,
            Material::Stone      => Material::Cobblestone,
            Material::GrassBlock => Material::Dirt,
            other                => other,
        }
    }

    pub fn category(self) -> MaterialCategory {
        use Material::*;
        match self {
            _ if !self.is_block() => MaterialCategory::Item,
            _ if !self.is_solid() => MaterialCategory::NonSolid,
            Dirt | GrassBlock | Sand | Gravel => MaterialCategory::Soil,
            Stone | Cobblestone => MaterialCategory::Stone,
            CoalOre | IronOre | GoldOre => MaterialCategory::Ore,
            DiamondOre => MaterialCategory::Gem,
            OakLog | BirchLog => MaterialCategory::Log,
            Obsidian => MaterialCategory::Obsidian,
            _ => MaterialCategory::Other,
        }
    }

    /// Health restored by consuming this item, if it is a healing item.
    pub fn heal_amount(self) -> Option<f64> {
        match self {
            Material::GoldenApple          => Some(4.0),
            Material::EnchantedGoldenApple => Some(8.0),
            Material::MushroomStew         => Some(3.0),
            Material::SuspiciousStew       => Some(3.0),
            _ => None,
        }
    }

    /// Food points restored by eating this item.
    pub fn food_value(self) -> Option<u32> {
        match self {
            Material::CookedBeef     => Some(8),
            Material::CookedPorkchop => Some(8),
            Material::Bread          => Some(5),
            Material::Apple          => Some(4),
            Material::Carrot         => Some(3),
            Material::Potato         => Some(1),
            Material::CookedChicken  => Some(6),
            Material::CookedCod      => Some(5),
            _ => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = CoreError;

    /// Accepts the snake case name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| CoreError::Parse(format!("unknown material '{s}'")))
    }
}
