//! Read-only engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid config.  A
//! typical file only overrides what it needs:
//!
//! ```toml
//! [agents]
//! max_agents = 4
//!
//! [gathering]
//! reach   = 5.0
//! targets = ["iron_ore", "coal_ore"]
//!
//! [mining.overrides]
//! stone = 1.5
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Material};

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agents:      AgentsConfig,
    pub scheduler:   SchedulerConfig,
    pub survival:    SurvivalConfig,
    pub gathering:   GatheringConfig,
    pub exploration: ExplorationConfig,
    pub building:    BuildingConfig,
    pub movement:    MovementConfig,
    pub flee:        FleeConfig,
    pub mining:      MiningConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> CoreResult<Config> {
        let config: Config = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Config> {
        let src = std::fs::read_to_string(path)?;
        Config::from_toml_str(&src)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let intervals = [
            ("agents.tick_duration_ms", self.agents.tick_duration_ms),
            ("scheduler.arbitration_interval_ms", self.scheduler.arbitration_interval_ms),
            ("movement.step_interval_ms", self.movement.step_interval_ms),
            ("movement.timeout_ms", self.movement.timeout_ms),
            ("flee.step_interval_ms", self.flee.step_interval_ms),
            ("flee.timeout_ms", self.flee.timeout_ms),
            ("building.action_interval_ms", self.building.action_interval_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(CoreError::Config(format!("{name} must be positive")));
            }
        }
        if self.agents.max_agents == 0 {
            return Err(CoreError::Config("agents.max_agents must be positive".into()));
        }
        if self.gathering.reach <= 0.0 || self.building.place_reach <= 0.0 {
            return Err(CoreError::Config("reach distances must be positive".into()));
        }
        // An approach that arrives outside reach would restart forever.
        if self.gathering.reach < self.movement.arrival_radius {
            return Err(CoreError::Config(
                "gathering.reach must be at least movement.arrival_radius".into(),
            ));
        }
        let radii = [
            ("exploration.radius", self.exploration.radius),
            ("gathering.search_radius", self.gathering.search_radius),
            ("gathering.height_tolerance", self.gathering.height_tolerance),
            ("building.gather_radius", self.building.gather_radius),
        ];
        for (name, value) in radii {
            if value < 0 {
                return Err(CoreError::Config(format!("{name} must not be negative")));
            }
        }
        if self.mining.default_secs < 0.0 {
            return Err(CoreError::Config("mining.default_secs must not be negative".into()));
        }
        self.mining.resolved_overrides()?;
        for target in &self.gathering.targets {
            if !target.is_minable() {
                return Err(CoreError::Config(format!(
                    "gathering target '{target}' cannot be mined"
                )));
            }
        }
        Ok(())
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub max_agents:       usize,
    pub tick_duration_ms: u64,
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed:             u64,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self { max_agents: 10, tick_duration_ms: 50, seed: 42 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub arbitration_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { arbitration_interval_ms: 1000 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    pub enabled:                   bool,
    pub priority:                  i32,
    pub health_threshold:          f64,
    pub food_threshold:            u32,
    pub flee_health:               f64,
    pub critical_health:           f64,
    pub auto_defend:               bool,
    pub entity_search_radius:      f64,
    pub flee_range:                f64,
    pub combat_range:              f64,
    pub attack_range:              f64,
    pub attack_damage:             f64,
    pub threat_check_interval_ms:  u64,
    pub food_check_interval_ms:    u64,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            enabled:                  true,
            priority:                 100,
            health_threshold:         10.0,
            food_threshold:           10,
            flee_health:              5.0,
            critical_health:          2.0,
            auto_defend:              true,
            entity_search_radius:     16.0,
            flee_range:               3.0,
            combat_range:             8.0,
            attack_range:             4.0,
            attack_damage:            1.0,
            threat_check_interval_ms: 2000,
            food_check_interval_ms:   5000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatheringConfig {
    pub enabled:            bool,
    pub priority:           i32,
    pub search_radius:      i32,
    pub height_tolerance:   i32,
    pub reach:              f64,
    pub search_interval_ms: u64,
    /// Total item count at which the inventory counts as full.
    pub inventory_full:     u32,
    /// Consecutive blocked movement steps before the target is abandoned.
    pub max_blocked_steps:  u32,
    /// Materials to look for, most wanted first.
    pub targets:            Vec<Material>,
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            enabled:            true,
            priority:           80,
            search_radius:      16,
            height_tolerance:   8,
            reach:              4.5,
            search_interval_ms: 1000,
            inventory_full:     2304,
            max_blocked_steps:  5,
            targets: vec![
                Material::DiamondOre,
                Material::GoldOre,
                Material::IronOre,
                Material::CoalOre,
                Material::OakLog,
                Material::BirchLog,
                Material::Stone,
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    pub enabled:          bool,
    pub priority:         i32,
    pub radius:           i32,
    pub interval_seconds: u64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self { enabled: true, priority: 60, radius: 100, interval_seconds: 30 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub enabled:            bool,
    pub priority:           i32,
    pub action_interval_ms: u64,
    /// Minimum count of one building material before a project starts.
    pub material_threshold: u32,
    pub gather_radius:      i32,
    pub place_reach:        f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            enabled:            true,
            priority:           70,
            action_interval_ms: 1000,
            material_threshold: 10,
            gather_radius:      8,
            place_reach:        3.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub step_interval_ms: u64,
    pub timeout_ms:       u64,
    pub arrival_radius:   f64,
    pub step_length:      f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { step_interval_ms: 200, timeout_ms: 30_000, arrival_radius: 2.0, step_length: 1.0 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeConfig {
    pub step_interval_ms: u64,
    pub timeout_ms:       u64,
    pub safety_radius:    f64,
    /// How far from the agent the flee point is projected.
    pub flee_distance:    f64,
}

impl Default for FleeConfig {
    fn default() -> Self {
        Self { step_interval_ms: 150, timeout_ms: 15_000, safety_radius: 15.0, flee_distance: 15.0 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Seconds for any block not covered by a category or override.
    pub default_secs: f64,
    /// Per-material durations in seconds, keyed by material name.
    pub overrides:    BTreeMap<String, f64>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self { default_secs: 1.0, overrides: BTreeMap::new() }
    }
}

impl MiningConfig {
    /// Parse the override keys into materials.
    pub fn resolved_overrides(&self) -> CoreResult<Vec<(Material, f64)>> {
        self.overrides
            .iter()
            .map(|(name, secs)| {
                let material: Material = name.parse()?;
                if *secs < 0.0 {
                    return Err(CoreError::Config(format!(
                        "mining override for '{name}' must not be negative"
                    )));
                }
                Ok((material, *secs))
            })
            .collect()
    }
}
