//! The agent's physical presence in the world.
//!
//! Behaviors move, heal and feed the agent only through [`EntityControl`].
//! A host embedding the engine in a live game implements it over its own
//! entity handle; [`AgentBody`] is the self-contained implementation used by
//! the simulation and tests.

use std::fmt;

use va_core::Location;

/// Highest food level an entity can have.
pub const MAX_FOOD_LEVEL: u32 = 20;

// ── StatusEffect ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StatusEffect {
    Poison,
    Wither,
    Weakness,
    Slowness,
    MiningFatigue,
    Nausea,
    Blindness,
    Regeneration,
    Speed,
}

impl StatusEffect {
    /// Effects survival tries to cure.
    pub const HARMFUL: &'static [StatusEffect] = &[
        StatusEffect::Poison,
        StatusEffect::Wither,
        StatusEffect::Weakness,
        StatusEffect::Slowness,
        StatusEffect::MiningFatigue,
        StatusEffect::Nausea,
        StatusEffect::Blindness,
    ];

    #[inline]
    pub fn is_harmful(self) -> bool {
        Self::HARMFUL.contains(&self)
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── EntityControl ─────────────────────────────────────────────────────────────

/// Control surface over the game entity an agent drives.
pub trait EntityControl {
    fn position(&self) -> Location;

    /// Teleport-style move; the location carries the new facing.
    fn set_position_and_facing(&mut self, location: Location);

    fn health(&self) -> f64;

    fn max_health(&self) -> f64;

    /// Set health, clamped to `[0, max_health]`.
    fn set_health(&mut self, health: f64);

    fn food_level(&self) -> u32;

    /// Set food level, clamped to `[0, MAX_FOOD_LEVEL]`.
    fn set_food_level(&mut self, level: u32);

    fn is_dead(&self) -> bool;

    fn has_effect(&self, effect: StatusEffect) -> bool;

    fn active_effects(&self) -> Vec<StatusEffect>;

    fn clear_effects(&mut self);

    fn has_harmful_effect(&self) -> bool {
        StatusEffect::HARMFUL.iter().any(|&e| self.has_effect(e))
    }

    /// Spawn point the agent retreats to.
    fn home(&self) -> Location;
}

// ── AgentBody ─────────────────────────────────────────────────────────────────

/// In-memory entity: position, vitals and active effects.
#[derive(Clone, Debug)]
pub struct AgentBody {
    pub location:   Location,
    pub home:       Location,
    pub health:     f64,
    pub max_health: f64,
    pub food_level: u32,
    pub effects:    Vec<StatusEffect>,
}

impl AgentBody {
    /// Full health and food, standing at `home`.
    pub fn new(home: Location) -> Self {
        AgentBody {
            location:   home,
            home,
            health:     20.0,
            max_health: 20.0,
            food_level: MAX_FOOD_LEVEL,
            effects:    Vec::new(),
        }
    }

    pub fn add_effect(&mut self, effect: StatusEffect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }
}

impl EntityControl for AgentBody {
    #[inline]
    fn position(&self) -> Location {
        self.location
    }

    fn set_position_and_facing(&mut self, location: Location) {
        self.location = location;
    }

    #[inline]
    fn health(&self) -> f64 {
        self.health
    }

    #[inline]
    fn max_health(&self) -> f64 {
        self.max_health
    }

    fn set_health(&mut self, health: f64) {
        self.health = health.clamp(0.0, self.max_health);
    }

    #[inline]
    fn food_level(&self) -> u32 {
        self.food_level
    }

    fn set_food_level(&mut self, level: u32) {
        self.food_level = level.min(MAX_FOOD_LEVEL);
    }

    #[inline]
    fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    fn has_effect(&self, effect: StatusEffect) -> bool {
        self.effects.contains(&effect)
    }

    fn active_effects(&self) -> Vec<StatusEffect> {
        self.effects.clone()
    }

    fn clear_effects(&mut self) {
        self.effects.clear();
    }

    fn home(&self) -> Location {
        self.home
    }
}
