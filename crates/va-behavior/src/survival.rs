//! Survival: flee, fight, heal, feed and cure.
//!
//! Fleeing preempts everything else.  Otherwise the reactive checks run in
//! a fixed order and the first one that applies owns the tick:
//!
//! 1. emergency heal (health at or below `critical_health`, once a second)
//! 2. flee start (threat inside `flee_range`, or health at `flee_health`)
//! 3. combat (threat inside `combat_range` with `auto_defend`)
//! 4. routine heal (healing item, else walk home)
//! 5. feeding
//! 6. curing harmful effects
//!
//! An emergency heal is skipped while fleeing, and a flee that starts in the
//! same tick still takes its first step.

use tracing::{debug, info};

use va_agent::StatusEffect;
use va_core::material::{FOOD_ITEMS, HEALING_ITEMS};
use va_core::{FleeConfig, HostileId, Material, MovementConfig, SurvivalConfig};
use va_mobility::{FleeOutcome, FleeSession, MovementSession, StepOutcome};

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult};

/// Minimum spacing of emergency heals and of melee strikes.
const EMERGENCY_HEAL_COOLDOWN_MS: u64 = 1000;
const ATTACK_COOLDOWN_MS: u64 = 1000;

/// Health regained per emergency heal when no healing item is held.
const EMERGENCY_HEAL_AMOUNT: f64 = 1.0;

/// A retreat home stops this close to home.
const HOME_RADIUS: f64 = 2.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MovePurpose {
    Engage(HostileId),
    Retreat,
}

#[derive(Clone, Debug)]
pub enum SurvivalActivity {
    None,
    Fleeing(FleeSession),
    Moving { session: MovementSession, purpose: MovePurpose },
}

/// Closest hostile targeting the agent, as seen by the last threat scan.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Threat {
    id:       HostileId,
    distance: f64,
}

pub struct SurvivalBehavior {
    config:              SurvivalConfig,
    flee:                FleeConfig,
    movement:            MovementConfig,
    activity:            SurvivalActivity,
    threat:              Option<Threat>,
    last_threat_check:   Option<u64>,
    hungry:              bool,
    last_food_check:     Option<u64>,
    last_emergency_heal: Option<u64>,
    last_attack:         Option<u64>,
}

impl SurvivalBehavior {
    pub fn new(config: SurvivalConfig, flee: FleeConfig, movement: MovementConfig) -> Self {
        SurvivalBehavior {
            config,
            flee,
            movement,
            activity:            SurvivalActivity::None,
            threat:              None,
            last_threat_check:   None,
            hungry:              false,
            last_food_check:     None,
            last_emergency_heal: None,
            last_attack:         None,
        }
    }

    #[inline]
    pub fn activity(&self) -> &SurvivalActivity {
        &self.activity
    }

    #[inline]
    pub fn is_fleeing(&self) -> bool {
        matches!(self.activity, SurvivalActivity::Fleeing(_))
    }

    // ── Cached checks ────────────────────────────────────────────────────

    fn refresh(&mut self, ctx: &BehaviorContext<'_>) {
        let here = ctx.entity.position();
        if elapsed_since(self.last_threat_check, ctx.now, self.config.threat_check_interval_ms) {
            self.last_threat_check = Some(ctx.now);
            self.threat = ctx
                .hostiles
                .nearest_targeting(ctx.agent, &here, self.config.entity_search_radius)
                .map(|h| Threat { id: h.id, distance: here.distance(&h.position) });
        } else if let Some(threat) = self.threat {
            // Between scans, keep following the cached hostile.
            self.threat = ctx
                .hostiles
                .get(threat.id)
                .filter(|h| h.target == Some(ctx.agent))
                .map(|h| Threat { id: h.id, distance: here.distance(&h.position) });
        }
        if elapsed_since(self.last_food_check, ctx.now, self.config.food_check_interval_ms) {
            self.last_food_check = Some(ctx.now);
            self.hungry = ctx.entity.food_level() < self.config.food_threshold;
        }
    }

    fn needs_cure(ctx: &BehaviorContext<'_>) -> bool {
        ctx.entity.has_harmful_effect() && ctx.inventory.count(Material::MilkBucket) > 0
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn emergency_heal(&mut self, ctx: &mut BehaviorContext<'_>) -> bool {
        if ctx.entity.health() > self.config.critical_health
            || !elapsed_since(self.last_emergency_heal, ctx.now, EMERGENCY_HEAL_COOLDOWN_MS)
        {
            return false;
        }
        self.last_emergency_heal = Some(ctx.now);
        let amount = match ctx.inventory.take_first_of(HEALING_ITEMS) {
            Some(item) => item.heal_amount().unwrap_or(EMERGENCY_HEAL_AMOUNT),
            None => EMERGENCY_HEAL_AMOUNT,
        };
        let health = ctx.entity.health() + amount;
        ctx.entity.set_health(health);
        info!(agent = %ctx.agent, health = ctx.entity.health(), "emergency heal");
        true
    }

    fn should_flee(&self, ctx: &BehaviorContext<'_>) -> Option<Option<HostileId>> {
        if let Some(threat) = self.threat {
            if threat.distance < self.config.flee_range {
                return Some(Some(threat.id));
            }
        }
        if ctx.entity.health() <= self.config.flee_health {
            if let Some(threat) = self.threat {
                return Some(Some(threat.id));
            }
            if ctx.entity.position().distance(&ctx.entity.home()) > HOME_RADIUS {
                return Some(None);
            }
        }
        None
    }

    fn step_flee(&mut self, ctx: &mut BehaviorContext<'_>, mut session: FleeSession) -> BehaviorResult<()> {
        ctx.status.set(
            "fleeing",
            Some(session.threat.map_or_else(|| "home".to_string(), |id| id.to_string())),
        );
        let outcome = session.step(
            ctx.now,
            ctx.agent,
            &mut *ctx.world,
            &mut *ctx.entity,
            &mut *ctx.inventory,
            &*ctx.hostiles,
        )?;
        if outcome.is_terminal() {
            debug!(agent = %ctx.agent, ?outcome, steps = session.steps, "flee finished");
            ctx.status.set_action("idle");
            if outcome == FleeOutcome::TimedOut {
                return Err(BehaviorError::SessionTimeout("flee"));
            }
            return Ok(());
        }
        self.activity = SurvivalActivity::Fleeing(session);
        Ok(())
    }

    fn strike(&mut self, ctx: &mut BehaviorContext<'_>, id: HostileId) -> BehaviorResult<()> {
        ctx.status.set("fighting", Some(id.to_string()));
        if !elapsed_since(self.last_attack, ctx.now, ATTACK_COOLDOWN_MS) {
            return Ok(());
        }
        self.last_attack = Some(ctx.now);
        if ctx.hostiles.damage(id, self.config.attack_damage)? {
            info!(agent = %ctx.agent, hostile = %id, "hostile defeated");
            self.threat = None;
        }
        Ok(())
    }

    fn step_moving(
        &mut self,
        ctx: &mut BehaviorContext<'_>,
        mut session: MovementSession,
        purpose: MovePurpose,
    ) -> BehaviorResult<()> {
        if let MovePurpose::Engage(id) = purpose {
            match self.threat.filter(|t| t.id == id) {
                None => return Ok(()),
                Some(t) if t.distance < self.config.attack_range => return self.strike(ctx, id),
                Some(_) => {
                    // Chase the hostile's current position.
                    if let Some(h) = ctx.hostiles.get(id) {
                        session.destination = h.position;
                    }
                }
            }
        }
        let outcome =
            session.step(ctx.now, &mut *ctx.world, &mut *ctx.entity, &mut *ctx.inventory)?;
        match outcome {
            StepOutcome::TimedOut => Err(BehaviorError::SessionTimeout("movement")),
            o if o.is_terminal() => Ok(()),
            _ => {
                self.activity = SurvivalActivity::Moving { session, purpose };
                Ok(())
            }
        }
    }

    fn combat(&mut self, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorResult<()>> {
        let threat = self.threat.filter(|t| t.distance <= self.config.combat_range)?;
        if !self.config.auto_defend {
            return None;
        }
        if threat.distance < self.config.attack_range {
            return Some(self.strike(ctx, threat.id));
        }
        let position = ctx.hostiles.get(threat.id)?.position;
        ctx.status.set("engaging", Some(threat.id.to_string()));
        let session = MovementSession::new(position, ctx.now, &self.movement);
        Some(self.step_moving(ctx, session, MovePurpose::Engage(threat.id)))
    }

    fn routine_heal(&mut self, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorResult<()>> {
        if ctx.entity.health() >= self.config.health_threshold {
            return None;
        }
        if let Some(item) = ctx.inventory.take_first_of(HEALING_ITEMS) {
            let health = ctx.entity.health() + item.heal_amount().unwrap_or(0.0);
            ctx.entity.set_health(health);
            ctx.status.set("healing", Some(item.to_string()));
            info!(agent = %ctx.agent, %item, health = ctx.entity.health(), "healed");
            return Some(Ok(()));
        }
        let home = ctx.entity.home();
        if ctx.entity.position().distance(&home) <= HOME_RADIUS {
            return Some(Err(BehaviorError::ResourceExhausted(Material::GoldenApple)));
        }
        ctx.status.set("retreating", Some("home".to_string()));
        let session = MovementSession::new(home, ctx.now, &self.movement);
        Some(self.step_moving(ctx, session, MovePurpose::Retreat))
    }

    fn feed(&mut self, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorResult<()>> {
        if !self.hungry {
            return None;
        }
        let Some(item) = ctx.inventory.take_first_of(FOOD_ITEMS) else {
            return Some(Err(BehaviorError::ResourceExhausted(Material::Bread)));
        };
        let level = ctx.entity.food_level() + item.food_value().unwrap_or(0);
        ctx.entity.set_food_level(level);
        self.hungry = ctx.entity.food_level() < self.config.food_threshold;
        ctx.status.set("eating", Some(item.to_string()));
        info!(agent = %ctx.agent, %item, food = ctx.entity.food_level(), "ate");
        Some(Ok(()))
    }

    fn cure(&mut self, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorResult<()>> {
        if !ctx.entity.has_harmful_effect() {
            return None;
        }
        if ctx.inventory.try_remove(Material::MilkBucket, 1) {
            ctx.entity.clear_effects();
            ctx.inventory.add(Material::Bucket, 1);
            ctx.status.set("curing", Some(Material::MilkBucket.to_string()));
            info!(agent = %ctx.agent, "effects cleared");
            return Some(Ok(()));
        }
        let poisoned = ctx.entity.has_effect(StatusEffect::Poison)
            || ctx.entity.has_effect(StatusEffect::Wither);
        if !poisoned {
            return None;
        }
        let Some(item) = ctx.inventory.take_first_of(HEALING_ITEMS) else {
            return Some(Err(BehaviorError::ResourceExhausted(Material::MilkBucket)));
        };
        let health = ctx.entity.health() + item.heal_amount().unwrap_or(0.0);
        ctx.entity.set_health(health);
        ctx.status.set("curing", Some(item.to_string()));
        Some(Ok(()))
    }

    fn react(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        if let Some(target) = self.should_flee(ctx) {
            info!(agent = %ctx.agent, health = ctx.entity.health(), threat = ?target, "fleeing");
            self.activity = SurvivalActivity::None;
            let session = FleeSession::new(target, ctx.entity.home(), ctx.now, &self.flee);
            return self.step_flee(ctx, session);
        }
        match std::mem::replace(&mut self.activity, SurvivalActivity::None) {
            SurvivalActivity::Moving { session, purpose } => {
                return self.step_moving(ctx, session, purpose);
            }
            SurvivalActivity::Fleeing(session) => return self.step_flee(ctx, session),
            SurvivalActivity::None => {}
        }
        if let Some(result) = self.combat(ctx) {
            return result;
        }
        if let Some(result) = self.routine_heal(ctx) {
            return result;
        }
        if let Some(result) = self.feed(ctx) {
            return result;
        }
        if let Some(result) = self.cure(ctx) {
            return result;
        }
        ctx.status.set_action("watching");
        Ok(())
    }
}

/// `true` when nothing happened yet or at least `interval` ms have passed.
fn elapsed_since(last: Option<u64>, now: u64, interval: u64) -> bool {
    last.is_none_or(|t| now.saturating_sub(t) >= interval)
}

impl Behavior for SurvivalBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Survival
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if !self.config.enabled || ctx.entity.is_dead() {
            return Ok(false);
        }
        self.refresh(ctx);
        Ok(!matches!(self.activity, SurvivalActivity::None)
            || ctx.entity.health() < self.config.health_threshold
            || self.hungry
            || self.threat.is_some()
            || Self::needs_cure(ctx))
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        self.refresh(ctx);

        let result = match std::mem::replace(&mut self.activity, SurvivalActivity::None) {
            SurvivalActivity::Fleeing(session) => self.step_flee(ctx, session),
            other => {
                self.activity = other;
                if self.emergency_heal(ctx) && self.should_flee(ctx).is_none() {
                    return Ok(());
                }
                self.react(ctx)
            }
        };
        match result {
            Err(BehaviorError::ResourceExhausted(material)) => {
                debug!(agent = %ctx.agent, %material, "nothing to use");
                Ok(())
            }
            other => other,
        }
    }

    fn on_stop(&mut self) -> BehaviorResult<()> {
        self.threat = None;
        self.last_threat_check = None;
        Ok(())
    }

    fn cancel_sessions(&mut self) {
        self.activity = SurvivalActivity::None;
    }

    fn has_session(&self) -> bool {
        !matches!(self.activity, SurvivalActivity::None)
    }
}
