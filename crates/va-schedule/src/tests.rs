//! Unit tests for va-schedule.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use va_agent::{AgentBody, Inventory};
use va_behavior::{
    ActivityStatus, Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult,
};
use va_core::{AgentId, AgentRng, Location, Material};
use va_world::{HostileIndex, VoxelWorld};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Fixture {
    world:     VoxelWorld,
    hostiles:  HostileIndex,
    body:      AgentBody,
    inventory: Inventory,
    rng:       AgentRng,
    status:    ActivityStatus,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            world:     VoxelWorld::flat(63),
            hostiles:  HostileIndex::new(),
            body:      AgentBody::new(Location::new(0.0, 64.0, 0.0)),
            inventory: Inventory::new(),
            rng:       AgentRng::new(1, AgentId(0)),
            status:    ActivityStatus::default(),
        }
    }

    fn ctx(&mut self, now: u64) -> BehaviorContext<'_> {
        BehaviorContext {
            now,
            agent:     AgentId(0),
            world:     &mut self.world,
            hostiles:  &mut self.hostiles,
            entity:    &mut self.body,
            inventory: &mut self.inventory,
            rng:       &mut self.rng,
            status:    &mut self.status,
        }
    }
}

/// Shared journal of hook calls, e.g. `"stop exploration"`.
type Journal = Rc<RefCell<Vec<String>>>;

/// Scripted behavior: executability is toggled from the test through a
/// shared cell, every hook is journaled.
struct Probe {
    kind:       BehaviorKind,
    priority:   i32,
    executable: Rc<Cell<bool>>,
    fail_start: bool,
    fail_check: bool,
    journal:    Journal,
}

impl Probe {
    fn boxed(kind: BehaviorKind, priority: i32, journal: &Journal) -> (Box<dyn Behavior>, Rc<Cell<bool>>) {
        let executable = Rc::new(Cell::new(true));
        let probe = Probe {
            kind,
            priority,
            executable: executable.clone(),
            fail_start: false,
            fail_check: false,
            journal:    journal.clone(),
        };
        (Box::new(probe), executable)
    }

    fn log(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{hook} {}", self.kind));
    }
}

impl Behavior for Probe {
    fn kind(&self) -> BehaviorKind {
        self.kind
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&mut self, _ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if self.fail_check {
            return Err(BehaviorError::ResourceExhausted(Material::Dirt));
        }
        Ok(self.executable.get())
    }

    fn on_start(&mut self, _ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        if self.fail_start {
            return Err(BehaviorError::ResourceExhausted(Material::Stone));
        }
        self.log("start");
        Ok(())
    }

    fn on_update(&mut self, _ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        self.log("update");
        Ok(())
    }

    fn on_stop(&mut self) -> BehaviorResult<()> {
        self.log("stop");
        Ok(())
    }

    fn cancel_sessions(&mut self) {}

    fn has_session(&self) -> bool {
        false
    }
}

// ── Arbitration ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod arbitration_tests {
    use super::*;
    use crate::{BehaviorScheduler, ScheduleError};

    fn scheduler_with(entries: &[(BehaviorKind, i32)], journal: &Journal) -> (BehaviorScheduler, Vec<Rc<Cell<bool>>>) {
        let mut scheduler = BehaviorScheduler::new(1000);
        let mut switches = Vec::new();
        for &(kind, priority) in entries {
            let (probe, executable) = Probe::boxed(kind, priority, journal);
            scheduler.register(probe).unwrap();
            switches.push(executable);
        }
        scheduler.initialize();
        (scheduler, switches)
    }

    #[test]
    fn highest_priority_wins() {
        let journal = Journal::default();
        let (mut scheduler, _) = scheduler_with(
            &[(BehaviorKind::Survival, 10), (BehaviorKind::Exploration, 50), (BehaviorKind::Building, 20)],
            &journal,
        );
        let mut fx = Fixture::new();
        let outcome = scheduler.tick(&mut fx.ctx(0));
        assert!(outcome.arbitrated && outcome.switched && outcome.updated);
        assert_eq!(outcome.active, Some(BehaviorKind::Exploration));
        assert_eq!(fx.status.behavior, Some(BehaviorKind::Exploration));
    }

    #[test]
    fn equal_priority_goes_to_first_registered() {
        let journal = Journal::default();
        let (mut scheduler, _) = scheduler_with(
            &[(BehaviorKind::Building, 30), (BehaviorKind::Exploration, 30)],
            &journal,
        );
        let mut fx = Fixture::new();
        assert_eq!(scheduler.tick(&mut fx.ctx(0)).active, Some(BehaviorKind::Building));
    }

    #[test]
    fn arbitration_waits_for_the_interval() {
        let journal = Journal::default();
        let (mut scheduler, switches) = scheduler_with(
            &[(BehaviorKind::ResourceGathering, 10), (BehaviorKind::Survival, 20)],
            &journal,
        );
        switches[1].set(false);
        let mut fx = Fixture::new();
        assert_eq!(scheduler.tick(&mut fx.ctx(0)).active, Some(BehaviorKind::ResourceGathering));

        switches[1].set(true);
        let outcome = scheduler.tick(&mut fx.ctx(999));
        assert!(!outcome.arbitrated);
        assert_eq!(outcome.active, Some(BehaviorKind::ResourceGathering));

        let outcome = scheduler.tick(&mut fx.ctx(1000));
        assert!(outcome.arbitrated && outcome.switched);
        assert_eq!(outcome.active, Some(BehaviorKind::Survival));
    }

    #[test]
    fn switch_stops_old_exactly_once_before_starting_new() {
        let journal = Journal::default();
        let (mut scheduler, switches) = scheduler_with(
            &[(BehaviorKind::ResourceGathering, 10), (BehaviorKind::Survival, 20)],
            &journal,
        );
        switches[1].set(false);
        let mut fx = Fixture::new();
        scheduler.tick(&mut fx.ctx(0));
        switches[1].set(true);
        scheduler.tick(&mut fx.ctx(1000));

        let transitions: Vec<String> = journal
            .borrow()
            .iter()
            .filter(|e| !e.starts_with("update"))
            .cloned()
            .collect();
        assert_eq!(
            transitions,
            ["start resource_gathering", "stop resource_gathering", "start survival"]
        );
        assert_eq!(journal.borrow().last().map(String::as_str), Some("update survival"));
    }

    #[test]
    fn nothing_executable_stops_the_active_behavior() {
        let journal = Journal::default();
        let (mut scheduler, switches) = scheduler_with(&[(BehaviorKind::Exploration, 5)], &journal);
        let mut fx = Fixture::new();
        scheduler.tick(&mut fx.ctx(0));
        switches[0].set(false);
        let outcome = scheduler.tick(&mut fx.ctx(1000));
        assert_eq!(outcome.active, None);
        assert!(!outcome.updated);
        assert_eq!(scheduler.active_count(), 0);
        assert!(journal.borrow().contains(&"stop exploration".to_string()));
        assert_eq!(fx.status.behavior, None);
    }

    #[test]
    fn failed_start_leaves_nothing_active() {
        let journal = Journal::default();
        let mut scheduler = BehaviorScheduler::new(1000);
        scheduler
            .register(Box::new(Probe {
                kind:       BehaviorKind::Building,
                priority:   50,
                executable: Rc::new(Cell::new(true)),
                fail_start: true,
                fail_check: false,
                journal:    journal.clone(),
            }))
            .unwrap();
        scheduler.initialize();
        let mut fx = Fixture::new();
        let outcome = scheduler.tick(&mut fx.ctx(0));
        assert_eq!(outcome.active, None);
        assert_eq!(scheduler.active_count(), 0);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn failing_check_counts_as_not_executable() {
        let journal = Journal::default();
        let mut scheduler = BehaviorScheduler::new(1000);
        scheduler
            .register(Box::new(Probe {
                kind:       BehaviorKind::Survival,
                priority:   100,
                executable: Rc::new(Cell::new(true)),
                fail_start: false,
                fail_check: true,
                journal:    journal.clone(),
            }))
            .unwrap();
        let (probe, _) = Probe::boxed(BehaviorKind::Exploration, 1, &journal);
        scheduler.register(probe).unwrap();
        scheduler.initialize();
        let mut fx = Fixture::new();
        assert_eq!(scheduler.tick(&mut fx.ctx(0)).active, Some(BehaviorKind::Exploration));
    }

    #[test]
    fn uninitialized_behaviors_never_start() {
        let journal = Journal::default();
        let mut scheduler = BehaviorScheduler::new(1000);
        let (probe, _) = Probe::boxed(BehaviorKind::Exploration, 1, &journal);
        scheduler.register(probe).unwrap();
        let mut fx = Fixture::new();
        assert_eq!(scheduler.tick(&mut fx.ctx(0)).active, None);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn force_switches_immediately() {
        let journal = Journal::default();
        let (mut scheduler, _) = scheduler_with(
            &[(BehaviorKind::Survival, 100), (BehaviorKind::Exploration, 1)],
            &journal,
        );
        let mut fx = Fixture::new();
        scheduler.tick(&mut fx.ctx(0));
        scheduler.force(BehaviorKind::Exploration, &mut fx.ctx(10)).unwrap();
        assert_eq!(scheduler.active_kind(), Some(BehaviorKind::Exploration));
        assert_eq!(scheduler.active_count(), 1);

        let err = scheduler.force(BehaviorKind::Building, &mut fx.ctx(20)).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownBehavior(BehaviorKind::Building)));
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let journal = Journal::default();
        let mut scheduler = BehaviorScheduler::new(1000);
        let (a, _) = Probe::boxed(BehaviorKind::Survival, 1, &journal);
        let (b, _) = Probe::boxed(BehaviorKind::Survival, 2, &journal);
        scheduler.register(a).unwrap();
        assert!(matches!(scheduler.register(b), Err(ScheduleError::Duplicate(BehaviorKind::Survival))));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn shutdown_makes_the_scheduler_inert() {
        let journal = Journal::default();
        let (mut scheduler, _) = scheduler_with(&[(BehaviorKind::Exploration, 1)], &journal);
        let mut fx = Fixture::new();
        scheduler.tick(&mut fx.ctx(0));
        scheduler.shutdown();
        assert_eq!(scheduler.active_kind(), None);
        assert_eq!(scheduler.tick(&mut fx.ctx(5000)).active, None);
        assert_eq!(journal.borrow().iter().filter(|e| e.starts_with("stop")).count(), 1);
    }

    #[test]
    fn statistics_report_current_behavior() {
        let journal = Journal::default();
        let (mut scheduler, _) = scheduler_with(
            &[(BehaviorKind::Survival, 3), (BehaviorKind::Building, 2)],
            &journal,
        );
        let mut fx = Fixture::new();
        scheduler.tick(&mut fx.ctx(0));
        let stats = scheduler.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.current, Some(BehaviorKind::Survival));
        assert_eq!(stats.to_string(), "1/2 active (survival)");
    }
}

// ── Invariants under random schedules ─────────────────────────────────────────

#[cfg(test)]
mod randomized_tests {
    use va_core::{AgentId, AgentRng};

    use super::*;
    use crate::BehaviorScheduler;

    #[test]
    fn at_most_one_active_under_random_ticks() {
        for seed in 0..20 {
            let mut rng = AgentRng::new(seed, AgentId(0));
            let journal = Journal::default();
            let mut scheduler = BehaviorScheduler::new(1000);
            let mut switches = Vec::new();
            for kind in BehaviorKind::ALL {
                let (probe, executable) = Probe::boxed(kind, rng.gen_range(0..4), &journal);
                scheduler.register(probe).unwrap();
                switches.push(executable);
            }
            scheduler.initialize();

            let mut fx = Fixture::new();
            let mut now = 0;
            for _ in 0..300 {
                for switch in &switches {
                    if rng.gen_range(0..5) == 0 {
                        switch.set(!switch.get());
                    }
                }
                if rng.gen_range(0..20) == 0 {
                    let kind = BehaviorKind::ALL[rng.gen_range(0..4)];
                    scheduler.force(kind, &mut fx.ctx(now)).unwrap();
                }
                let outcome = scheduler.tick(&mut fx.ctx(now));
                assert!(scheduler.active_count() <= 1, "seed {seed}");
                assert_eq!(scheduler.active_count(), usize::from(outcome.active.is_some()));
                now += rng.gen_range(0..700);
            }
        }
    }
}

// ── Stock behaviors ───────────────────────────────────────────────────────────

#[cfg(test)]
mod stock_tests {
    use va_core::{BlockPos, Config};
    use va_world::WorldView;

    use super::*;
    use crate::{BehaviorScheduler, default_behaviors};

    #[test]
    fn default_set_in_registration_order() {
        let kinds: Vec<BehaviorKind> = default_behaviors(&Config::default())
            .unwrap()
            .iter()
            .map(|b| b.kind())
            .collect();
        assert_eq!(kinds, BehaviorKind::ALL);
    }

    #[test]
    fn survival_beats_gathering_at_flee_threshold() {
        let config = Config::default();
        let mut scheduler = BehaviorScheduler::from_config(&config).unwrap();
        let mut fx = Fixture::new();
        fx.world.set_block(BlockPos::new(3, 64, 0), Material::IronOre).unwrap();
        fx.body.health = config.survival.flee_health;

        let outcome = scheduler.tick(&mut fx.ctx(0));
        assert_eq!(outcome.active, Some(BehaviorKind::Survival));
        assert_eq!(scheduler.active_count(), 1);
        let gathering = scheduler.slot(BehaviorKind::ResourceGathering).unwrap();
        assert!(!gathering.is_active());
    }

    #[test]
    fn healthy_agent_near_ore_gathers() {
        let mut scheduler = BehaviorScheduler::from_config(&Config::default()).unwrap();
        let mut fx = Fixture::new();
        fx.world.set_block(BlockPos::new(3, 64, 0), Material::IronOre).unwrap();
        let outcome = scheduler.tick(&mut fx.ctx(0));
        assert_eq!(outcome.active, Some(BehaviorKind::ResourceGathering));
        assert_eq!(fx.status.action, "mining");

        scheduler.tick(&mut fx.ctx(3000));
        assert_eq!(fx.inventory.count(Material::RawIron), 1);
        assert_eq!(fx.world.block_at(BlockPos::new(3, 64, 0)), Material::Air);
    }
}
