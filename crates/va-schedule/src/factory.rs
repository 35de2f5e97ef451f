//! Build the stock behavior set from configuration.

use va_behavior::{
    Behavior, BuildingBehavior, ExplorationBehavior, GatheringBehavior, SurvivalBehavior,
};
use va_core::Config;
use va_mobility::MiningTable;

use crate::{BehaviorScheduler, ScheduleResult};

/// Survival, gathering, exploration and building, in that registration
/// order.  Disabled behaviors are still registered; they simply never ask
/// to run.
pub fn default_behaviors(config: &Config) -> ScheduleResult<Vec<Box<dyn Behavior>>> {
    let table = MiningTable::from_config(&config.mining)?;
    Ok(vec![
        Box::new(SurvivalBehavior::new(
            config.survival.clone(),
            config.flee.clone(),
            config.movement.clone(),
        )),
        Box::new(GatheringBehavior::new(
            config.gathering.clone(),
            config.movement.clone(),
            table.clone(),
        )),
        Box::new(ExplorationBehavior::new(config.exploration.clone(), config.movement.clone())),
        Box::new(BuildingBehavior::new(config.building.clone(), config.movement.clone(), table)),
    ])
}

impl BehaviorScheduler {
    /// A validated, initialized scheduler holding [`default_behaviors`].
    pub fn from_config(config: &Config) -> ScheduleResult<Self> {
        config.validate()?;
        let mut scheduler = BehaviorScheduler::new(config.scheduler.arbitration_interval_ms);
        for behavior in default_behaviors(config)? {
            scheduler.register(behavior)?;
        }
        scheduler.initialize();
        Ok(scheduler)
    }
}
