//! sandbox: three agents on a flat voxel world.
//!
//! A miner, a scout and a builder share a flat world seeded with ore veins,
//! a few trees and one zombie that hunts the miner.  The host side of the
//! loop (moving the zombie, letting it bite) runs here between ticks, the
//! way a game server would drive the engine.
//!
//! ```text
//! cargo run -p sandbox -- [config.toml] [trace-dir]
//! RUST_LOG=debug cargo run -p sandbox
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use va_agent::EntityControl;
use va_core::{AgentId, BlockPos, Config, HostileId, Location, Material, Tick};
use va_output::{CsvStatusWriter, StatusObserver};
use va_sim::{Agent, AgentManager, Sim, SimBuilder, SimObserver, TickOutcome};
use va_world::{Hostile, HostileIndex, HostileKind, VoxelWorld, WorldView};

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_SECONDS:        u64 = 180;
const SURFACE_Y:          i32 = 63;
const HOSTILE_STEP_TICKS: u64 = 10;  // host moves hostiles twice a second
const HOSTILE_STEP:       f64 = 0.5;
const BITE_RANGE:         f64 = 1.5;
const BITE_DAMAGE:        f64 = 1.0;
const PROGRESS_EVERY:     u64 = 400;

// ── World ─────────────────────────────────────────────────────────────────────

fn build_world() -> Result<VoxelWorld> {
    let mut world = VoxelWorld::flat(SURFACE_Y);

    // Iron just under the grass east of the miner, coal and a diamond deeper.
    world.fill(BlockPos::new(4, 62, -1), BlockPos::new(6, 62, 1), Material::IronOre)?;
    world.fill(BlockPos::new(-3, 60, 3), BlockPos::new(-2, 60, 4), Material::CoalOre)?;
    world.set_block(BlockPos::new(2, 58, -4), Material::DiamondOre)?;

    for (x, z) in [(8, 8), (-6, -9), (14, -3), (-18, 16)] {
        world.fill(BlockPos::new(x, 64, z), BlockPos::new(x, 67, z), Material::OakLog)?;
    }
    Ok(world)
}

fn build_hostiles() -> HostileIndex {
    let mut hostiles = HostileIndex::new();
    hostiles.insert(Hostile {
        id:       HostileId(0),
        kind:     HostileKind::Zombie,
        position: Location::new(12.5, 64.0, 12.5),
        target:   Some(AgentId(0)),
        health:   4.0,
    });
    hostiles
}

/// Walk every targeting hostile toward its agent and bite when close.
fn drive_hostiles(sim: &mut Sim<VoxelWorld>) -> Result<()> {
    if !sim.current_tick().0.is_multiple_of(HOSTILE_STEP_TICKS) {
        return Ok(());
    }

    let mut moves = Vec::new();
    let mut bites = Vec::new();
    for hostile in sim.hostiles.iter() {
        let Some(agent) = hostile.target.and_then(|id| sim.agents.get(id)) else {
            continue;
        };
        if agent.body.is_dead() {
            continue;
        }
        let to = agent.body.position();
        let d = hostile.position.horizontal_distance(&to);
        if d <= BITE_RANGE {
            bites.push(agent.id);
        } else {
            let bearing = hostile.position.bearing_to(&to);
            moves.push((hostile.id, hostile.position.step_along(bearing, HOSTILE_STEP.min(d))));
        }
    }

    for (id, pos) in moves {
        sim.hostiles.move_to(id, pos)?;
    }
    for id in bites {
        if let Some(agent) = sim.agents.get_mut(id) {
            let health = agent.body.health();
            agent.body.set_health(health - BITE_DAMAGE);
        }
    }
    Ok(())
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs progress and forwards to the CSV trace when one was requested.
struct Progress {
    trace:    Option<StatusObserver<CsvStatusWriter>>,
    switches: usize,
}

impl SimObserver for Progress {
    fn on_agent_ticked(&mut self, tick: Tick, agent: &Agent, outcome: &TickOutcome) {
        if outcome.switched {
            self.switches += 1;
        }
        if let Some(trace) = &mut self.trace {
            trace.on_agent_ticked(tick, agent, outcome);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, ticked: usize) {
        if tick.0.is_multiple_of(PROGRESS_EVERY) {
            info!(%tick, agents = ticked, switches = self.switches, "progress");
        }
        if let Some(trace) = &mut self.trace {
            trace.on_tick_end(tick, ticked);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, now_ms: u64, agents: &AgentManager) {
        if let Some(trace) = &mut self.trace {
            trace.on_snapshot(tick, now_ms, agents);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Some(trace) = &mut self.trace {
            trace.on_sim_end(final_tick);
        }
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

fn print_summary(sim: &Sim<VoxelWorld>, elapsed: Duration, switches: usize) {
    println!();
    println!(
        "Simulated {} in {:.3} s ({switches} behavior switches)",
        sim.clock,
        elapsed.as_secs_f64()
    );
    println!("{}", sim.agents.stats());
    println!();
    println!(
        "{:<8} {:<9} {:<19} {:>6} {:>4}  {}",
        "Agent", "State", "Behavior", "Health", "Food", "Inventory"
    );
    println!("{}", "-".repeat(72));
    for agent in sim.agents.iter() {
        let behavior = agent.scheduler.active_kind().map_or("-", |k| k.as_str());
        let inventory: Vec<String> = agent
            .inventory
            .contents()
            .into_iter()
            .map(|(m, n)| format!("{m}×{n}"))
            .collect();
        println!(
            "{:<8} {:<9} {:<19} {:>6.1} {:>4}  {}",
            agent.name,
            agent.state.as_str(),
            behavior,
            agent.body.health(),
            agent.body.food_level(),
            if inventory.is_empty() { "-".to_owned() } else { inventory.join(", ") },
        );
    }
    let zombies = sim.hostiles.len();
    println!();
    println!("Hostiles left: {zombies}  |  world edits: {}", sim.world.edit_count());
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::from_file(&path).with_context(|| format!("loading {path}"))?,
        None => Config::default(),
    };
    let trace_dir = args.next().map(PathBuf::from);

    println!("=== sandbox: voxel_agents ===");
    println!(
        "Seed: {}  |  Tick: {} ms  |  Duration: {SIM_SECONDS} s",
        config.agents.seed, config.agents.tick_duration_ms
    );

    let mut sim = SimBuilder::new(config.clone(), build_world()?)
        .hostiles(build_hostiles())
        .agent("miner", Location::new(0.5, 64.0, 0.5))
        .agent("scout", Location::new(24.5, 64.0, -12.5))
        .agent("builder", Location::new(-20.5, 64.0, 20.5))
        .build()?;

    let trace = match &trace_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let writer = CsvStatusWriter::new(dir)?;
            Some(StatusObserver::new(writer, config.agents.tick_duration_ms))
        }
        None => None,
    };
    let mut obs = Progress { trace, switches: 0 };

    let ticks = sim.clock.ticks_for_ms(SIM_SECONDS * 1_000);
    let t0 = Instant::now();
    for _ in 0..ticks {
        drive_hostiles(&mut sim)?;
        sim.tick(&mut obs);
    }
    obs.on_sim_end(sim.current_tick());
    let elapsed = t0.elapsed();

    if let Some(e) = obs.trace.as_mut().and_then(StatusObserver::take_error) {
        eprintln!("output error: {e}");
    }
    if let Some(dir) = &trace_dir {
        println!("Trace written to {}", dir.display());
    }

    print_summary(&sim, elapsed, obs.switches);
    Ok(())
}
