//! office — headless run of the deskworld office.
//!
//! Five humans wander, smoke, chat, sit, type and drink coffee in a walled
//! 12×12 office for ten virtual minutes.  Snapshots and state transitions
//! go to `output/office/`.
//!
//! ```text
//! office [config.json] [layout.csv]
//! ```
//!
//! The optional JSON file overrides any of `sim`, `behavior`, `humans`,
//! `layout` and `output_dir`.  A CSV layout replaces the office preset.
//! Set `RUST_LOG=dw_behavior=debug` to see selection weights.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use dw_agent::NeedKind;
use dw_behavior::{BehaviorConfig, StateKind, Transition};
use dw_core::{SimConfig, SimRng, Tick};
use dw_grid::{WorldLayout, load_layout_csv};
use dw_mobility::MoveCommand;
use dw_output::{CsvWriter, OutputWriter, SimOutputObserver};
use dw_sim::{AgentView, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const HUMANS:                usize = 5;
const SEED:                  u64   = 42;
const TICK_DURATION_MS:      u32   = 100;
const SIM_MINUTES:           u64   = 10;
const OUTPUT_INTERVAL_TICKS: u64   = 10; // one snapshot per virtual second

// ── Configuration file ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:        SimConfig,
    behavior:   BehaviorConfig,
    humans:     usize,
    layout:     Option<WorldLayout>,
    output_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                tick_duration_ms:      TICK_DURATION_MS,
                total_ticks:           SIM_MINUTES * 60_000 / u64::from(TICK_DURATION_MS),
                seed:                  SEED,
                output_interval_ticks: OUTPUT_INTERVAL_TICKS,
                ..SimConfig::default()
            },
            behavior:   BehaviorConfig::default(),
            humans:     HUMANS,
            layout:     None,
            output_dir: PathBuf::from("output/office"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer wrapper to count activity ────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    moves:         usize,
    snapshot_rows: usize,
    entered:       [usize; StateKind::COUNT],
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, moves: 0, snapshot_rows: 0, entered: [0; StateKind::COUNT] }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_move(&mut self, cmd: &MoveCommand) {
        self.moves += 1;
        self.inner.on_move(cmd);
    }

    fn on_state_change(&mut self, transition: &Transition) {
        self.entered[transition.to.index()] += 1;
        self.inner.on_state_change(transition);
    }

    fn on_snapshot(&mut self, tick: Tick, views: &[AgentView], agents: &dw_agent::AgentStore) {
        self.snapshot_rows += views.len();
        self.inner.on_snapshot(tick, views, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let layout_path = args.next().map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    // 1. World.
    let (width, height) = config.layout.as_ref().map_or((12, 12), |l| (l.width, l.height));
    let layout = match (&layout_path, &config.layout) {
        (Some(path), _) => load_layout_csv(path, width, height)
            .with_context(|| format!("loading layout {}", path.display()))?,
        (None, Some(layout)) => layout.clone(),
        (None, None) => WorldLayout::office(),
    };
    let world = layout.build(&mut SimRng::new(config.sim.seed))?;
    info!(
        width = world.width(),
        height = world.height(),
        objects = world.objects().len(),
        "world built"
    );

    // 2. Sim.
    let mut sim = SimBuilder::new(config.sim.clone(), world, config.humans)
        .behavior(config.behavior.clone())
        .build()?;

    // 3. Output.
    let writer = CsvWriter::new(&config.output_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config.sim));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  moves               : {}", obs.moves);
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  state entries       :");
    for kind in StateKind::ALL {
        println!("    {:<12} {}", kind.as_str(), obs.entered[kind.index()]);
    }
    println!();

    println!(
        "{:<8} {:<10} {:<12} {:>10} {:>8} {:>8}",
        "Human", "Cell", "State", "Relaxation", "Hunger", "Social"
    );
    println!("{}", "-".repeat(62));
    for view in sim.views()? {
        let needs = sim.agents.needs(view.agent);
        println!(
            "{:<8} {:<10} {:<12} {:>10.3} {:>8.3} {:>8.3}",
            view.agent.0,
            view.cell.to_string(),
            view.state.map_or("-", |k| k.as_str()),
            needs.value(NeedKind::Relaxation),
            needs.value(NeedKind::Hunger),
            needs.value(NeedKind::Social),
        );
    }

    Ok(())
}
