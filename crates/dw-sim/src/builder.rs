//! Fluent builder for constructing a [`Sim`].

use dw_agent::AgentStoreBuilder;
use dw_behavior::{BehaviorConfig, BehaviorScheduler};
use dw_core::{AgentId, Cell, SimConfig, SimRng};
use dw_grid::{BfsPathFinder, GridWorld, PathFinder};
use dw_mobility::MobilityEngine;

use crate::sim::TransitMode;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick duration, total ticks, seed, walk time per cell
/// - [`GridWorld`] — e.g. from [`dw_grid::WorldLayout::build`]
/// - the number of humans
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                  |
/// |--------------------------|------------------------------------------|
/// | `.path_finder(p)`        | `BfsPathFinder`                          |
/// | `.behavior(c)`           | `BehaviorConfig::default()`              |
/// | `.initial_positions(v)`  | Distinct random free cells (seeded)      |
/// | `.transit_mode(m)`       | `TransitMode::Headless`                  |
/// | `.baseline(v)`           | `1.0` for every need                     |
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldLayout::office().build(&mut SimRng::new(seed))?;
/// let mut sim = SimBuilder::new(config, world, 5)
///     .behavior(behavior)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathFinder = BfsPathFinder> {
    config:       SimConfig,
    world:        GridWorld,
    agent_count:  usize,
    finder:       P,
    behavior:     BehaviorConfig,
    positions:    Option<Vec<Cell>>,
    transit_mode: TransitMode,
    baseline:     f32,
}

impl SimBuilder<BfsPathFinder> {
    pub fn new(config: SimConfig, world: GridWorld, agent_count: usize) -> Self {
        Self {
            config,
            world,
            agent_count,
            finder:       BfsPathFinder,
            behavior:     BehaviorConfig::default(),
            positions:    None,
            transit_mode: TransitMode::Headless,
            baseline:     1.0,
        }
    }
}

impl<P: PathFinder> SimBuilder<P> {
    /// Swap the shortest-path algorithm.
    pub fn path_finder<Q: PathFinder>(self, finder: Q) -> SimBuilder<Q> {
        SimBuilder {
            config:       self.config,
            world:        self.world,
            agent_count:  self.agent_count,
            finder,
            behavior:     self.behavior,
            positions:    self.positions,
            transit_mode: self.transit_mode,
            baseline:     self.baseline,
        }
    }

    pub fn behavior(mut self, config: BehaviorConfig) -> Self {
        self.behavior = config;
        self
    }

    /// Starting cell of each human (must be length `agent_count`, free and
    /// pairwise distinct).
    pub fn initial_positions(mut self, positions: Vec<Cell>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn transit_mode(mut self, mode: TransitMode) -> Self {
        self.transit_mode = mode;
        self
    }

    /// Initial value of every need.
    pub fn baseline(mut self, value: f32) -> Self {
        self.baseline = value;
        self
    }

    /// Validate inputs, place the humans and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let n = self.agent_count;

        // ── Resolve positions ─────────────────────────────────────────────
        let positions = match self.positions {
            Some(p) => {
                if p.len() != n {
                    return Err(SimError::AgentCountMismatch {
                        expected: n,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                for (i, &cell) in p.iter().enumerate() {
                    if !self.world.is_free(cell) || p[..i].contains(&cell) {
                        return Err(SimError::PositionNotFree(cell));
                    }
                }
                p
            }
            None => random_positions(&self.world, n, self.config.seed)?,
        };

        // ── Stores, movement and behavior ─────────────────────────────────
        let clock = self.config.make_clock();
        let walk_ticks = clock.ticks_for_ms(self.config.walk_cell_ms).max(1);

        let (agents, rngs) = AgentStoreBuilder::new(n, self.config.seed)
            .baseline(self.baseline)
            .build();

        let mut mobility = MobilityEngine::new(self.finder, n, walk_ticks);
        for (i, &cell) in positions.iter().enumerate() {
            mobility.place(AgentId(i as u32), cell);
        }

        let scheduler = BehaviorScheduler::new(self.behavior, n)?;

        Ok(Sim::new(self.config, self.world, agents, rngs, mobility, scheduler, self.transit_mode))
    }
}

/// `n` distinct free cells drawn with the master seed.
fn random_positions(world: &GridWorld, n: usize, seed: u64) -> SimResult<Vec<Cell>> {
    let mut free = world.free_cells();
    if free.len() < n {
        return Err(SimError::NoRoom { needed: n, free: free.len() });
    }
    let mut rng = SimRng::new(seed);
    Ok((0..n)
        .map(|_| {
            let i = rng.gen_range(0..free.len());
            free.swap_remove(i)
        })
        .collect())
}
