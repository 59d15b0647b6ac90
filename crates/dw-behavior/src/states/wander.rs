use dw_core::Cell;
use dw_grid::PathFinder;
use dw_mobility::RouteOutcome;

use crate::context::StateCtx;
use crate::BehaviorResult;

/// Walk to a random free cell nobody stands on.
#[derive(Debug, Default)]
pub struct MoveRandom {
    target: Option<Cell>,
}

impl MoveRandom {
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        let mut exclude = ctx.other_cells();
        exclude.push(ctx.cell());

        let agent = ctx.agent;
        let env = &mut *ctx.env;
        let Some(target) = env.world.random_free_cell(env.rngs.get_mut(agent), &exclude) else {
            return Ok(false);
        };
        let outcome = env.mobility.route_to(agent, target, env.world, env.now)?;
        if outcome == RouteOutcome::Unreachable {
            return Ok(false);
        }
        self.target = Some(target);
        Ok(true)
    }

    /// Active until the walk is over.
    pub fn is_active<P: PathFinder>(&self, ctx: &StateCtx<'_, '_, P>) -> bool {
        self.target.is_some() && !ctx.is_idle()
    }
}
