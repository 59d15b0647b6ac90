use dw_core::Animation;
use dw_grid::PathFinder;

use crate::context::StateCtx;
use crate::kind::StateKind;
use crate::BehaviorResult;

/// Smoke in place for one to three cycles of the smoke animation.
#[derive(Debug, Default)]
pub struct Smoke {
    active: bool,
}

impl Smoke {
    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        ctx.play(Animation::Smoke, None);
        let ms = ctx.roll_loops(Animation::Smoke, ctx.config.smoke_loops);
        ctx.wait_ms(ms)?;
        self.active = true;
        Ok(true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_timer<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) {
        if self.active {
            ctx.replenish(StateKind::Smoke);
            self.active = false;
        }
    }
}
