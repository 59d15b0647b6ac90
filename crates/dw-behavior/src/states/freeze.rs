use dw_core::Animation;
use dw_grid::PathFinder;

use crate::context::StateCtx;
use crate::BehaviorResult;

/// Stand still for a short random time.
#[derive(Debug, Default)]
pub struct Freeze {
    active: bool,
}

impl Freeze {
    pub fn start<P: PathFinder>(&mut self, ctx: &mut StateCtx<'_, '_, P>) -> BehaviorResult<bool> {
        ctx.play(Animation::Freeze, None);
        let ms = ctx.roll(ctx.config.freeze);
        ctx.wait_ms(ms)?;
        self.active = true;
        Ok(true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_timer(&mut self) {
        self.active = false;
    }
}
