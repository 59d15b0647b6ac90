//! Weighted random choice of the next activity.
//!
//! ```text
//! weight = base(kind)
//! if kind == penalised: weight /= repeat_penalty
//! for need with value < need_threshold and gain(kind, need) > 0:
//!     weight *= gain * need_boost * (1 - value) * deficit_boost
//! ```
//!
//! A draw uniform in `[0, Σw)` picks the first candidate whose cumulative
//! weight exceeds it, so each candidate wins with probability `wᵢ / Σw`.

use dw_agent::{NeedKind, Needs};
use dw_core::AgentRng;

use crate::config::BehaviorConfig;
use crate::kind::StateKind;

/// Which furniture and peers are currently available to one human.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Availability {
    pub peer:      bool,
    pub sofa:      bool,
    pub desk:      bool,
    pub dispenser: bool,
}

/// Eligible kinds in candidate order.  Smoke, Freeze and MoveRandom are
/// always eligible.
pub fn candidate_set(avail: Availability) -> Vec<StateKind> {
    StateKind::ALL
        .into_iter()
        .filter(|k| match k {
            StateKind::Talk => avail.peer,
            StateKind::Sit => avail.sofa,
            StateKind::Type => avail.desk,
            StateKind::Coffee => avail.dispenser,
            StateKind::Smoke | StateKind::Freeze | StateKind::MoveRandom => true,
        })
        .collect()
}

pub fn weight(kind: StateKind, penalised: Option<StateKind>, needs: &Needs, config: &BehaviorConfig) -> f64 {
    let mut w = config.weights.base(kind);
    if penalised == Some(kind) {
        w /= config.repeat_penalty;
    }
    for need in NeedKind::ALL {
        let value = needs.value(need);
        let gain = config.gains.gain(kind, need);
        if value < config.need_threshold && gain > 0.0 {
            w *= gain as f64 * config.need_boost;
            w *= (1.0 - value as f64) * config.deficit_boost;
        }
    }
    w
}

/// Index of the first entry whose cumulative weight exceeds `roll`.
///
/// Falls back to the last positive entry when rounding pushes `roll` past
/// the total.
pub fn pick(weights: &[f64], roll: f64) -> Option<usize> {
    let mut acc = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        acc += w;
        if w > 0.0 && roll < acc {
            return Some(i);
        }
    }
    weights.iter().rposition(|&w| w > 0.0)
}

/// Draw one of `candidates`.  `None` if the list is empty or all weights
/// are zero.
pub fn draw(
    candidates: &[StateKind],
    penalised:  Option<StateKind>,
    needs:      &Needs,
    config:     &BehaviorConfig,
    rng:        &mut AgentRng,
) -> Option<StateKind> {
    let weights: Vec<f64> = candidates.iter().map(|&k| weight(k, penalised, needs, config)).collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let roll = rng.gen_range(0.0..total);
    pick(&weights, roll).map(|i| candidates[i])
}
