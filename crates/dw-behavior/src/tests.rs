//! Unit tests for dw-behavior.

#[cfg(test)]
mod helpers {
    use dw_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
    use dw_core::{AgentId, Cell, SimClock, Tick};
    use dw_grid::{BfsPathFinder, GridWorld, GridWorldBuilder, ObjectKind, ResourceRepository};
    use dw_mobility::MobilityEngine;

    use crate::{BehaviorConfig, BehaviorScheduler, Env, StateKind};

    /// Headless mini-simulation: 100 ms ticks, 12 ticks per walked cell,
    /// no need decay.
    pub struct Harness {
        pub clock:     SimClock,
        pub world:     GridWorld,
        pub resources: ResourceRepository,
        pub mobility:  MobilityEngine<BfsPathFinder>,
        pub agents:    AgentStore,
        pub rngs:      AgentRngs,
        pub sched:     BehaviorScheduler,
        pub now:       Tick,
    }

    impl Harness {
        pub fn new(world: GridWorld, positions: &[Cell], config: BehaviorConfig) -> Self {
            let n = positions.len();
            let (agents, rngs) = AgentStoreBuilder::new(n, 42).build();
            let mut mobility = MobilityEngine::new(BfsPathFinder, n, 12);
            for (i, &cell) in positions.iter().enumerate() {
                mobility.place(AgentId(i as u32), cell);
            }
            Self {
                clock: SimClock::new(100),
                world,
                resources: ResourceRepository::new(),
                mobility,
                agents,
                rngs,
                sched: BehaviorScheduler::new(config, n).unwrap(),
                now: Tick::ZERO,
            }
        }

        pub fn force(&mut self, agent: AgentId, kind: StateKind) -> bool {
            let Self { clock, world, resources, mobility, agents, rngs, sched, now } = self;
            let mut env = Env { now: *now, clock: &*clock, world: &*world, resources, mobility, agents, rngs };
            sched.force(agent, kind, &mut env).unwrap()
        }

        pub fn candidates(&mut self, agent: AgentId) -> Vec<StateKind> {
            let Self { clock, world, resources, mobility, agents, rngs, sched, now } = self;
            let env = Env { now: *now, clock: &*clock, world: &*world, resources, mobility, agents, rngs };
            sched.candidates(agent, &env)
        }

        /// Advance one tick: finish due walks, fire timers, update everyone.
        pub fn tick(&mut self) {
            self.now = self.now + 1;
            for a in self.mobility.due_arrivals(self.now) {
                self.mobility.complete_transit(a, self.now).unwrap();
            }
            let Self { clock, world, resources, mobility, agents, rngs, sched, now } = self;
            let mut env = Env { now: *now, clock: &*clock, world: &*world, resources, mobility, agents, rngs };
            sched.fire_timers(&mut env).unwrap();
            for i in 0..sched.agent_count() {
                sched.update(AgentId(i as u32), &mut env).unwrap();
            }
            env.mobility.take_commands();
        }

        /// Tick until `done` holds, at most `limit` times.  Returns whether
        /// it held.
        pub fn run_until(&mut self, limit: u32, mut done: impl FnMut(&Harness) -> bool) -> bool {
            for _ in 0..limit {
                self.tick();
                if done(self) {
                    return true;
                }
            }
            false
        }
    }

    /// 6×6 empty floor with a single sofa at (3, 3).
    pub fn sofa_room() -> GridWorld {
        let mut b = GridWorldBuilder::new(6, 6);
        b.add_object(ObjectKind::Sofa, Cell::new(3, 3));
        b.build().unwrap()
    }

    pub fn empty_room() -> GridWorld {
        GridWorldBuilder::new(6, 6).build().unwrap()
    }
}

// ── Kinds and config ──────────────────────────────────────────────────────────

#[cfg(test)]
mod kind {
    use dw_grid::ObjectKind;
    use crate::{BehaviorConfig, StateKind};

    #[test]
    fn names_parse_back() {
        for k in StateKind::ALL {
            assert_eq!(k.as_str().parse::<StateKind>().unwrap(), k);
        }
        assert!("nap".parse::<StateKind>().is_err());
    }

    #[test]
    fn furniture_requirements() {
        assert_eq!(StateKind::Sit.required_object(), Some(ObjectKind::Sofa));
        assert_eq!(StateKind::Type.required_object(), Some(ObjectKind::Desk));
        assert_eq!(StateKind::Coffee.required_object(), Some(ObjectKind::Dispenser));
        assert_eq!(StateKind::Talk.required_object(), None);
    }

    #[test]
    fn only_low_commitment_states_are_interruptible() {
        let open: Vec<_> = StateKind::ALL.into_iter().filter(|k| k.is_interruptible()).collect();
        assert_eq!(open, vec![StateKind::Smoke, StateKind::Freeze, StateKind::MoveRandom, StateKind::Sit]);
    }

    #[test]
    fn default_type_weight_is_sum_of_the_rest() {
        let c = BehaviorConfig::default();
        assert_eq!(c.weights.base(StateKind::Type), 24.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut c = BehaviorConfig::default();
        c.repeat_penalty = 0.0;
        assert!(c.validate().is_err());
        let mut c = BehaviorConfig::default();
        c.smoke_loops = (2.0, 1.0);
        assert!(c.validate().is_err());
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selection {
    use dw_agent::{NeedKind, Needs};
    use dw_core::{AgentId, AgentRng};
    use crate::selection::{candidate_set, draw, pick, weight};
    use crate::{Availability, BehaviorConfig, StateKind};

    #[test]
    fn weight_uses_base_penalty_and_need_boost() {
        let c = BehaviorConfig::default();
        let full = Needs::default();
        assert_eq!(weight(StateKind::Smoke, None, &full, &c), 5.0);
        assert_eq!(weight(StateKind::Smoke, Some(StateKind::Smoke), &full, &c), 0.5);

        let mut tired = Needs::default();
        tired.set(NeedKind::Relaxation, 0.2);
        // 5 × (0.4 × 8) × (0.8 × 3)
        let w = weight(StateKind::Smoke, None, &tired, &c);
        assert!((w - 38.4).abs() < 1e-4, "{w}");
        // No gain on Relaxation: unaffected.
        assert_eq!(weight(StateKind::Type, None, &tired, &c), 24.0);
    }

    #[test]
    fn needs_at_threshold_do_not_boost() {
        let c = BehaviorConfig::default();
        let mut n = Needs::default();
        n.set(NeedKind::Hunger, 0.5);
        assert_eq!(weight(StateKind::Coffee, None, &n, &c), 6.0);
    }

    #[test]
    fn pick_walks_cumulative_weights() {
        let w = [1.0, 2.0, 3.0];
        assert_eq!(pick(&w, 0.0), Some(0));
        assert_eq!(pick(&w, 0.99), Some(0));
        assert_eq!(pick(&w, 1.0), Some(1));
        assert_eq!(pick(&w, 5.99), Some(2));
        assert_eq!(pick(&[0.0, 1.0], 0.0), Some(1));
        assert_eq!(pick(&[0.0, 0.0], 0.0), None);
    }

    #[test]
    fn candidates_follow_availability() {
        assert_eq!(
            candidate_set(Availability::default()),
            vec![StateKind::Smoke, StateKind::Freeze, StateKind::MoveRandom]
        );
        let all = Availability { peer: true, sofa: true, desk: true, dispenser: true };
        assert_eq!(candidate_set(all), StateKind::ALL.to_vec());
        let no_sofa = Availability { sofa: false, ..all };
        assert!(!candidate_set(no_sofa).contains(&StateKind::Sit));
    }

    #[test]
    fn draw_frequencies_converge_to_weight_share() {
        let c = BehaviorConfig::default();
        let needs = Needs::default();
        let mut rng = AgentRng::new(7, AgentId(0));
        let kinds = StateKind::ALL;
        let total: f64 = kinds.iter().map(|&k| weight(k, None, &needs, &c)).sum();

        let draws = 100_000;
        let mut counts = [0usize; StateKind::COUNT];
        for _ in 0..draws {
            let k = draw(&kinds, None, &needs, &c, &mut rng).unwrap();
            counts[k.index()] += 1;
        }
        for k in kinds {
            let expected = weight(k, None, &needs, &c) / total;
            let observed = counts[k.index()] as f64 / draws as f64;
            assert!((observed - expected).abs() < 0.01, "{k}: {observed} vs {expected}");
        }
    }

    #[test]
    fn draw_from_nothing_is_none() {
        let c = BehaviorConfig::default();
        let mut rng = AgentRng::new(1, AgentId(0));
        assert_eq!(draw(&[], None, &Needs::default(), &c, &mut rng), None);
    }
}

// ── Meeting board ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod meeting {
    use dw_core::{AgentId, Cell, Tick};
    use crate::{MeetingBoard, MeetingStatus};

    fn board() -> (MeetingBoard, dw_core::MeetingId) {
        let mut b = MeetingBoard::new();
        let id = b.open([AgentId(0), AgentId(1)], [Cell::new(1, 1), Cell::new(2, 1)]);
        (b, id)
    }

    #[test]
    fn second_arrival_completes_gathering() {
        let (mut b, id) = board();
        assert!(!b.arrive(id, 1));
        assert!(b.arrive(id, 0));
        b.begin_talk(id, Tick(50));
        assert_eq!(b.status(id), MeetingStatus::Talking { until: Tick(50) });
    }

    #[test]
    fn cancelled_meeting_refuses_arrivals() {
        let (mut b, id) = board();
        b.cancel(id);
        assert!(!b.arrive(id, 0));
        assert_eq!(b.status(id), MeetingStatus::Cancelled);
    }

    #[test]
    fn entry_dropped_after_both_leave() {
        let (mut b, id) = board();
        b.leave(id, 0);
        assert_eq!(b.len(), 1);
        b.leave(id, 1);
        assert!(b.is_empty());
        assert_eq!(b.status(id), MeetingStatus::Cancelled);
    }

    #[test]
    fn close_drops_immediately() {
        let (mut b, id) = board();
        b.close(id);
        assert!(b.get(id).is_none());
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use dw_agent::NeedKind;
    use dw_core::{AgentId, Animation, Cell, Direction, Facing, ObjectId};
    use dw_grid::{GridWorld, GridWorldBuilder, ObjectKind, ResourceRef};
    use crate::{BaseWeights, BehaviorConfig, StateKind};
    use super::helpers::{empty_room, sofa_room, Harness};

    const A: AgentId = AgentId(0);
    const B: AgentId = AgentId(1);

    /// Nothing decays and every free choice is Freeze, so humans stay put
    /// once a forced activity ends.
    fn freeze_only() -> BehaviorConfig {
        BehaviorConfig {
            weights: BaseWeights {
                smoke:       0.0,
                freeze:      1.0,
                move_random: 0.0,
                talk:        0.0,
                sit:         0.0,
                coffee:      0.0,
                type_weight: Some(0.0),
            },
            need_rates: dw_agent::NeedRates::none(),
            ..BehaviorConfig::default()
        }
    }

    /// 6×6 empty floor with one `kind` object at (3, 3).
    fn room_with(kind: ObjectKind) -> GridWorld {
        let mut b = GridWorldBuilder::new(6, 6);
        b.add_object(kind, Cell::new(3, 3));
        b.build().unwrap()
    }

    #[test]
    fn occupied_sofa_is_not_a_candidate() {
        let mut h = Harness::new(sofa_room(), &[Cell::new(0, 0), Cell::new(3, 3)], BehaviorConfig::default());
        assert!(!h.candidates(A).contains(&StateKind::Sit));

        let mut h = Harness::new(sofa_room(), &[Cell::new(0, 0), Cell::new(5, 5)], BehaviorConfig::default());
        assert!(h.candidates(A).contains(&StateKind::Sit));
        let claim = h.resources.try_claim(ResourceRef::Object(ObjectId(0)), B).unwrap();
        assert!(!h.candidates(A).contains(&StateKind::Sit));
        h.resources.release(claim);
    }

    #[test]
    fn forced_sit_walks_sits_and_relaxes() {
        let mut h = Harness::new(sofa_room(), &[Cell::new(0, 0)], freeze_only());
        h.agents.needs_mut(A).set(NeedKind::Relaxation, 0.3);

        assert!(h.force(A, StateKind::Sit));
        let route = h.mobility.store.get(A).route();
        assert_eq!(route.len(), 5);
        assert!(route[4].is_neighbor(Cell::new(3, 3)));
        assert_eq!(h.resources.holder(ResourceRef::Object(ObjectId(0))), Some(A));

        let sofa = Cell::new(3, 3);
        let mut sat = false;
        let finished = h.run_until(2_000, |h| {
            sat |= h.mobility.store.cell(A) == sofa;
            h.sched.kind(A) != Some(StateKind::Sit)
        });
        assert!(finished);
        assert!(sat, "never stepped onto the sofa");
        assert!(h.mobility.store.cell(A).is_neighbor(sofa));
        let relax = h.agents.needs(A).value(NeedKind::Relaxation);
        assert!((relax - 0.5).abs() < 1e-5, "{relax}");

        let log = h.sched.take_transitions();
        assert_eq!(log[0].to, StateKind::Sit);
        assert_eq!(log[1].from, Some(StateKind::Sit));
    }

    #[test]
    fn forced_type_sits_types_and_leaves() {
        let mut h = Harness::new(room_with(ObjectKind::Desk), &[Cell::new(0, 0)], freeze_only());
        h.agents.needs_mut(A).set(NeedKind::Relaxation, 0.3);
        let before = *h.agents.needs(A);

        assert!(h.force(A, StateKind::Type));
        assert_eq!(h.resources.holder(ResourceRef::Object(ObjectId(0))), Some(A));

        let desk = Cell::new(3, 3);
        let mut seated = false;
        let mut typing_ticks = 0;
        let finished = h.run_until(2_000, |h| {
            seated |= h.mobility.store.cell(A) == desk;
            if h.agents.animation[0] == Animation::Type {
                assert_eq!(h.mobility.store.cell(A), desk);
                typing_ticks += 1;
            }
            h.sched.kind(A) != Some(StateKind::Type)
        });
        assert!(finished);
        assert!(seated, "never stepped onto the desk");
        // 5 to 10 s of typing at 100 ms per tick.
        assert!((49..=101).contains(&typing_ticks), "{typing_ticks}");

        let exit = h.mobility.store.cell(A);
        assert!(exit.is_neighbor(desk));
        assert!(h.world.is_free(exit));
        assert!(h.resources.holder(ResourceRef::Object(ObjectId(0))).is_none());
        // Typing gains nothing by default.
        for need in NeedKind::ALL {
            assert_eq!(h.agents.needs(A).value(need), before.value(need));
        }
    }

    #[test]
    fn forced_coffee_raises_hunger() {
        let mut h = Harness::new(room_with(ObjectKind::Dispenser), &[Cell::new(0, 0)], freeze_only());
        h.agents.needs_mut(A).set(NeedKind::Hunger, 0.2);
        assert!(h.force(A, StateKind::Coffee));

        let dispenser = Cell::new(3, 3);
        let mut drank = false;
        let finished = h.run_until(2_000, |h| {
            let cell = h.mobility.store.cell(A);
            assert_ne!(cell, dispenser);
            if h.agents.animation[0] == Animation::Drink {
                let dir = Direction::between(cell, dispenser).unwrap();
                assert_eq!(h.agents.facing[0], Facing::toward(dir));
                drank = true;
            }
            h.sched.kind(A) != Some(StateKind::Coffee)
        });
        assert!(finished);
        assert!(drank, "never played the drink animation");
        assert!(h.mobility.store.cell(A).is_neighbor(dispenser));
        let hunger = h.agents.needs(A).value(NeedKind::Hunger);
        assert!((hunger - 0.7).abs() < 1e-5, "{hunger}");
        assert!(h.resources.holder(ResourceRef::Object(ObjectId(0))).is_none());
    }

    #[test]
    fn sit_aborts_when_sofa_taken_first() {
        let mut h = Harness::new(sofa_room(), &[Cell::new(0, 0), Cell::new(5, 5)], BehaviorConfig::default());
        assert!(h.force(A, StateKind::Sit));
        h.mobility.place(B, Cell::new(3, 3));
        h.tick();
        assert_ne!(h.sched.kind(A), Some(StateKind::Sit));
        assert_ne!(h.resources.holder(ResourceRef::Object(ObjectId(0))), Some(A));
    }

    #[test]
    fn forcing_unavailable_state_fails_then_recovers() {
        let mut h = Harness::new(empty_room(), &[Cell::new(0, 0)], BehaviorConfig::default());
        assert!(!h.force(A, StateKind::Coffee));
        assert_eq!(h.sched.kind(A), None);
        h.tick();
        assert!(h.sched.kind(A).is_some());
    }

    #[test]
    fn talk_brings_both_together_and_raises_social() {
        let mut h = Harness::new(empty_room(), &[Cell::new(0, 0), Cell::new(5, 5)], freeze_only());
        for a in [A, B] {
            h.agents.needs_mut(a).set(NeedKind::Social, 0.2);
        }

        assert!(h.force(B, StateKind::Freeze));
        assert!(h.force(A, StateKind::Talk));
        assert_eq!(h.sched.kind(B), Some(StateKind::Talk));
        assert!(h.resources.is_claimed(ResourceRef::Agent(B)));

        let done = h.run_until(1_000, |h| {
            h.agents.needs(A).value(NeedKind::Social) > 0.5 && h.agents.needs(B).value(NeedKind::Social) > 0.5
        });
        assert!(done);
        assert!(h.mobility.store.cell(A).is_neighbor(h.mobility.store.cell(B)));
        for a in [A, B] {
            assert!((h.agents.needs(a).value(NeedKind::Social) - 0.7).abs() < 1e-5);
        }
        assert!(h.sched.meetings.is_empty());
        assert!(!h.resources.is_claimed(ResourceRef::Agent(B)));
    }

    #[test]
    fn talk_ends_when_peer_is_pulled_away() {
        let mut h = Harness::new(empty_room(), &[Cell::new(0, 0), Cell::new(5, 5)], freeze_only());
        assert!(h.force(B, StateKind::Freeze));
        assert!(h.force(A, StateKind::Talk));
        assert_eq!(h.sched.meetings.len(), 1);

        assert!(h.force(B, StateKind::Freeze));
        h.tick();
        assert_ne!(h.sched.kind(A), Some(StateKind::Talk));
        assert!(!h.resources.is_claimed(ResourceRef::Agent(B)));
        assert!(h.sched.meetings.is_empty());
    }

    #[test]
    fn talk_needs_an_idle_peer() {
        let mut h = Harness::new(empty_room(), &[Cell::new(0, 0)], BehaviorConfig::default());
        assert!(!h.force(A, StateKind::Talk));
        assert!(h.sched.meetings.is_empty());
    }

    #[test]
    fn everyone_always_has_a_state() {
        let mut h = Harness::new(sofa_room(), &[Cell::new(0, 0), Cell::new(5, 0), Cell::new(0, 5)], BehaviorConfig::default());
        for _ in 0..3_000 {
            h.tick();
            for i in 0..3 {
                assert!(h.sched.kind(AgentId(i)).is_some());
            }
            // At most one claim per object and per recruited peer.
            assert!(h.resources.claim_count() <= 3);
        }
    }
}
