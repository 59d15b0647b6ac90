//! Unit tests for dw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ObjectId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_is_default() {
        assert_eq!(ObjectId::default(), ObjectId::INVALID);
        assert_eq!(ObjectId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod cell {
    use crate::{Cell, Direction};

    #[test]
    fn top_points_up_the_screen() {
        assert_eq!(Cell::new(2, 3).step(Direction::Top), Cell::new(2, 2));
        assert_eq!(Cell::new(2, 3).step(Direction::Bottom), Cell::new(2, 4));
        assert_eq!(Cell::new(2, 3).step(Direction::Current), Cell::new(2, 3));
    }

    #[test]
    fn between_inverts_step() {
        let c = Cell::new(5, 5);
        for d in Direction::NEIGHBORS {
            assert_eq!(Direction::between(c, c.step(d)), Some(d));
            assert_eq!(c.step(d).step(d.opposite()), c);
        }
        assert_eq!(Direction::between(c, Cell::new(7, 5)), None);
    }

    #[test]
    fn neighbors_are_adjacent() {
        let c = Cell::new(0, 0);
        for n in c.neighbors() {
            assert!(c.is_neighbor(n));
        }
        assert!(!c.is_neighbor(Cell::new(1, 1)));
        assert_eq!(c.manhattan(Cell::new(-2, 3)), 5);
    }

    #[test]
    fn facing_flags() {
        assert!(Direction::Left.is_left() && Direction::Left.is_top());
        assert!(Direction::Bottom.is_left() && !Direction::Bottom.is_top());
        assert!(!Direction::Right.is_left() && !Direction::Right.is_top());
        assert!(!Direction::Top.is_left() && Direction::Top.is_top());
    }

    #[test]
    fn parse_direction() {
        assert_eq!(" Left ".parse::<Direction>().unwrap(), Direction::Left);
        assert!("north".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod animation {
    use crate::Animation;

    #[test]
    fn durations_follow_frame_rate() {
        assert_eq!(Animation::Walk.duration_ms(), 500);
        assert_eq!(Animation::Smoke.frame_count(), 41);
        assert_eq!(Animation::Smoke.duration_ms(), 3416);
        assert_eq!(Animation::Drink.duration_ms(), 1750);
    }

    #[test]
    fn only_sit_and_stand_play_once() {
        let once: Vec<_> = Animation::ALL.into_iter().filter(|a| !a.is_looped()).collect();
        assert_eq!(once, vec![Animation::SitDown, Animation::StandUp]);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(9)), 0);
    }

    #[test]
    fn ms_rounds_up_to_ticks() {
        let clock = SimClock::new(100);
        assert_eq!(clock.ticks_for_ms(1200), 12);
        assert_eq!(clock.ticks_for_ms(1201), 13);
        assert_eq!(clock.ticks_for_ms(0), 0);
    }

    #[test]
    fn deadline_is_strictly_later() {
        let clock = SimClock::new(100);
        assert_eq!(clock.deadline(Tick(5), 0), Tick(6));
        assert_eq!(clock.deadline(Tick(5), 250), Tick(8));
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(100);
        for _ in 0..15 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T15 (1.500s)");
    }

    #[test]
    fn config_validation() {
        let mut cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        cfg.tick_duration_ms = 0;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn per_agent_streams_are_reproducible() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        let xs: Vec<u64> = (0..8).map(|_| a.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen_range(0..u64::MAX)).collect();
        assert_eq!(xs, ys);
        let mut c = AgentRng::new(7, AgentId(4));
        let zs: Vec<u64> = (0..8).map(|_| c.gen_range(0..u64::MAX)).collect();
        assert_ne!(xs, zs);
    }

    #[test]
    fn between_ms_stays_in_range() {
        let mut rng = AgentRng::new(1, AgentId(0));
        for _ in 0..200 {
            let v = rng.between_ms(5_000, 10_000);
            assert!((5_000..=10_000).contains(&v));
        }
        assert_eq!(rng.between_ms(9, 3), 9);
    }
}
