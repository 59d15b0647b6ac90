//! Unit tests for dw-mobility.

#[cfg(test)]
mod helpers {
    use dw_core::Cell;
    use dw_grid::{BfsPathFinder, GridWorld, GridWorldBuilder, ObjectKind};
    use crate::MobilityEngine;

    pub fn room() -> GridWorld {
        let mut b = GridWorldBuilder::new(6, 6);
        b.add_object(ObjectKind::Sofa, Cell::new(3, 3));
        b.add_wall(Cell::new(1, 0));
        b.build().unwrap()
    }

    pub fn engine(agents: usize) -> MobilityEngine<BfsPathFinder> {
        MobilityEngine::new(BfsPathFinder, agents, 12)
    }
}

#[cfg(test)]
mod engine {
    use dw_core::{AgentId, Cell, Direction, Tick};
    use dw_grid::DEFAULT_ENTRIES;
    use crate::{MobilityError, RouteOutcome};
    use super::helpers::{engine, room};

    const A: AgentId = AgentId(0);

    #[test]
    fn route_commits_first_step_immediately() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        let out = m.route_to(A, Cell::new(0, 3), &w, Tick(0)).unwrap();
        assert_eq!(out, RouteOutcome::Walking { steps: 3 });

        let s = m.store.get(A);
        assert_eq!(s.cell, Cell::new(0, 1));
        assert_eq!(s.next_step(), Some(Direction::Bottom));
        assert_eq!(s.route(), vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]);

        let cmds = m.take_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].arrives, Tick(12));
        assert!(m.take_commands().is_empty());
    }

    #[test]
    fn steps_are_strictly_sequential() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        m.route_to(A, Cell::new(0, 3), &w, Tick(0)).unwrap();

        assert!(m.due_arrivals(Tick(11)).is_empty());
        assert_eq!(m.due_arrivals(Tick(12)), vec![A]);
        assert!(!m.complete_transit(A, Tick(12)).unwrap());
        assert!(!m.complete_transit(A, Tick(24)).unwrap());
        assert!(m.complete_transit(A, Tick(36)).unwrap());
        assert!(m.store.is_idle(A));
        assert_eq!(m.store.cell(A), Cell::new(0, 3));
        assert!(matches!(m.complete_transit(A, Tick(40)), Err(MobilityError::NotInTransit(_))));
        assert_eq!(m.take_commands().len(), 3);
    }

    #[test]
    fn new_route_while_moving_waits_for_current_step() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        m.route_to(A, Cell::new(0, 3), &w, Tick(0)).unwrap();
        // Re-route from the logical cell (0, 1) while the first step animates.
        m.route_to(A, Cell::new(2, 1), &w, Tick(3)).unwrap();
        assert_eq!(m.take_commands().len(), 1);
        assert_eq!(m.store.get(A).route(), vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)]);
    }

    #[test]
    fn closest_route_ends_next_to_object() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        let out = m.route_to_closest(A, Cell::new(3, 3), &DEFAULT_ENTRIES, &w, Tick(0)).unwrap();
        assert_eq!(out, RouteOutcome::Walking { steps: 5 });
        assert!(m.store.get(A).destination().is_neighbor(Cell::new(3, 3)));
    }

    #[test]
    fn unreachable_leaves_state_untouched() {
        let mut b = dw_grid::GridWorldBuilder::new(3, 3);
        b.add_wall(Cell::new(1, 0));
        b.add_wall(Cell::new(1, 1));
        b.add_wall(Cell::new(1, 2));
        let w = b.build().unwrap();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        assert_eq!(m.route_to(A, Cell::new(2, 2), &w, Tick(0)).unwrap(), RouteOutcome::Unreachable);
        assert!(m.store.is_idle(A));
        assert!(m.take_commands().is_empty());
    }

    #[test]
    fn step_onto_furniture_and_leave() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(3, 2));
        let cmd = m.step_onto(A, Cell::new(3, 3), Tick(0)).unwrap();
        assert_eq!(cmd.direction, Direction::Bottom);
        assert!(matches!(
            m.step_onto(A, Cell::new(3, 4), Tick(1)),
            Err(MobilityError::AlreadyInTransit(_))
        ));
        assert!(m.complete_transit(A, Tick(12)).unwrap());

        let out = m.route_to(A, Cell::new(3, 5), &w, Tick(12)).unwrap();
        assert_eq!(out, RouteOutcome::Walking { steps: 2 });
    }

    #[test]
    fn step_onto_far_cell_is_rejected() {
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        assert!(matches!(
            m.step_onto(A, Cell::new(2, 0), Tick(0)),
            Err(MobilityError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn unplaced_agent_cannot_route() {
        let w = room();
        let mut m = engine(2);
        m.place(A, Cell::new(0, 0));
        assert!(matches!(
            m.route_to(AgentId(1), Cell::new(0, 0), &w, Tick(0)),
            Err(MobilityError::NotPlaced(_))
        ));
        assert_eq!(m.store.other_cells(A), Vec::<Cell>::new());
    }

    #[test]
    fn progress_interpolates() {
        let w = room();
        let mut m = engine(1);
        m.place(A, Cell::new(0, 0));
        m.route_to(A, Cell::new(0, 1), &w, Tick(0)).unwrap();
        let s = m.store.get(A);
        assert_eq!(s.progress(Tick(6)), 0.5);
        assert_eq!(s.progress(Tick(30)), 1.0);
    }
}
