//! Two-person meetings shared by the `Talk` states of both participants.
//!
//! The initiator (seat 0) opens a meeting and recruits a peer (seat 1).
//! Each participant walks to its own meeting cell and reports arrival; the
//! second arrival starts the conversation for both.  Either side stopping
//! early cancels the meeting and the other side aborts on its next check.

use rustc_hash::FxHashMap;

use dw_core::{AgentId, Cell, MeetingId, Tick};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MeetingStatus {
    Gathering,
    Talking { until: Tick },
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct Meeting {
    pub participants: [AgentId; 2],
    pub cells:        [Cell; 2],
    pub arrived:      [bool; 2],
    pub status:       MeetingStatus,
    left:             [bool; 2],
}

impl Meeting {
    #[inline]
    pub fn other(seat: usize) -> usize {
        1 - seat
    }
}

#[derive(Default, Debug)]
pub struct MeetingBoard {
    meetings: FxHashMap<MeetingId, Meeting>,
    next_id:  u32,
}

impl MeetingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, participants: [AgentId; 2], cells: [Cell; 2]) -> MeetingId {
        let id = MeetingId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.meetings.insert(id, Meeting {
            participants,
            cells,
            arrived: [false; 2],
            status:  MeetingStatus::Gathering,
            left:    [false; 2],
        });
        id
    }

    pub fn get(&self, id: MeetingId) -> Option<&Meeting> {
        self.meetings.get(&id)
    }

    /// `Cancelled` for meetings that no longer exist.
    pub fn status(&self, id: MeetingId) -> MeetingStatus {
        self.meetings.get(&id).map_or(MeetingStatus::Cancelled, |m| m.status)
    }

    /// Mark `seat` as standing on its cell.  Returns `true` once both are.
    pub fn arrive(&mut self, id: MeetingId, seat: usize) -> bool {
        match self.meetings.get_mut(&id) {
            Some(m) if m.status == MeetingStatus::Gathering => {
                m.arrived[seat] = true;
                m.arrived.iter().all(|&a| a)
            }
            _ => false,
        }
    }

    pub fn begin_talk(&mut self, id: MeetingId, until: Tick) {
        if let Some(m) = self.meetings.get_mut(&id) {
            m.status = MeetingStatus::Talking { until };
        }
    }

    pub fn cancel(&mut self, id: MeetingId) {
        if let Some(m) = self.meetings.get_mut(&id) {
            m.status = MeetingStatus::Cancelled;
        }
    }

    /// `seat` is done with the meeting; the entry is dropped once both are.
    pub fn leave(&mut self, id: MeetingId, seat: usize) {
        let gone = match self.meetings.get_mut(&id) {
            Some(m) => {
                m.left[seat] = true;
                m.left.iter().all(|&l| l)
            }
            None => false,
        };
        if gone {
            self.meetings.remove(&id);
        }
    }

    /// Drop a meeting that never got its second participant.
    pub fn close(&mut self, id: MeetingId) {
        self.meetings.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}
