//! Candidate grid generation and classification.
//!
//! Candidates start at the opening minute and step by the cadence while the whole
//! occupied interval (`duration + bufferBefore + bufferAfter`) still fits before
//! closing. Every candidate is emitted; blocked ones are marked unavailable so a
//! caller can render the full grid.

use crate::interval::{MinuteRange, Minutes};

/// Everything the generator needs, already resolved to minutes-of-day.
#[derive(Debug, Clone, Copy)]
pub struct SlotGrid<'a> {
    /// Effective working window.
    pub window: MinuteRange,
    pub break_range: Option<MinuteRange>,
    /// Ranges taken by existing bookings, buffers included. Any order.
    pub blocked: &'a [MinuteRange],
    pub cadence: u32,
    pub total_slot_minutes: Minutes,
    /// Candidates starting before this minute are unavailable. Set for today only.
    pub now_cutoff: Option<Minutes>,
}

/// A classified candidate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCandidate {
    pub range: MinuteRange,
    pub available: bool,
}

impl SlotGrid<'_> {
    /// Whether any candidate fits into the window at all.
    pub fn fits(&self) -> bool {
        self.window.start + self.total_slot_minutes <= self.window.end
    }

    fn is_blocked(&self, candidate: &MinuteRange) -> bool {
        if self.break_range.is_some_and(|b| candidate.overlaps(&b)) {
            return true;
        }
        if self.blocked.iter().any(|r| candidate.overlaps(r)) {
            return true;
        }
        self.now_cutoff.is_some_and(|cutoff| candidate.start < cutoff)
    }
}

/// Enumerate and classify the candidate grid, in ascending start order.
///
/// Returns an empty list when the service does not fit into the window.
pub fn generate_slots(grid: &SlotGrid<'_>) -> Vec<SlotCandidate> {
    if grid.cadence == 0 {
        return Vec::new();
    }
    let step = Minutes::from(grid.cadence);
    let close = grid.window.end;

    std::iter::successors(Some(grid.window.start), |m| Some(m + step))
        .take_while(|m| m + grid.total_slot_minutes <= close)
        .map(|m| {
            let range = MinuteRange::new(m, m + grid.total_slot_minutes);
            SlotCandidate {
                range,
                available: !grid.is_blocked(&range),
            }
        })
        .collect()
}
