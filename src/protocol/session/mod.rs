//! Decoding session: owns the descriptor table, the unknown-identifier
//! tracker, and the operating mode, and routes every received frame.
//!
//! One session is constructed at startup and passed by reference into the
//! receive loop. There are no ambient globals; single-instance-per-process
//! semantics fall out of ownership.
use crate::core::DecodedRecord;
use crate::infra::codec::engine;
use crate::protocol::descriptors::{DescriptorTable, GENERIC};
use crate::protocol::discovery::UnknownIdTracker;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;

/// Operating mode selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Decode every frame with a known layout, track the rest.
    Monitor,
    /// Keep only one identifier and decode it with the generic byte layout.
    Single(CanId),
}

/// Outcome of routing one frame. Dispatch never fails: an identifier with
/// no layout is routine input, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The frame matched a layout and produced a record for display.
    Decoded(DecodedRecord),
    /// No layout for this identifier; it went to the discovery tracker.
    Unknown { id: CanId, newly_tracked: bool },
    /// Discarded by the single-target filter before any decoding.
    Filtered,
}

/// Process-wide decoding state.
#[derive(Debug)]
pub struct DecodeSession {
    table: DescriptorTable,
    tracker: UnknownIdTracker,
    mode: Mode,
}

impl DecodeSession {
    /// Build a session around a validated table.
    pub fn new(table: DescriptorTable, mode: Mode) -> Self {
        Self {
            table,
            tracker: UnknownIdTracker::new(),
            mode,
        }
    }

    /// Route one frame.
    ///
    /// The frame's identifier is already masked by construction, so matching
    /// here is plain equality. In single-target mode everything but the
    /// target is discarded before any decoding or tracking happens; the
    /// target itself is decoded with the generic layout because its semantic
    /// layout is unknown by construction.
    pub fn dispatch(&mut self, frame: &CanFrame) -> Dispatch {
        if let Mode::Single(target) = self.mode {
            if frame.id != target {
                return Dispatch::Filtered;
            }
            return Dispatch::Decoded(engine::decode(&GENERIC, frame.id, frame.payload()));
        }

        match self.table.lookup(frame.id) {
            Some(descriptor) => {
                Dispatch::Decoded(engine::decode(descriptor, frame.id, frame.payload()))
            }
            None => Dispatch::Unknown {
                id: frame.id,
                newly_tracked: self.tracker.record(frame.id),
            },
        }
    }

    /// Identifiers collected by the discovery tracker, first-seen order.
    pub fn unknown_ids(&self) -> &[CanId] {
        self.tracker.snapshot()
    }

    /// Number of identifiers the discovery tracker holds.
    pub fn unknown_count(&self) -> usize {
        self.tracker.len()
    }

    /// The operating mode the session was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The validated descriptor table.
    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
