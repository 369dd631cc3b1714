//! Display surface consumed by the run loop. Both operations are
//! side-effecting and fire-and-forget; the core never reads anything back.
use crate::protocol::transport::can_id::CanId;

/// Contract to render decoded output on a live display.
pub trait Presenter {
    /// Update the fixed display slot for one decoded signal. Repeated calls
    /// with the same slot overwrite the same line instead of scrolling.
    fn show_signal(&mut self, slot: &'static str, text: &str);

    /// Refresh the list of identifiers seen without a known layout.
    fn show_unknown_ids(&mut self, ids: &[CanId], count: usize);
}
