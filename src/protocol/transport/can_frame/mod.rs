//! In-memory representation of a classic CAN frame as read from the bus.
use crate::protocol::transport::can_id::CanId;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raw broadcast frame handed to dispatch. Owned by the dispatch call for
/// the duration of one decode; nothing retains it afterwards.
pub struct CanFrame {
    /// Masked 29-bit arbitration identifier.
    pub id: CanId,
    /// Transport-flag bits that rode above the identifier. Display only.
    pub flags: u8,
    /// Payload buffer. Classic CAN carries at most eight bytes.
    pub data: [u8; 8],
    /// Number of valid payload bytes (0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Build a frame from a raw identifier word and the received payload.
    pub fn new(raw_id: u32, payload: &[u8]) -> Self {
        let len = payload.len().min(8);
        let mut data = [0u8; 8];
        data[..len].copy_from_slice(&payload[..len]);
        Self {
            id: CanId::new(raw_id),
            flags: CanId::flags_of(raw_id),
            data,
            len,
        }
    }

    /// The valid payload bytes. The decoder must never look past this slice.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}
