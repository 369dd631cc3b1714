//! Minimal abstraction for a blocking CAN frame source. Allows the decoding
//! core to plug into various transports (raw SocketCAN socket, replayed
//! captures, test doubles).
use crate::error::TransportError;
use crate::protocol::transport::can_frame::CanFrame;

/// Contract to pull frames off the bus, one blocking call per frame.
pub trait FrameSource {
    /// Block until the next frame arrives.
    ///
    /// `Ok(None)` means the poll interval elapsed without traffic, giving the
    /// caller a chance to check its shutdown flag. An error is an
    /// unrecoverable transport failure and ends the monitoring session.
    fn recv(&mut self) -> Result<Option<CanFrame>, TransportError>;
}
