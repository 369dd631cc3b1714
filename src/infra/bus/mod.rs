//! SocketCAN implementation of the frame source, bound to one Linux CAN
//! interface for the lifetime of the monitoring session.
use crate::error::TransportError;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::EFF_FLAG;
use crate::protocol::transport::traits::frame_source::FrameSource;

use embedded_can::Id;
use socketcan::{CanFrame as SockFrame, CanSocket, EmbeddedFrame, Socket, SocketOptions};
use std::io;
use std::time::Duration;
use tracing::{debug, trace};

/// Interval after which a blocking read returns empty so the caller can
/// observe its shutdown flag between receive calls.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Frame source backed by a raw SocketCAN socket.
pub struct SocketCanSource {
    socket: CanSocket,
    interface: String,
}

impl SocketCanSource {
    /// Open and bind the raw socket.
    ///
    /// Frames sent by this process are not echoed back, matching a
    /// listen-only monitoring session, and reads time out at the poll
    /// interval instead of blocking forever.
    pub fn open(interface: &str) -> Result<Self, TransportError> {
        let open_err = |source: io::Error| TransportError::Open {
            interface: interface.to_string(),
            source,
        };

        let socket = CanSocket::open(interface).map_err(open_err)?;
        socket.set_recv_own_msgs(false).map_err(open_err)?;
        socket.set_read_timeout(POLL_INTERVAL).map_err(open_err)?;

        debug!(interface, "raw CAN socket bound");
        Ok(Self {
            socket,
            interface: interface.to_string(),
        })
    }

    /// Rebuild the raw 32-bit identifier word the kernel delivered, so the
    /// extended-frame flag survives into the display path.
    fn raw_id_word(id: Id) -> u32 {
        match id {
            Id::Extended(id) => id.as_raw() | EFF_FLAG,
            Id::Standard(id) => u32::from(id.as_raw()),
        }
    }
}

impl FrameSource for SocketCanSource {
    fn recv(&mut self) -> Result<Option<CanFrame>, TransportError> {
        match self.socket.read_frame() {
            Ok(SockFrame::Data(frame)) => Ok(Some(CanFrame::new(
                Self::raw_id_word(frame.id()),
                frame.data(),
            ))),
            Ok(_) => {
                // Remote and error frames carry no payload semantics here.
                trace!(interface = %self.interface, "skipping non-data frame");
                Ok(None)
            }
            Err(err) if is_poll_timeout(&err) => Ok(None),
            Err(source) => Err(TransportError::Recv {
                interface: self.interface.clone(),
                source,
            }),
        }
    }
}

fn is_poll_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
