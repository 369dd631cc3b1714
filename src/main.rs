//! `canscout` binary: bind a CAN interface, load the descriptor table, and
//! run the blocking receive-decode-present loop until interrupted.
//!
//! Two modes, matching how a bus is probed in practice:
//!
//! ```bash
//! canscout can0                # decode known layouts, list unknown ids
//! canscout can0 --id 12F85150  # isolate one id, show its raw bytes
//! ```
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use canscout::core::DecodedRecord;
use canscout::error::TransportError;
use canscout::infra::bus::SocketCanSource;
use canscout::infra::term::{
    self, format_record, format_target_header, TermPresenter,
};
use canscout::protocol::descriptors::DescriptorTable;
use canscout::protocol::session::{DecodeSession, Dispatch, Mode};
use canscout::protocol::transport::can_frame::CanFrame;
use canscout::protocol::transport::can_id::CanId;
use canscout::protocol::transport::traits::frame_source::FrameSource;
use canscout::protocol::transport::traits::presenter::Presenter;

// Display slots used by single-target mode; monitor mode takes its slots
// from the descriptor table instead.
const TARGET_SLOTS: [&str; 4] = ["target", "hex", "dec", "ascii"];

#[derive(Parser)]
#[command(name = "canscout")]
#[command(about = "Live decoder for reverse-engineering an automotive CAN bus")]
#[command(version)]
struct Cli {
    /// CAN interface to bind, e.g. can0.
    interface: String,

    /// Restrict the session to one arbitration identifier (hex, as probed)
    /// and display its payload with the generic byte layout.
    #[arg(long, value_name = "HEX_ID")]
    id: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // The screen belongs to the live display; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mode = match &cli.id {
        Some(text) => Mode::Single(
            CanId::parse_hex(text)
                .with_context(|| format!("invalid arbitration identifier {text:?}"))?,
        ),
        None => Mode::Monitor,
    };

    // Configuration problems in the table are fatal before any frame.
    let table = DescriptorTable::standard().context("descriptor table rejected")?;

    let mut source = SocketCanSource::open(&cli.interface)?;
    info!(interface = %cli.interface, ?mode, "listening");

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("unable to install the ctrl-c handler")?;
    }

    let slots: Vec<&'static str> = match mode {
        Mode::Monitor => table.slots().collect(),
        Mode::Single(_) => TARGET_SLOTS.to_vec(),
    };

    let mut session = DecodeSession::new(table, mode);
    let mut presenter = TermPresenter::new(slots).context("terminal unavailable")?;

    let outcome = run(&mut source, &mut session, &mut presenter, &running);

    // Restore the terminal before any error reaches stderr.
    drop(presenter);
    info!("session ended");
    Ok(outcome?)
}

/// The receive-decode-present loop. Single-threaded and blocking: the frame
/// source is the only suspension point, and the shutdown flag is checked
/// between receive calls.
fn run<S, P>(
    source: &mut S,
    session: &mut DecodeSession,
    presenter: &mut P,
    running: &AtomicBool,
) -> Result<(), TransportError>
where
    S: FrameSource,
    P: Presenter,
{
    while running.load(Ordering::SeqCst) {
        let frame = match source.recv()? {
            Some(frame) => frame,
            None => continue,
        };

        match session.dispatch(&frame) {
            Dispatch::Decoded(record) => match session.mode() {
                Mode::Monitor => presenter.show_signal(record.slot, &format_record(&record)),
                Mode::Single(_) => show_target(presenter, &frame, &record),
            },
            Dispatch::Unknown {
                newly_tracked: true,
                ..
            } => presenter.show_unknown_ids(session.unknown_ids(), session.unknown_count()),
            Dispatch::Unknown { .. } | Dispatch::Filtered => {}
        }
    }
    Ok(())
}

/// Single-target rendering: identifier header plus the hex, decimal, and
/// ASCII readings of the payload bytes.
fn show_target<P: Presenter>(presenter: &mut P, frame: &CanFrame, record: &DecodedRecord) {
    presenter.show_signal("target", &format_target_header(frame));
    presenter.show_signal("hex", &term::format_hex_row(record));
    presenter.show_signal("dec", &term::format_dec_row(record));
    presenter.show_signal("ascii", &term::format_ascii_row(record));
}
