//! Fixed-slot terminal presenter and the record formatting that feeds it.
//!
//! The live display mirrors a status screen: one line per known signal,
//! assigned from descriptor-table order at startup, with the list of
//! unmapped identifiers pinned below. Rendering uses plain ANSI cursor
//! addressing; the decoding core never touches the terminal.
use crate::core::{DecodedRecord, FieldValue};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::traits::presenter::Presenter;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};

//==================================================================================PRESENTER

/// ANSI terminal presenter with one fixed row per display slot.
pub struct TermPresenter {
    out: io::Stdout,
    rows: HashMap<&'static str, usize>,
    unknown_row: usize,
}

impl TermPresenter {
    /// Allocate one row per slot, preserving the given order, and take over
    /// the screen (alternate buffer, cursor hidden).
    pub fn new<I>(slots: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = &'static str>,
    {
        let rows: HashMap<&'static str, usize> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| (slot, index + 1))
            .collect();
        let unknown_row = rows.len() + 2;

        let mut out = io::stdout();
        write!(out, "\x1b[?1049h\x1b[2J\x1b[H\x1b[?25l")?;
        out.flush()?;

        Ok(Self {
            out,
            rows,
            unknown_row,
        })
    }

    /// Row assigned to a slot, if the slot was registered.
    pub fn row_of(&self, slot: &str) -> Option<usize> {
        self.rows.get(slot).copied()
    }
}

impl Presenter for TermPresenter {
    fn show_signal(&mut self, slot: &'static str, text: &str) {
        // Both operations are fire-and-forget: a write failure on a live
        // terminal is not worth stopping the bus loop for.
        if let Some(&row) = self.rows.get(slot) {
            let _ = write!(self.out, "\x1b[{row};1H\x1b[2K{text}");
            let _ = self.out.flush();
        }
    }

    fn show_unknown_ids(&mut self, ids: &[CanId], count: usize) {
        let row = self.unknown_row;
        let mut line = String::from("unk:");
        for id in ids {
            let _ = write!(line, " {id}");
        }
        let _ = write!(line, " ({count})");

        let _ = write!(self.out, "\x1b[{row};1H\x1b[2K{line}");
        let _ = self.out.flush();
    }
}

impl Drop for TermPresenter {
    fn drop(&mut self) {
        // Leave the operator's terminal the way we found it.
        let _ = write!(self.out, "\x1b[?25h\x1b[?1049l");
        let _ = self.out.flush();
    }
}

//==================================================================================FORMATTING

/// Render one decoded record as its display line: the slot name followed by
/// `name=value` pairs in declaration order. Absent fields show as `--`.
pub fn format_record(record: &DecodedRecord) -> String {
    let mut line = format!("{:<15}", record.slot);
    for field in record.fields() {
        match field.value {
            Some(value) => {
                let _ = write!(line, " {}={}", field.name, format_value(value));
            }
            None => {
                let _ = write!(line, " {}=--", field.name);
            }
        }
    }
    line
}

fn format_value(value: FieldValue) -> String {
    match value {
        FieldValue::U8(v) => format!("{v:02X}"),
        FieldValue::U16(v) => format!("{v:04X}"),
        FieldValue::U32(v) => format!("{v:08X}"),
        FieldValue::I8(v) => v.to_string(),
        FieldValue::I16(v) => v.to_string(),
        FieldValue::I32(v) => v.to_string(),
        FieldValue::Bool(v) => String::from(if v { "on" } else { "off" }),
        // Raw triple first, combined candidate in parentheses: neither
        // reading has been confirmed as the physical quantity yet.
        FieldValue::Triple { bytes, value } => format!(
            "{:02X}{:02X}{:02X} ({value})",
            bytes[0], bytes[1], bytes[2]
        ),
    }
}

/// Header line for single-target mode: the masked identifier and the
/// transport flags that rode above it.
pub fn format_target_header(frame: &CanFrame) -> String {
    format!("id: {}  flags: {:#05b}  len: {}", frame.id, frame.flags, frame.len)
}

/// Hex row of the generic layout.
pub fn format_hex_row(record: &DecodedRecord) -> String {
    format_generic_row(record, |byte| format!(" {byte:02X} "), "  . ")
}

/// Decimal row of the generic layout.
pub fn format_dec_row(record: &DecodedRecord) -> String {
    format_generic_row(record, |byte| format!("{byte:03} "), "  . ")
}

/// Printable-ASCII row of the generic layout; everything else shows as a dot.
pub fn format_ascii_row(record: &DecodedRecord) -> String {
    format_generic_row(
        record,
        |byte| {
            let ch = if (33..127).contains(&byte) {
                byte as char
            } else {
                '.'
            };
            format!("  {ch} ")
        },
        "  . ",
    )
}

fn format_generic_row<F>(record: &DecodedRecord, render: F, absent: &str) -> String
where
    F: Fn(u8) -> String,
{
    let mut line = String::new();
    for field in record.fields() {
        match field.value {
            Some(FieldValue::U8(byte)) => line.push_str(&render(byte)),
            _ => line.push_str(absent),
        }
    }
    line
}
