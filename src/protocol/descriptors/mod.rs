//! Byte layouts recovered for the probed vehicle, one descriptor per
//! arbitration identifier, plus the generic layout used in single-target
//! mode and the validating table wrapper.
//!
//! Adding a newly mapped identifier is a data change here, not a code
//! change in the engine.
use crate::core::{ByteOrder, FieldKind, FieldSpec, FrameDescriptor, MAX_RECORD_FIELDS};
use crate::error::DescriptorError;
use crate::protocol::transport::can_id::CanId;

//==================================================================================IDENTIFIERS

/// Gear selector.
pub const SHIFTER: u32 = 0x12F8_5150;
/// Driver-side door switches.
pub const DRIVER_DOORS: u32 = 0x12F8_3010;
/// Passenger-side door switches.
pub const PASSENGER_DOORS: u32 = 0x12F8_4010;
/// Trunk latch.
pub const TRUNK: u32 = 0x12F8_4310;
/// Turn-signal stalk.
pub const TURN_SIGNALS: u32 = 0x0AF8_7010;
/// Per-wheel speed bytes and rotation counter.
pub const WHEELS: u32 = 0x0EF8_6350;
/// Brake pedal switch.
pub const BRAKE_PEDAL: u32 = 0x12F8_1010;
/// Body-module frame whose role is still unmapped.
pub const UNK_3110: u32 = 0x12F8_3110;
/// Engine-speed candidate frame.
pub const ENGINE: u32 = 0x12F8_5050;

//==================================================================================LAYOUTS

// Shorthand for the common single unsigned byte.
const BYTE: FieldKind = FieldKind::Number {
    width: 1,
    signed: false,
    order: ByteOrder::LsbFirst,
};

const fn byte(name: &'static str, offset: usize) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        kind: BYTE,
    }
}

const fn flag(name: &'static str, offset: usize, mask: u8) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        kind: FieldKind::Flag { mask },
    }
}

/// Layouts recovered so far. Field names follow what the signal is believed
/// to be; `unk*` fields are bytes kept on screen to watch for movement.
pub static FRAME_DESCRIPTORS: &[FrameDescriptor] = &[
    FrameDescriptor {
        id: SHIFTER,
        name: "shifter",
        fields: &[
            // Transmitted high byte first as far as the probing showed;
            // still unconfirmed against a second vehicle.
            FieldSpec {
                name: "gear",
                offset: 0,
                kind: FieldKind::Number {
                    width: 2,
                    signed: false,
                    order: ByteOrder::MsbFirst,
                },
            },
            byte("unk1", 2),
            byte("unk2", 3),
            byte("unk3", 4),
            byte("unk4", 5),
        ],
    },
    FrameDescriptor {
        id: DRIVER_DOORS,
        name: "driver_doors",
        fields: &[
            flag("front", 0, 0x80),
            flag("rear", 0, 0x20),
            byte("state", 0),
        ],
    },
    FrameDescriptor {
        id: PASSENGER_DOORS,
        name: "passenger_doors",
        fields: &[
            flag("front", 0, 0x40),
            flag("rear", 0, 0x10),
            byte("state", 0),
        ],
    },
    FrameDescriptor {
        id: TRUNK,
        name: "trunk",
        fields: &[flag("open", 0, 0x80), byte("state", 0)],
    },
    FrameDescriptor {
        id: TURN_SIGNALS,
        name: "turn_signals",
        fields: &[flag("left", 1, 0x80), flag("right", 1, 0x40)],
    },
    FrameDescriptor {
        id: WHEELS,
        name: "wheels",
        fields: &[
            byte("wheel1", 0),
            byte("wheel2", 1),
            byte("wheel3", 2),
            byte("wheel4", 3),
            // Rolls over fast enough to be a rotation counter; byte order
            // carries the same caveat as the gear field.
            FieldSpec {
                name: "counter",
                offset: 6,
                kind: FieldKind::Number {
                    width: 2,
                    signed: false,
                    order: ByteOrder::MsbFirst,
                },
            },
        ],
    },
    FrameDescriptor {
        id: BRAKE_PEDAL,
        name: "brake_pedal",
        fields: &[
            flag("engaged", 0, 0x10),
            byte("state", 0),
            byte("unk2", 2),
            byte("unk3", 4),
        ],
    },
    FrameDescriptor {
        id: UNK_3110,
        name: "unk_3110",
        fields: &[byte("b0", 0)],
    },
    FrameDescriptor {
        id: ENGINE,
        name: "engine",
        fields: &[
            // Three-byte value that tracks engine speed. Whether the raw
            // triple or the combined number is the real quantity is an open
            // question, so both readings are surfaced.
            FieldSpec {
                name: "rpm",
                offset: 0,
                kind: FieldKind::Triple,
            },
            byte("unk1", 3),
            byte("unk2", 4),
            byte("unk3", 5),
        ],
    },
];

/// Fallback layout for single-target mode: eight independent unsigned bytes,
/// no multi-byte reassembly. Used when the target's semantic layout is, by
/// construction, unknown.
pub static GENERIC: FrameDescriptor = FrameDescriptor {
    id: 0,
    name: "generic",
    fields: &[
        byte("b0", 0),
        byte("b1", 1),
        byte("b2", 2),
        byte("b3", 3),
        byte("b4", 4),
        byte("b5", 5),
        byte("b6", 6),
        byte("b7", 7),
    ],
};

//==================================================================================TABLE

#[derive(Debug)]
/// Validated lookup table over a static descriptor slice. Read-only after
/// construction; lookup is by exact masked-identifier equality.
pub struct DescriptorTable {
    descriptors: &'static [FrameDescriptor],
}

impl DescriptorTable {
    /// Validate and wrap a descriptor slice.
    ///
    /// Duplicate identifiers, unsupported numeric widths, and oversized
    /// field lists are configuration errors. They fail startup before any
    /// frame is processed and are never per-frame runtime failures.
    pub fn new(descriptors: &'static [FrameDescriptor]) -> Result<Self, DescriptorError> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.fields.len() > MAX_RECORD_FIELDS {
                return Err(DescriptorError::TooManyFields {
                    descriptor: descriptor.name,
                    count: descriptor.fields.len(),
                    max: MAX_RECORD_FIELDS,
                });
            }

            for field in descriptor.fields {
                if let FieldKind::Number { width, .. } = field.kind {
                    if !(1..=4).contains(&width) {
                        return Err(DescriptorError::UnsupportedWidth {
                            descriptor: descriptor.name,
                            field: field.name,
                            width,
                        });
                    }
                }
            }

            if let Some(first) = descriptors[..index].iter().find(|d| d.id == descriptor.id) {
                return Err(DescriptorError::DuplicateId {
                    id: descriptor.id,
                    first: first.name,
                    second: descriptor.name,
                });
            }
        }

        Ok(Self { descriptors })
    }

    /// The standard table for the probed vehicle.
    pub fn standard() -> Result<Self, DescriptorError> {
        Self::new(FRAME_DESCRIPTORS)
    }

    /// Exact-match lookup by masked identifier.
    pub fn lookup(&self, id: CanId) -> Option<&'static FrameDescriptor> {
        self.descriptors.iter().find(|d| d.id == id.value())
    }

    /// Display slots in table order, for presenter row assignment.
    pub fn slots(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.name)
    }

    /// Number of descriptors in the table.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the table holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
