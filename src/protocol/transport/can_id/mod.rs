//! Handling of the 29-bit arbitration identifiers carried on the bus and of
//! the transport-flag bits that ride above them in the 32-bit word read from
//! the socket.
use std::fmt;
use std::num::ParseIntError;

/// Bits of the raw 32-bit word that hold the arbitration identifier itself.
pub const ID_MASK: u32 = 0x1FFF_FFFF;

/// Extended-frame transport flag, the highest of the three flag bits.
pub const EFF_FLAG: u32 = 0x8000_0000;

// The three transport flags occupy the bits above the identifier.
const FLAGS_SHIFT: u32 = 29;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Masked 29-bit arbitration identifier.
///
/// Construction always strips the transport flags, so an unmasked value
/// cannot circulate through dispatch or the discovery tracker. Zero is a
/// legitimate identifier, not a sentinel.
pub struct CanId(u32);

impl CanId {
    /// Masks the transport flags off a raw 32-bit identifier word.
    pub const fn new(raw: u32) -> Self {
        Self(raw & ID_MASK)
    }

    /// The identifier value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Transport-flag bits of a raw identifier word (the 3 high-order bits).
    /// Kept for display only; they never take part in matching.
    pub const fn flags_of(raw: u32) -> u8 {
        (raw >> FLAGS_SHIFT) as u8
    }

    /// Parses an identifier from the hexadecimal form operators use when
    /// probing the bus, with or without a `0x` prefix.
    pub fn parse_hex(text: &str) -> Result<Self, ParseIntError> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        u32::from_str_radix(digits, 16).map(Self::new)
    }
}

impl fmt::Display for CanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}
