//! Error definitions shared across library modules.
//! Each type models one failure domain: descriptor-table validation at
//! startup, and the CAN socket boundary at run time.
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// Rejections raised while validating the static descriptor table.
/// All of them are configuration errors, fatal before any frame is processed.
pub enum DescriptorError {
    /// Two descriptors claim the same arbitration identifier.
    #[error("duplicate descriptor for identifier {id:#010X}: {first} and {second}")]
    DuplicateId {
        id: u32,
        first: &'static str,
        second: &'static str,
    },
    /// A numeric field declares a width the decoder does not support.
    #[error("unsupported width {width} for field {field} of {descriptor} (expected 1 to 4)")]
    UnsupportedWidth {
        descriptor: &'static str,
        field: &'static str,
        width: usize,
    },
    /// A descriptor declares more fields than a record can carry.
    #[error("descriptor {descriptor} declares {count} fields, capacity is {max}")]
    TooManyFields {
        descriptor: &'static str,
        count: usize,
        max: usize,
    },
}

#[derive(Error, Debug)]
/// Failures at the CAN socket boundary. A broken bus binding is not expected
/// to self-heal within a monitoring session, so these terminate the process
/// after being reported.
pub enum TransportError {
    /// The raw socket could not be opened and bound to the interface.
    #[error("unable to open CAN interface {interface}: {source}")]
    Open {
        interface: String,
        #[source]
        source: std::io::Error,
    },
    /// Receiving from the bound socket failed.
    #[error("receive failed on {interface}: {source}")]
    Recv {
        interface: String,
        #[source]
        source: std::io::Error,
    },
}
