//! Transport-level primitives: frame and identifier representations plus the
//! abstraction traits for the bus and the display surface.
pub mod can_frame;
pub mod can_id;
pub mod traits;
