//! Descriptor-driven payload interpretation: byte assembly helpers and the
//! decode engine that walks a frame descriptor over a raw payload.
pub mod bytes;
pub mod engine;
