//! Adapter implementations for the client repository port.

pub mod memory;
pub mod postgres;
