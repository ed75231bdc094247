//! Standard library module - runtime library interface

pub mod runtime;

pub use runtime::{Capability, RuntimeLibrary, RuntimeRegistry};
