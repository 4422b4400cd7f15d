//! WebAssembly bindings for the rvm-8 CPU core.
//!
//! This module exposes the host-facing API (initialize, reset, step, raw
//! memory access) to JavaScript so a browser front end can drive the core.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Machine;
