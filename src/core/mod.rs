//! Core helpers shared by every module.
//!
//! Macros live here so `#[macro_use]` on this module exports them crate-wide.

#[macro_use]
pub mod logging;
pub mod random;
