//! Folio Application Library
//!
//! Domain modules and application wiring for the folio books API.

pub mod modules;
pub mod state;
