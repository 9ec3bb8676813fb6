//! ui
//!
//! Output utilities.
//!
//! # Design
//!
//! All command output goes through [`output`] so quiet mode is honored
//! consistently. Data payloads (README content) bypass it and go to stdout
//! verbatim.

pub mod output;
