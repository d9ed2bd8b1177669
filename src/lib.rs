//! Stamp pipeline library - asset tooling for the Coloring Page Maker.
//!
//! This library exposes the core functionality of the `stamps` CLI for use
//! in tests and potentially other applications.
//!
//! # Modules
//!
//! - `cli`: Argument definitions and output-format helpers
//! - `error`: Error types with user-recoverable hints
//! - `image_ops`: Thumbnails, stamp normalization, resizing
//! - `logging`: Structured logging initialization
//! - `profile`: Ulanzi device-profile generation
//! - `stamps`: Stamp library discovery
#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod image_ops;
pub mod logging;
pub mod profile;
pub mod stamps;
