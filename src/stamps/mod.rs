//! Stamp library discovery.

mod scanner;

pub use scanner::{ScanError, ScanResult, StampAsset, scan_stamps};
