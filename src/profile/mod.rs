//! Device-profile generation for Ulanzi stream-deck hardware.
//!
//! The profile is a tree of JSON manifests and thumbnail images packed into
//! a zip with a vendor sentinel header.
//!
//! - [`layout`]: grid/hotkey/reserved-slot configuration
//! - [`schema`]: manifest data types matching the vendor JSON
//! - [`builder`]: scratch-tree assembly pipeline
//! - [`archive`]: zip serialization and header patch

mod archive;
mod builder;
mod layout;
mod schema;

pub use archive::{PROFILE_HEADER, write_profile_archive};
pub use builder::{BuildSummary, DEFAULT_DEVICE_MODEL, DEFAULT_PROFILE_NAME, ProfileBuilder};
pub use layout::DeckLayout;
pub use schema::{
    Action, ActionParam, Controller, DEFAULT_BUTTON_ICON, DeviceRef, HOTKEY_ACTION_TYPE,
    PROFILE_FORMAT_VERSION, PageList, PageManifest, ProfileManifest, ViewState,
};
