//! Profile assembly: from a stamp library to a `.ulanziDeckProfile`.
//!
//! One linear pass: discover stamps, hash their bytes, render thumbnails
//! into a scratch tree, construct the button actions, write the manifests,
//! serialize the tree into the final archive. The scratch tree lives in a
//! [`tempfile::TempDir`] owned exclusively by the build and removed on
//! every exit path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{Result, StampError};
use crate::image_ops::{
    PROFILE_ICON_SIZE, ScaledThumbnailer, Thumbnailer, blank_icon, content_hash, thumbnail_or_copy,
};
use crate::stamps::{ScanError, scan_stamps};

use super::archive::write_profile_archive;
use super::layout::DeckLayout;
use super::schema::{Action, PageManifest, ProfileManifest};

/// Default profile display name.
pub const DEFAULT_PROFILE_NAME: &str = "Coloring Page Maker";

/// Default target device variant.
pub const DEFAULT_DEVICE_MODEL: &str = "D200H";

/// Outcome of a successful build, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    /// Path of the written archive.
    pub output: PathBuf,
    /// Number of button actions placed.
    pub placed: usize,
    /// Number of stamps discovered in the library.
    pub discovered: usize,
    /// Library indices whose image file was absent.
    pub missing: Vec<u32>,
    /// Discovered stamps dropped because the layout ran out of buttons or
    /// hotkey letters.
    pub dropped: usize,
    /// Last hotkey letter assigned, if any action was placed.
    pub last_hotkey_letter: Option<char>,
}

/// Builds a `.ulanziDeckProfile` archive from a directory of stamp images.
pub struct ProfileBuilder {
    stamps_dir: PathBuf,
    layout: DeckLayout,
    device_model: String,
    profile_name: String,
    thumbnailer: Box<dyn Thumbnailer>,
}

impl ProfileBuilder {
    /// Creates a builder over the given stamp library with the standard
    /// layout, device model, and scaled thumbnailing.
    pub fn new(stamps_dir: impl Into<PathBuf>) -> Self {
        Self {
            stamps_dir: stamps_dir.into(),
            layout: DeckLayout::default(),
            device_model: DEFAULT_DEVICE_MODEL.to_string(),
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            thumbnailer: Box::new(ScaledThumbnailer),
        }
    }

    /// Replaces the deck layout.
    pub fn with_layout(mut self, layout: DeckLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the target device model (opaque, passed through unvalidated).
    pub fn with_device_model(mut self, model: impl Into<String>) -> Self {
        self.device_model = model.into();
        self
    }

    /// Sets the profile display name.
    pub fn with_profile_name(mut self, name: impl Into<String>) -> Self {
        self.profile_name = name.into();
        self
    }

    /// Replaces the thumbnail strategy.
    pub fn with_thumbnailer(mut self, thumbnailer: Box<dyn Thumbnailer>) -> Self {
        self.thumbnailer = thumbnailer;
        self
    }

    /// Runs the build and writes the archive to `output`.
    ///
    /// Fails if the library contains no discoverable stamps; a partial
    /// library builds normally with the missing indices recorded in the
    /// summary. The destination file is only created once the archive is
    /// fully assembled.
    #[instrument(skip_all, fields(stamps_dir = %self.stamps_dir.display(), output = %output.display()))]
    pub fn build(&self, output: &Path) -> Result<BuildSummary> {
        let scan = scan_stamps(
            &self.stamps_dir,
            self.layout.stamp_count,
            &self.layout.reserved_indices,
        )
        .map_err(|e| match e {
            ScanError::DirectoryNotFound(p) | ScanError::NotADirectory(p) => {
                StampError::StampsDirNotFound {
                    path: p.display().to_string(),
                }
            }
            ScanError::MetadataError(_, io) => StampError::Io(io),
        })?;

        if !scan.has_stamps() {
            return Err(StampError::NoStampsFound {
                dir: self.stamps_dir.display().to_string(),
            });
        }

        // Scratch tree, removed on every exit path
        let scratch = tempfile::TempDir::new()?;

        let profile_uuid = Uuid::new_v4().to_string();
        let page_uuid = Uuid::new_v4().to_string();

        let profile_dir = scratch.path().join(format!("{profile_uuid}.ulanziProfile"));
        let page_dir = profile_dir.join("Profiles").join(&page_uuid);
        let images_dir = page_dir.join("Images");
        std::fs::create_dir_all(&images_dir)?;

        // Root manifest and cover icon
        let manifest =
            ProfileManifest::single_page(&self.device_model, &self.profile_name, &page_uuid);
        std::fs::write(
            profile_dir.join("manifest.json"),
            serde_json::to_string(&manifest).map_err(|e| StampError::Other(e.to_string()))?,
        )?;
        blank_icon(PROFILE_ICON_SIZE)
            .save(profile_dir.join("icon.png"))
            .map_err(|e| StampError::ImageProcessing(e.to_string()))?;

        // Place one action per stamp until buttons or letters run out
        let capacity = self.layout.capacity();
        let mut actions: BTreeMap<String, Action> = BTreeMap::new();
        let mut last_hotkey_letter = None;

        for (slot, stamp) in scan.stamps.iter().take(capacity).enumerate() {
            let bytes = std::fs::read(&stamp.path)?;
            let hash = content_hash(&bytes);
            let icon_filename = format!("{hash}.png");

            thumbnail_or_copy(
                self.thumbnailer.as_ref(),
                &stamp.path,
                &images_dir.join(&icon_filename),
                self.layout.thumbnail_size,
            )?;

            let hotkey = self
                .layout
                .hotkey(slot)
                .ok_or_else(|| StampError::Other("hotkey alphabet exhausted".to_string()))?;
            last_hotkey_letter = hotkey.chars().last();

            let position_key = self.layout.position_key(slot);
            debug!(
                index = stamp.index,
                position = %position_key,
                hotkey = %hotkey,
                icon = %icon_filename,
                "Placed stamp action"
            );

            actions.insert(
                position_key,
                Action::hotkey(stamp.index, &icon_filename, &hotkey),
            );
        }

        let placed = actions.len();
        let dropped = scan.stamps.len() - placed;
        if dropped > 0 {
            // Documented policy: excess stamps are dropped, not an error
            warn!(
                dropped,
                capacity, "More stamps than placeable buttons, excess not included"
            );
        }

        let page = PageManifest::with_keypad("Main Page", actions);
        std::fs::write(
            page_dir.join("manifest.json"),
            serde_json::to_string(&page).map_err(|e| StampError::Other(e.to_string()))?,
        )?;

        let output = write_profile_archive(scratch.path(), output)?;

        info!(
            placed,
            dropped,
            missing = scan.missing.len(),
            output = %output.display(),
            "Profile build complete"
        );

        Ok(BuildSummary {
            output,
            placed,
            discovered: scan.stamps.len(),
            missing: scan.missing,
            dropped,
            last_hotkey_letter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_stamp(dir: &Path, index: u32) {
        let shade = u8::try_from(index * 10).unwrap_or(255);
        let img = RgbaImage::from_pixel(64, 64, Rgba([shade, 30, 140, 255]));
        img.save(dir.join(format!("{index}.png"))).unwrap();
    }

    #[test]
    fn test_build_empty_library_fails_without_output() {
        let stamps = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("profile.ulanziDeckProfile");

        let result = ProfileBuilder::new(stamps.path()).build(&output);

        assert!(matches!(result, Err(StampError::NoStampsFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_build_missing_directory_fails() {
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("profile.ulanziDeckProfile");

        let result = ProfileBuilder::new("/nonexistent/stamps").build(&output);

        assert!(matches!(result, Err(StampError::StampsDirNotFound { .. })));
    }

    #[test]
    fn test_build_counts_and_hotkeys() {
        let stamps = TempDir::new().unwrap();
        for i in 1..=3 {
            write_stamp(stamps.path(), i);
        }
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("profile.ulanziDeckProfile");

        let summary = ProfileBuilder::new(stamps.path()).build(&output).unwrap();

        assert_eq!(summary.placed, 3);
        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.dropped, 0);
        assert_eq!(summary.last_hotkey_letter, Some('C'));
        assert!(output.exists());
    }

    #[test]
    fn test_build_truncates_beyond_capacity() {
        let stamps = TempDir::new().unwrap();
        for i in 1..=16 {
            write_stamp(stamps.path(), i);
        }
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("profile.ulanziDeckProfile");

        // Layout with no reserved slot and more stamps than letters
        let layout = DeckLayout {
            stamp_count: 16,
            reserved_indices: vec![],
            ..DeckLayout::default()
        };
        let summary = ProfileBuilder::new(stamps.path())
            .with_layout(layout)
            .build(&output)
            .unwrap();

        assert_eq!(summary.discovered, 16);
        assert_eq!(summary.placed, 13);
        assert_eq!(summary.dropped, 3);
    }
}
