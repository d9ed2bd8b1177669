//! Data types for the `.ulanziDeckProfile` manifest tree.
//!
//! These map one-to-one onto the JSON the Ulanzi Studio software reads:
//! a root `manifest.json` describing the device and page list, and one
//! page `manifest.json` per page holding the keyed button actions. Field
//! names follow the vendor's PascalCase convention.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action type identifier for a system hotkey binding.
pub const HOTKEY_ACTION_TYPE: &str = "com.ulanzi.ulanzideck.system.hotkey";

/// Profile format version the consuming software expects.
pub const PROFILE_FORMAT_VERSION: &str = "2.0";

/// Default icon shown for a hotkey button without a custom image.
pub const DEFAULT_BUTTON_ICON: &str = "Images/btn_hotkey.png";

/// Root `manifest.json` of a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileManifest {
    /// Target device
    pub device: DeviceRef,
    /// Profile cover icon, relative to the profile root
    pub icon: String,
    /// Profile display name
    pub name: String,
    /// Page navigation info
    pub pages: PageList,
    /// Format version
    pub version: String,
}

impl ProfileManifest {
    /// Builds the root manifest for a single-page profile.
    pub fn single_page(device_model: &str, name: &str, page_uuid: &str) -> Self {
        Self {
            device: DeviceRef {
                model: device_model.to_string(),
                uuid: "generated".to_string(),
            },
            icon: "icon.png".to_string(),
            name: name.to_string(),
            pages: PageList {
                current: page_uuid.to_string(),
                pages: vec![page_uuid.to_string()],
            },
            version: PROFILE_FORMAT_VERSION.to_string(),
        }
    }
}

/// Device reference in the root manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceRef {
    /// Device model identifier (e.g., "D200H"), passed through unvalidated
    pub model: String,
    /// Device UUID placeholder
    #[serde(rename = "UUID")]
    pub uuid: String,
}

/// Page navigation info in the root manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageList {
    /// Currently active page UUID
    pub current: String,
    /// All page UUIDs
    #[serde(default)]
    pub pages: Vec<String>,
}

/// Per-page `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageManifest {
    /// Controller configurations: a Keypad grid and an Encoder set
    #[serde(default)]
    pub controllers: Vec<Controller>,
    /// Page icon (always empty here)
    pub icon: String,
    /// Page display name
    pub name: String,
}

impl PageManifest {
    /// Builds the standard page: the given keypad actions plus an empty
    /// encoder controller.
    pub fn with_keypad(name: &str, actions: BTreeMap<String, Action>) -> Self {
        Self {
            controllers: vec![Controller::keypad(actions), Controller::encoder()],
            icon: String::new(),
            name: name.to_string(),
        }
    }
}

/// One controller block on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Controller {
    /// Actions keyed by "{col}_{row}" grid position.
    ///
    /// A `BTreeMap` keeps serialization order deterministic across runs.
    #[serde(default)]
    pub actions: BTreeMap<String, Action>,
    /// Controller type: "Keypad" or "Encoder"
    #[serde(rename = "Type")]
    pub controller_type: String,
}

impl Controller {
    /// Keypad controller holding the button grid.
    pub fn keypad(actions: BTreeMap<String, Action>) -> Self {
        Self {
            actions,
            controller_type: "Keypad".to_string(),
        }
    }

    /// Rotary-encoder controller; always empty for this device layout.
    pub fn encoder() -> Self {
        Self {
            actions: BTreeMap::new(),
            controller_type: "Encoder".to_string(),
        }
    }
}

/// A single button action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    /// Action type identifier
    pub action: String,
    /// Generated unique action id
    #[serde(rename = "ActionID")]
    pub action_id: String,
    /// Type-specific parameters
    pub action_param: ActionParam,
    /// Whether the title is linked to the action
    pub linked_title: bool,
    /// Action display name
    pub name: String,
    /// Current state index
    pub state: u32,
    /// Per-state view configuration
    pub view_param: Vec<ViewState>,
}

impl Action {
    /// Builds a hotkey action for a stamp button.
    pub fn hotkey(stamp_index: u32, icon_filename: &str, hotkey: &str) -> Self {
        let icon = format!("Images/{icon_filename}");
        Self {
            action: HOTKEY_ACTION_TYPE.to_string(),
            action_id: uuid::Uuid::new_v4().to_string(),
            action_param: ActionParam {
                hotkey: hotkey.to_string(),
            },
            linked_title: true,
            name: "Hotkey".to_string(),
            state: 0,
            view_param: vec![ViewState {
                icon: icon.clone(),
                icon_def: DEFAULT_BUTTON_ICON.to_string(),
                icon_ex: icon,
                text: format!("Stamp {stamp_index}"),
            }],
        }
    }
}

/// Parameters for a hotkey action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionParam {
    /// Full hotkey string, e.g. "Ctrl+Shift+Alt+A"
    pub hotkey: String,
}

/// View configuration for one action state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewState {
    /// Button icon, relative to the page directory
    pub icon: String,
    /// Fallback icon
    pub icon_def: String,
    /// Extended icon reference
    pub icon_ex: String,
    /// Button label text
    pub text: String,
}
