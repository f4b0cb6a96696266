use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use transcript2md_core::rendering::render_options::RenderStyle;
use transcript2md_core::shared::constants::{DEFAULT_BRANCH, DEFAULT_PUBLISH_TIMEOUT_SECS};

/// User defaults, overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_branch: String,
    /// Repository directory used when `--path` is not given.
    pub path_prefix: String,
    pub include_timestamps: bool,
    #[serde(serialize_with = "serialize_style", deserialize_with = "deserialize_style")]
    pub style: RenderStyle,
    pub publish_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            path_prefix: "transcripts".to_string(),
            include_timestamps: true,
            style: RenderStyle::Sections,
            publish_timeout_secs: DEFAULT_PUBLISH_TIMEOUT_SECS,
        }
    }
}

fn serialize_style<S: Serializer>(style: &RenderStyle, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(style)
}

fn deserialize_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RenderStyle, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("transcript2md").join("settings.json"))
    }

    /// Loads `explicit`, or the per-user settings file when none is given.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// A missing file gives the defaults; an unreadable or malformed one
    /// gives the defaults plus a warning.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings {}: {e}", path.display());
            Self::default()
        })
    }
}
