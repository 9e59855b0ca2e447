//! The canonical configuration record.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ImageFormat};

/// The backend command that returns the canonical configuration.
pub const GET_CONFIG_COMMAND: &str = "from_frontend_get_config";

/// One directory the file watcher monitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchPath {
    /// Absolute filesystem path, opaque to this layer.
    pub path: String,
    /// Whether the watcher descends into subdirectories.
    pub recursive_mode: bool,
}

impl WatchPath {
    /// Create a non-recursive watch entry, the default for freshly added
    /// directories.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            recursive_mode: false,
        }
    }
}

/// A rule that files of one format are converted to another when detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionMap {
    /// Source format.
    pub src: ImageFormat,
    /// Destination format.
    pub dst: ImageFormat,
}

impl ConversionMap {
    /// Create a mapping.
    pub fn new(src: ImageFormat, dst: ImageFormat) -> Self {
        Self { src, dst }
    }
}

/// The canonical configuration, as held by the backend.
///
/// Every field defaults: the backend's seed config file carries only
/// `watch_paths`, and older config files on disk may predate the other
/// fields entirely, so a partial record must still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories the watcher monitors.
    pub watch_paths: Vec<WatchPath>,
    /// Declared format conversion rules.
    pub conversion_maps: Vec<ConversionMap>,
    /// Launch minimized to the tray.
    pub silent_start: bool,
    /// Register the application with OS autostart.
    pub launch_on_system_start: bool,
}

impl Config {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialization)
    }

    /// Serialize to pretty-printed JSON, the form the backend persists.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialization)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Deserialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_record_decodes_with_defaults() {
        // The backend's seed file carries only watch_paths.
        let config = Config::from_json(r#"{"watch_paths": []}"#).unwrap();
        assert!(config.watch_paths.is_empty());
        assert!(config.conversion_maps.is_empty());
        assert!(!config.silent_start);
        assert!(!config.launch_on_system_start);
    }

    #[test]
    fn full_record_round_trips() {
        let config = Config {
            watch_paths: vec![
                WatchPath::new("/home/user/Pictures"),
                WatchPath {
                    path: "/srv/incoming".to_string(),
                    recursive_mode: true,
                },
            ],
            conversion_maps: vec![ConversionMap::new(ImageFormat::WebP, ImageFormat::Png)],
            silent_start: true,
            launch_on_system_start: false,
        };

        let json = config.to_json().unwrap();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn wire_field_names_match_backend() {
        let config = Config {
            watch_paths: vec![WatchPath::new("/a")],
            conversion_maps: vec![ConversionMap::new(ImageFormat::Gif, ImageFormat::WebP)],
            silent_start: false,
            launch_on_system_start: true,
        };

        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["watch_paths"][0]["path"], "/a");
        assert_eq!(value["watch_paths"][0]["recursive_mode"], false);
        assert_eq!(value["conversion_maps"][0]["src"], "GIF");
        assert_eq!(value["conversion_maps"][0]["dst"], "WebP");
        assert_eq!(value["launch_on_system_start"], true);
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn pretty_form_is_multiline() {
        let config = Config::default();
        let pretty = config.to_json_pretty().unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(Config::from_json(&pretty).unwrap(), config);
    }
}
