//! Settings sent by the host application when the controller is initialized.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::context::RateLimits;
use crate::shortcuts::{Action, KeyEncoding, Shortcut};
use crate::snackbar::SnackbarLocation;

pub use self::blocklist::Blocklist;

mod blocklist;

/// Errors encountered while validating the settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Action `{action}` needs a `{field}` value")]
    MissingParameter {
        action: &'static str,
        field: &'static str,
    },
    #[error("`{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[error("Unknown snackbar location: {0}")]
    UnknownSnackbarLocation(String),
    #[error("Unknown key encoding: {0}")]
    UnknownKeyEncoding(String),
    #[error("Invalid blocklist rule `{rule}`: {source}")]
    InvalidBlocklistRule {
        rule: String,
        source: regex::Error,
    },
}

/// Settings, as serialized by the host.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    pub default_rate: Option<f64>,
    pub minimum_rate: Option<f64>,
    pub maximum_rate: Option<f64>,
    #[serde(default)]
    pub is_verbose_logging: bool,
    pub snackbar_location: Option<String>,
    pub key_encoding: Option<String>,
    #[serde(default)]
    pub snackbar_icons: HashMap<String, String>,
    #[serde(default)]
    pub blocklist: Vec<String>,
    #[serde(default)]
    pub is_blocklist_inverted: bool,
    #[serde(default)]
    pub shortcuts: Vec<RawShortcut>,
}

/// A shortcut, as serialized by the host.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShortcut {
    pub id: Option<String>,
    pub key_combo: Option<String>,
    pub action: String,
    pub amount: Option<f64>,
    pub rate: Option<f64>,
    pub seconds: Option<i64>,
    #[serde(default = "default_true")]
    pub show_snackbar: bool,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub show_in_popup: bool,
    #[serde(default)]
    pub show_in_context_menu: bool,
}

fn default_true() -> bool {
    true
}

/// Validated settings.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub rate_limits: RateLimits,
    pub is_verbose_logging: bool,
    pub snackbar_location: SnackbarLocation,
    pub key_encoding: KeyEncoding,
    pub snackbar_icons: HashMap<String, String>,
    pub blocklist: Blocklist,
    pub shortcuts: Vec<Shortcut>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let defaults = RateLimits::default();
        let rate_limits = RateLimits {
            default_rate: finite("defaultRate", raw.default_rate)?.unwrap_or(defaults.default_rate),
            minimum_rate: finite("minimumRate", raw.minimum_rate)?.unwrap_or(defaults.minimum_rate),
            maximum_rate: finite("maximumRate", raw.maximum_rate)?.unwrap_or(defaults.maximum_rate),
        };

        let snackbar_location = match raw.snackbar_location {
            None => SnackbarLocation::default(),
            Some(name) => SnackbarLocation::from_name(&name)
                .ok_or(SettingsError::UnknownSnackbarLocation(name))?,
        };

        let key_encoding = match raw.key_encoding.as_deref() {
            None | Some("physical") => KeyEncoding::Physical,
            Some("character") => KeyEncoding::Character,
            Some(other) => return Err(SettingsError::UnknownKeyEncoding(other.to_owned())),
        };

        let shortcuts = raw
            .shortcuts
            .into_iter()
            .map(Shortcut::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Settings {
            rate_limits,
            is_verbose_logging: raw.is_verbose_logging,
            snackbar_location,
            key_encoding,
            snackbar_icons: raw.snackbar_icons,
            blocklist: Blocklist::new(&raw.blocklist, raw.is_blocklist_inverted)?,
            shortcuts,
        })
    }
}

impl Shortcut {
    /// Parses a single shortcut, as sent when the host triggers one itself.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let raw: RawShortcut = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawShortcut> for Shortcut {
    type Error = SettingsError;

    fn try_from(raw: RawShortcut) -> Result<Self, Self::Error> {
        let action = parse_action(&raw)?;
        Ok(Shortcut {
            id: raw.id,
            key_combo: raw.key_combo.filter(|combo| !combo.is_empty()),
            action,
            show_snackbar: raw.show_snackbar,
            is_global: raw.is_global,
            is_enabled: raw.is_enabled,
            show_in_popup: raw.show_in_popup,
            show_in_context_menu: raw.show_in_context_menu,
        })
    }
}

fn parse_action(raw: &RawShortcut) -> Result<Action, SettingsError> {
    let amount = |action: &'static str| -> Result<f64, SettingsError> {
        finite("amount", raw.amount)?.ok_or(SettingsError::MissingParameter {
            action,
            field: "amount",
        })
    };
    let seconds = |action: &'static str| {
        raw.seconds.ok_or(SettingsError::MissingParameter {
            action,
            field: "seconds",
        })
    };

    let action = match raw.action.as_str() {
        "speedUp" => Action::SpeedUp {
            amount: amount("speedUp")?,
        },
        "slowDown" => Action::SlowDown {
            amount: amount("slowDown")?,
        },
        "setRate" => Action::SetRate(finite("rate", raw.rate)?),
        "showRate" => Action::ShowRate,
        "playOrPause" => Action::PlayOrPause,
        "skipForward" => Action::SkipForward {
            seconds: seconds("skipForward")?,
        },
        "skipBackward" => Action::SkipBackward {
            seconds: seconds("skipBackward")?,
        },
        "skipToEnd" => Action::SkipToEnd,
        "toggleMute" => Action::ToggleMute,
        "pip" => Action::PictureInPicture,
        "toggleFullscreen" | "fullscreen" => Action::Fullscreen,
        other => return Err(SettingsError::UnknownAction(other.to_owned())),
    };
    Ok(action)
}

fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>, SettingsError> {
    match value {
        Some(v) if !v.is_finite() => Err(SettingsError::NonFinite { field }),
        _ => Ok(value),
    }
}
