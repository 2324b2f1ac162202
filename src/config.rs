use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diff::{CUSTOM_COMMAND_INDEX, DiffCommand};
use crate::error::DiffError;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "DIFFTOOL_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Index into the stock catalog, or its length for the custom command.
    pub selected_command_index: usize,
    pub custom_command_template: String,
    /// Capture the custom command's standard output (and wait for it).
    pub custom_command_runs_synchronously: bool,
    pub log_level: LogLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            selected_command_index: 0,
            custom_command_template: String::new(),
            custom_command_runs_synchronously: false,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_custom(&self) -> bool {
        self.selected_command_index == CUSTOM_COMMAND_INDEX
    }

    /// The command the user currently has selected.
    pub fn active_command(&self) -> Result<DiffCommand, DiffError> {
        if self.is_custom() {
            return Ok(DiffCommand::custom(
                &self.custom_command_template,
                self.custom_command_runs_synchronously,
            ));
        }

        DiffCommand::stock(self.selected_command_index).ok_or_else(|| {
            DiffError::InvalidConfiguration(format!(
                "command index {} is out of range (0..={})",
                self.selected_command_index, CUSTOM_COMMAND_INDEX
            ))
        })
    }

    /// Switch to the custom command.
    pub fn use_custom(&mut self, template: &str, runs_synchronously: bool) {
        self.selected_command_index = CUSTOM_COMMAND_INDEX;
        self.custom_command_template = template.to_string();
        self.custom_command_runs_synchronously = runs_synchronously;
    }

    /// `$DIFFTOOL_CONFIG`, else `<config dir>/difftool/difftool.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("difftool").join("difftool.json"))
    }

    pub fn load(path: &Path) -> Result<Self, DiffError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(DiffError::IoError)?;

        serde_json::from_str(&content).map_err(|e| DiffError::InvalidConfiguration(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), DiffError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|_| DiffError::ConfigDirectory(parent.to_path_buf()))?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).map_err(DiffError::IoError)
    }
}
