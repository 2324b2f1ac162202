//! Settings panel description.
//!
//! The host renders a [`SettingsForm`] with its own widgets and feeds the
//! user's answer back through [`SettingsForm::submit`], which yields the
//! new [`Settings`] value to persist.

use crate::config::Settings;
use crate::diff::{CUSTOM_COMMAND_INDEX, command_labels};
use crate::error::DiffError;

pub const COMMAND_LABEL: &str = "Diff command:";
pub const CUSTOM_COMMAND_LABEL: &str = "Custom command:";
pub const CAPTURE_OUTPUT_LABEL: &str = "Capture standard output";

pub const CUSTOM_COMMAND_TOOLTIP: &str = "If non-empty, the custom diff command line to execute.\n\
    %fc will be replaced with the full path of current document\n\
    %ft will be replaced with the full path of target document";

pub const CAPTURE_OUTPUT_TOOLTIP: &str = "Enable if custom command is text-based (i.e. the diff is\n\
    given in stdout) rather than having a GUI. Enabling this\n\
    option blocks the editor until the command exits.";

pub const NOTE: &str = "Documents with unsaved changes are compared using their current\n\
    content. When targeting the current document itself, its unsaved\n\
    content is compared with the last saved version.";

/// Immutable description of the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    choices: Vec<String>,
    selected: usize,
    custom_template: String,
    capture_output: bool,
    base: Settings,
}

/// Builds a [`SettingsForm`] pre-filled from the current settings.
pub struct SettingsFormBuilder<'a> {
    settings: &'a Settings,
    custom_label: Option<String>,
}

impl<'a> SettingsFormBuilder<'a> {
    /// Replace the label of the custom entry, e.g. with a translation.
    pub fn relabel_custom(mut self, label: &str) -> Self {
        self.custom_label = Some(label.to_string());
        self
    }

    /// Fails when the stored selection names no entry; the form never
    /// substitutes another command for it.
    pub fn build(self) -> Result<SettingsForm, DiffError> {
        let selected = checked_index(self.settings.selected_command_index)?;
        let mut choices: Vec<String> = command_labels().into_iter().map(String::from).collect();
        if let (Some(label), Some(last)) = (self.custom_label, choices.last_mut()) {
            *last = label;
        }

        Ok(SettingsForm {
            choices,
            selected,
            custom_template: self.settings.custom_command_template.clone(),
            capture_output: self.settings.custom_command_runs_synchronously,
            base: self.settings.clone(),
        })
    }
}

/// Values read back from the panel's widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub selected_command_index: usize,
    pub custom_command_template: String,
    pub capture_output: bool,
}

/// How the user closed the settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResponse {
    Ok(FormValues),
    Apply(FormValues),
    Cancel,
}

impl SettingsForm {
    pub fn builder(settings: &Settings) -> SettingsFormBuilder<'_> {
        SettingsFormBuilder {
            settings,
            custom_label: None,
        }
    }

    /// Stock command labels followed by the custom entry.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn custom_template(&self) -> &str {
        &self.custom_template
    }

    pub fn capture_output(&self) -> bool {
        self.capture_output
    }

    /// The custom template and capture toggle only apply to the custom entry.
    pub fn custom_fields_enabled(&self) -> bool {
        self.selected == CUSTOM_COMMAND_INDEX
    }

    /// The form as it looks after the user picks another entry.
    pub fn select(&self, index: usize) -> Result<SettingsForm, DiffError> {
        Ok(SettingsForm {
            selected: checked_index(index)?,
            ..self.clone()
        })
    }

    /// Current widget values, as a host would read them back.
    pub fn values(&self) -> FormValues {
        FormValues {
            selected_command_index: self.selected,
            custom_command_template: self.custom_template.clone(),
            capture_output: self.capture_output,
        }
    }

    /// New settings for OK/Apply, `None` when the dialog was cancelled.
    pub fn submit(&self, response: FormResponse) -> Result<Option<Settings>, DiffError> {
        let values = match response {
            FormResponse::Ok(values) | FormResponse::Apply(values) => values,
            FormResponse::Cancel => return Ok(None),
        };

        Ok(Some(Settings {
            selected_command_index: checked_index(values.selected_command_index)?,
            custom_command_template: values.custom_command_template,
            custom_command_runs_synchronously: values.capture_output,
            ..self.base.clone()
        }))
    }
}

fn checked_index(index: usize) -> Result<usize, DiffError> {
    if index > CUSTOM_COMMAND_INDEX {
        return Err(DiffError::InvalidConfiguration(format!(
            "no diff command at position {}",
            index
        )));
    }
    Ok(index)
}
