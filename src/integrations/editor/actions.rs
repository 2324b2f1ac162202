use std::collections::HashMap;

use tracing::debug;

use super::DocumentId;
use crate::config::Settings;
use crate::diff::DiffPipeline;
use crate::diff::pipeline::DiffOutcome;
use crate::error::DiffError;
use crate::integrations::EditorHost;
use crate::shell::ProcessRunner;

/// Triggers a host exposes through its menus and keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffAction {
    /// Document menu entry: compare the current document with a chosen one.
    DiffDocument,
    /// Compare with the document one tab to the left.
    DiffLeft,
    /// Compare with the document one tab to the right.
    DiffRight,
    /// Compare the current document with its own saved version.
    DiffSaved,
}

impl DiffAction {
    pub const ALL: [DiffAction; 4] = [
        DiffAction::DiffDocument,
        DiffAction::DiffLeft,
        DiffAction::DiffRight,
        DiffAction::DiffSaved,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DiffAction::DiffDocument => "diff-document",
            DiffAction::DiffLeft => "diff-left",
            DiffAction::DiffRight => "diff-right",
            DiffAction::DiffSaved => "diff-saved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiffAction::DiffDocument => "Diff against document",
            DiffAction::DiffLeft => "Diff against left document",
            DiffAction::DiffRight => "Diff against right document",
            DiffAction::DiffSaved => "Diff against saved version",
        }
    }

    pub fn default_keybinding(&self) -> Option<&'static str> {
        match self {
            DiffAction::DiffDocument => None,
            DiffAction::DiffLeft => Some("<Primary><Alt>Left"),
            DiffAction::DiffRight => Some("<Primary><Alt>Right"),
            DiffAction::DiffSaved => Some("<Primary><Alt>s"),
        }
    }

    /// Work out which pair of documents this action compares.
    ///
    /// `target` is only used by [`DiffAction::DiffDocument`], where the host
    /// passes the document picked from the menu.
    pub fn request(
        &self,
        host: &dyn EditorHost,
        target: Option<DocumentId>,
    ) -> Result<DiffRequest, DiffError> {
        let current = host
            .current_document()
            .ok_or_else(|| DiffError::NoTarget("no document is open".to_string()))?;

        let target = match self {
            DiffAction::DiffDocument => target.ok_or_else(|| {
                DiffError::NoTarget("no target document was selected".to_string())
            })?,
            DiffAction::DiffSaved => current,
            DiffAction::DiffLeft | DiffAction::DiffRight => {
                let documents = host.documents();
                let position = documents
                    .iter()
                    .position(|id| *id == current)
                    .ok_or_else(|| DiffError::DocumentNotFound(current.to_string()))?;

                let neighbour = if *self == DiffAction::DiffLeft {
                    position.checked_sub(1)
                } else {
                    position.checked_add(1)
                };

                neighbour
                    .and_then(|i| documents.get(i).copied())
                    .ok_or_else(|| {
                        let side = if *self == DiffAction::DiffLeft {
                            "left"
                        } else {
                            "right"
                        };
                        DiffError::NoTarget(format!("no document to the {}", side))
                    })?
            }
        };

        Ok(DiffRequest { current, target })
    }
}

/// A resolved `(current, target)` pair ready for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRequest {
    pub current: DocumentId,
    pub target: DocumentId,
}

/// A keybinding the host should register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub name: String,
    pub label: &'static str,
    pub accelerator: &'static str,
}

/// Registry of named diff actions.
pub struct ActionRegistry {
    actions: HashMap<String, DiffAction>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// A registry holding every action under its default name.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for action in DiffAction::ALL {
            registry.register(action.name(), action);
        }
        registry
    }

    pub fn register(&mut self, name: &str, action: DiffAction) {
        self.actions.insert(name.to_string(), action);
    }

    pub fn get(&self, name: &str) -> Option<DiffAction> {
        self.actions.get(name).copied()
    }

    /// Keybindings for every registered action that has one, sorted by name.
    pub fn keybindings(&self) -> Vec<KeyBinding> {
        let mut bindings: Vec<KeyBinding> = self
            .actions
            .iter()
            .filter_map(|(name, action)| {
                action.default_keybinding().map(|accelerator| KeyBinding {
                    name: name.clone(),
                    label: action.label(),
                    accelerator,
                })
            })
            .collect();
        bindings.sort_by(|a, b| a.name.cmp(&b.name));
        bindings
    }

    /// Run the action registered as `name`.
    ///
    /// Failures are reported on the host's status bar before being returned.
    pub fn invoke<R: ProcessRunner>(
        &self,
        name: &str,
        host: &dyn EditorHost,
        pipeline: &DiffPipeline<R>,
        settings: &Settings,
        target: Option<DocumentId>,
    ) -> Result<DiffOutcome, DiffError> {
        let request = self
            .get(name)
            .ok_or_else(|| DiffError::ActionNotFound(name.to_string()))
            .and_then(|action| action.request(host, target));

        match request {
            Ok(request) => {
                debug!(action = name, "dispatching diff request");
                pipeline.diff(host, settings, request.current, request.target)
            }
            Err(err) => {
                host.set_status(&format!("difftool: {}", err));
                Err(err)
            }
        }
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One line of the per-document menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub document: DocumentId,
    pub label: String,
    pub is_current: bool,
}

/// Menu listing every open document as a diff target, rebuilt each time
/// the menu is shown.
pub fn document_menu(host: &dyn EditorHost) -> Vec<MenuEntry> {
    let current = host.current_document();
    host.documents()
        .into_iter()
        .filter_map(|id| host.document(id))
        .map(|doc| MenuEntry {
            document: doc.id(),
            label: doc.display_name(),
            is_current: Some(doc.id()) == current,
        })
        .collect()
}
