//! Diff invocation: command catalog, placeholder substitution, document
//! snapshots and the request pipeline tying them together.

pub mod pipeline;
pub mod snapshot;
pub mod template;

pub use pipeline::DiffPipeline;
pub use snapshot::{ResolvedPath, resolve, resolve_saved};
pub use template::{CURRENT_PLACEHOLDER, TARGET_PLACEHOLDER, build};

/// A built-in command line shipped with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockCommand {
    pub template: &'static str,
    pub label: &'static str,
    pub synchronous: bool,
}

/// Stock commands in the order they are offered to the user.
pub const STOCK_COMMANDS: [StockCommand; 5] = [
    StockCommand {
        template: "diff -u \"%fc\" \"%ft\"",
        label: "diff",
        synchronous: true,
    },
    StockCommand {
        template: "diff \"%fc\" \"%ft\"",
        label: "diff (plain)",
        synchronous: true,
    },
    StockCommand {
        template: "meld \"%fc\" \"%ft\"",
        label: "Meld",
        synchronous: false,
    },
    StockCommand {
        template: "kompare \"%fc\" \"%ft\"",
        label: "Kompare",
        synchronous: false,
    },
    StockCommand {
        template: "opendiff \"%fc\" \"%ft\"",
        label: "FileMerge",
        synchronous: false,
    },
];

/// Selection index meaning "use the custom template".
pub const CUSTOM_COMMAND_INDEX: usize = STOCK_COMMANDS.len();

pub const CUSTOM_COMMAND_LABEL: &str = "Custom...";

/// One selectable way of invoking a diff tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCommand {
    pub template: String,
    pub label: String,
    pub runs_synchronously: bool,
}

impl DiffCommand {
    pub fn new(template: &str, label: &str, runs_synchronously: bool) -> Self {
        DiffCommand {
            template: template.to_string(),
            label: label.to_string(),
            runs_synchronously,
        }
    }

    /// The stock entry at `index`, if there is one.
    pub fn stock(index: usize) -> Option<Self> {
        STOCK_COMMANDS
            .get(index)
            .map(|cmd| Self::new(cmd.template, cmd.label, cmd.synchronous))
    }

    pub fn custom(template: &str, runs_synchronously: bool) -> Self {
        Self::new(template, CUSTOM_COMMAND_LABEL, runs_synchronously)
    }

    /// Concrete command line for a pair of resolved paths.
    pub fn command_line(&self, current_path: &str, target_path: &str) -> String {
        build(&self.template, current_path, target_path)
    }
}

/// Labels in selection order, custom entry last.
pub fn command_labels() -> Vec<&'static str> {
    STOCK_COMMANDS
        .iter()
        .map(|cmd| cmd.label)
        .chain(std::iter::once(CUSTOM_COMMAND_LABEL))
        .collect()
}
