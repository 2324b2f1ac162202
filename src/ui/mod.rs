pub mod highlight;
pub mod output;
pub mod settings;

pub use highlight::TerminalHighlighter;
pub use output::ResultSink;
pub use settings::{FormResponse, FormValues, SettingsForm, SettingsFormBuilder};
