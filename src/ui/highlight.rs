use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

const DEFAULT_THEME: &str = "base16-ocean.dark";
const RESET: &str = "\x1b[0m";

/// Renders output buffers for a 24-bit colour terminal.
pub struct TerminalHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl TerminalHighlighter {
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes.remove(DEFAULT_THEME).unwrap_or_default(),
        }
    }

    pub fn supports(&self, filetype: &str) -> bool {
        self.syntaxes.find_syntax_by_name(filetype).is_some()
    }

    /// Colour `text` using the syntax called `filetype`. Text with an
    /// unknown filetype, or that fails to highlight, comes back unchanged.
    pub fn highlight(&self, text: &str, filetype: &str) -> String {
        let Some(syntax) = self.syntaxes.find_syntax_by_name(filetype) else {
            return text.to_string();
        };

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut rendered = String::with_capacity(text.len() * 2);
        for line in LinesWithEndings::from(text) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => rendered.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => return text.to_string(),
            }
        }
        rendered.push_str(RESET);
        rendered
    }
}

impl Default for TerminalHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
