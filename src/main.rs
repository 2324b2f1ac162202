// difftool CLI - invoke an external diff tool between two files

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tracing::debug;

use difftool::diff::{
    CUSTOM_COMMAND_INDEX, CUSTOM_COMMAND_LABEL, DiffCommand, DiffPipeline, STOCK_COMMANDS,
};
use difftool::integrations::{Document, EditorHost, MemoryEditor};
use difftool::ui::TerminalHighlighter;
use difftool::ui::output::OUTPUT_FILETYPE;
use difftool::{ProcessRunner, Settings, logging};

#[derive(Parser)]
#[command(
    name = "difftool",
    about = "Invoke an external diff tool between two files",
    long_about = "Runs the configured diff command with %fc replaced by CURRENT and %ft by TARGET. \
    Synchronous commands have their standard output printed; asynchronous ones \
    (GUI tools) are started and left running.",
    version
)]
struct Cli {
    /// Current file, or '-' to read an unsaved buffer from stdin
    #[arg(required_unless_present = "list_commands")]
    current: Option<String>,

    /// Target file
    #[arg(required_unless_present = "list_commands")]
    target: Option<PathBuf>,

    /// Start the command without waiting for it or capturing its output
    #[arg(long = "async")]
    run_async: bool,

    /// Wait for the command and print its output, even for GUI tools
    #[arg(long = "sync", conflicts_with = "run_async")]
    run_sync: bool,

    /// Custom command template using %fc and %ft
    #[arg(short, long)]
    template: Option<String>,

    /// Index of a stock command (see --list-commands)
    #[arg(short, long, conflicts_with = "template")]
    command: Option<usize>,

    /// Settings file (defaults to $DIFFTOOL_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist the command selection made on this command line
    #[arg(long)]
    save: bool,

    /// List the available diff commands and exit
    #[arg(long)]
    list_commands: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Settings::default_path);
    let mut settings = match config_path {
        Some(ref path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    logging::init(settings.log_level, cli.verbose);

    let command = configure(&cli, &mut settings, config_path.as_deref());
    if cli.list_commands {
        if cli.save {
            command?;
        }
        return list_commands(&settings, &mut io::stdout().lock());
    }
    let command = command?;

    // Both are guaranteed by clap unless --list-commands was given.
    let (Some(current), Some(target)) = (cli.current.as_deref(), cli.target.as_deref()) else {
        anyhow::bail!("CURRENT and TARGET are required");
    };

    let current = read_current(current, io::stdin().lock())?;
    if let Some(output) = run_diff(&DiffPipeline::new(), &command, current, target)? {
        print_output(&output)?;
    }
    Ok(())
}

/// Merge the command line into `settings` and pick the command to run.
///
/// The selection is checked before anything is saved, so `--save` never
/// writes settings that would fail on the next run.
fn configure(
    cli: &Cli,
    settings: &mut Settings,
    config_path: Option<&Path>,
) -> Result<DiffCommand> {
    if let Some(index) = cli.command {
        settings.selected_command_index = index;
    }
    if let Some(ref template) = cli.template {
        settings.use_custom(template, !cli.run_async);
    }

    let mut command = settings.active_command()?;

    if cli.save {
        let path = config_path
            .context("No settings location: pass --config or set DIFFTOOL_CONFIG")?;
        settings
            .save(path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        debug!(path = %path.display(), "saved settings");
    }

    if cli.run_async {
        command.runs_synchronously = false;
    } else if cli.run_sync {
        command.runs_synchronously = true;
    }
    Ok(command)
}

/// Open CURRENT, where `-` means an unsaved buffer read from `stdin`.
fn read_current(current: &str, mut stdin: impl Read) -> Result<Document> {
    if current == "-" {
        let mut text = Vec::new();
        stdin.read_to_end(&mut text).context("Failed to read stdin")?;
        return Ok(Document::untitled(text).with_name("stdin"));
    }
    Document::from_file(Path::new(current))
        .with_context(|| format!("Failed to open {}", current))
}

/// Run one diff and return the captured output of a synchronous command.
fn run_diff<R: ProcessRunner>(
    pipeline: &DiffPipeline<R>,
    command: &DiffCommand,
    current: Document,
    target: &Path,
) -> Result<Option<String>> {
    let editor = MemoryEditor::new();

    let target_doc = Document::from_file(target)
        .with_context(|| format!("Failed to open {}", target.display()))?;
    let target_id = editor.open(target_doc);
    let current_id = editor.open(current);

    let outcome = pipeline.diff_with(&editor, command, current_id, target_id)?;
    debug!(command = %outcome.command_line, exit_code = ?outcome.exit_code, "diff finished");

    for path in &outcome.leftover_snapshots {
        debug!(path = %path.display(), "snapshot left for the external tool");
    }

    match outcome.output_document {
        Some(id) => {
            let output = editor.document(id).context("Output buffer went missing")?;
            Ok(Some(String::from_utf8_lossy(output.text()).into_owned()))
        }
        None => Ok(None),
    }
}

fn print_output(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        let highlighted = TerminalHighlighter::new().highlight(text, OUTPUT_FILETYPE);
        stdout.write_all(highlighted.as_bytes())?;
    } else {
        stdout.write_all(text.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

fn list_commands(settings: &Settings, out: &mut impl Write) -> Result<()> {
    for (index, cmd) in STOCK_COMMANDS.iter().enumerate() {
        let selected = index == settings.selected_command_index;
        list_line(out, selected, index, cmd.label, cmd.synchronous, cmd.template)?;
    }

    let template = if settings.custom_command_template.is_empty() {
        "(not set)"
    } else {
        settings.custom_command_template.as_str()
    };
    list_line(
        out,
        settings.is_custom(),
        CUSTOM_COMMAND_INDEX,
        CUSTOM_COMMAND_LABEL,
        settings.custom_command_runs_synchronously,
        template,
    )
}

fn list_line(
    out: &mut impl Write,
    selected: bool,
    index: usize,
    label: &str,
    synchronous: bool,
    template: &str,
) -> Result<()> {
    let marker = if selected { "*" } else { " " };
    let mode = if synchronous { "sync" } else { "async" };
    writeln!(out, "{} {:>2}  {:<13} {:<5}  {}", marker, index, label, mode, template)?;
    Ok(())
}
