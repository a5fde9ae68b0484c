//! Headless replay: feed a JSON event script through the editor and print
//! the resulting document.
//!
//! ```text
//! dm-replay scripts/three_boxes.json --config editor.json --pretty
//! cat events.json | dm-replay
//! ```
//!
//! Logging goes to stderr through `env_logger`. `RUST_LOG` wins over
//! `--verbose`.

use clap::Parser;
use dm_core::{Div, DivId};
use dm_editor::{ConfigError, Editor, EditorConfig, InputError, InputReport};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "dm-replay",
    about = "Replay a div maker event script and print the document as JSON",
    version
)]
struct Cli {
    /// Event script: one event object or an array of them. Reads stdin
    /// when omitted.
    script: Option<PathBuf>,

    /// Editor config JSON (grid, hit margin, key bindings, ...).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum ReplayError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

/// What gets printed after a replay.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    tool: &'static str,
    grid: u32,
    processed: usize,
    skipped: usize,
    divs: &'a [Div],
    selection: Vec<DivId>,
}

impl<'a> Snapshot<'a> {
    fn of(editor: &'a Editor, report: InputReport) -> Self {
        Self {
            tool: editor.tool_name(),
            grid: editor.grid_size(),
            processed: report.processed,
            skipped: report.skipped,
            divs: editor.divs(),
            selection: editor.document().selection_ids().to_vec(),
        }
    }
}

fn read_source(path: Option<&Path>) -> Result<String, ReplayError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| ReplayError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, ReplayError> {
    match path {
        Some(path) => {
            let text = read_source(Some(path))?;
            Ok(EditorConfig::from_json(&text)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn replay(config: EditorConfig, script: &str) -> Result<(Editor, InputReport), ReplayError> {
    let mut editor = Editor::new(config);
    let report = editor.user_input_json(script)?;
    if report.skipped > 0 {
        log::warn!("skipped {} malformed event(s)", report.skipped);
    }
    log::info!(
        "replayed {} event(s): {} div(s), tool {}",
        report.processed,
        editor.divs().len(),
        editor.tool_name()
    );
    Ok((editor, report))
}

fn run(cli: &Cli) -> Result<String, ReplayError> {
    let config = load_config(cli.config.as_deref())?;
    let script = read_source(cli.script.as_deref())?;
    let (editor, report) = replay(config, &script)?;
    let snapshot = Snapshot::of(&editor, report);
    let out = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    Ok(out)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("dm-replay: {err}");
            ExitCode::FAILURE
        }
    }
}
