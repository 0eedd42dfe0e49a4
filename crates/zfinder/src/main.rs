use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use zfinder::app::classify::{classify_all, render_report};
use zfinder::app::pins::PinBoard;
use zfinder::app::selection::SelectionController;
use zfinder::infra::config::Config;
use zfinder::infra::logging::LogTarget;
use zfinder::infra::opener::opener_from_config;
use zfinder::ui::app::UiApp;

/// Grace period for catching an opener that fails right after launch.
const OPEN_FAILURE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Parser)]
#[command(
    name = "zfinder",
    author,
    version,
    about = "Pin paths and open them in the system file browser",
    long_about = None
)]
struct Cli {
    /// Extra paths pinned for this session
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
    /// Additional config file layered over the user config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write logs to FILE (the UI discards them otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the icon category of each extension
    Classify {
        #[arg(long)]
        json: bool,
        #[arg(required = true, value_name = "EXT")]
        extensions: Vec<String>,
    },
    /// List configured pins
    Pins {
        #[arg(long)]
        json: bool,
    },
    /// Open a path in the system file browser
    Open { path: PathBuf },
    /// Print shell completions
    Completions { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, None) => LogTarget::Silent,
        (None, Some(_)) => LogTarget::Stderr,
    };
    let _log_guard = zfinder::init(log_target)?;

    match cli.command {
        Some(Commands::Classify { json, extensions }) => {
            let rows = classify_all(&extensions);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", render_report(&rows));
            }
        }
        Some(Commands::Pins { json }) => {
            let config = Config::load(cli.config.as_deref())?;
            let board = PinBoard::from_sources(&config.pins, &cli.paths)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&board.rows())?);
            } else if board.is_empty() {
                let hint = Config::user_config_path()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "your config file".into());
                eprintln!("no pins configured; add [[pins]] entries to {hint}");
            } else {
                for row in board.rows() {
                    let marker = if row.exists { "" } else { " (missing)" };
                    println!("{}\t{}\t{}\t{}{marker}", row.id, row.category, row.name, row.path);
                }
            }
        }
        Some(Commands::Open { path }) => {
            let config = Config::load(cli.config.as_deref())?;
            let (tx, rx) = mpsc::channel();
            let controller = SelectionController::new(opener_from_config(&config.opener, Some(tx)));
            controller.request_open(&path);
            if let Ok(err) = rx.recv_timeout(OPEN_FAILURE_WINDOW) {
                return Err(err.into());
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "zfinder", &mut io::stdout());
        }
        None => {
            let config = Config::load(cli.config.as_deref())?;
            let board = PinBoard::from_sources(&config.pins, &cli.paths)?;
            let mut app = UiApp::new(config, board);
            app.run()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommand_names_win_over_paths() {
        let cli = Cli::try_parse_from(["zfinder", "classify", "jpg"]).unwrap();
        assert!(cli.paths.is_empty());
        assert!(matches!(cli.command, Some(Commands::Classify { .. })));

        let cli = Cli::try_parse_from(["zfinder", "/tmp", "/var"]).unwrap();
        assert_eq!(cli.paths.len(), 2);
        assert!(cli.command.is_none());
    }
}
