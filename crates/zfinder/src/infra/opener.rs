//! Adapters that reveal a path in the system file browser.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::infra::config::OpenerConfig;

/// Best-effort "open this path" collaborator. Implementations never block the caller and
/// never hand failures back; they surface them on their own.
pub trait OpenPath: Send + Sync {
    fn open_in_browser(&self, path: &Path);
}

/// Failure observed by an opener while trying to reveal a path.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("path does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to launch {program} for {}", .path.display())]
    Launch {
        program: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status} for {}", .path.display())]
    Exit {
        program: String,
        path: PathBuf,
        status: ExitStatus,
    },
}

impl OpenError {
    pub fn path(&self) -> &Path {
        match self {
            OpenError::Missing(path) => path,
            OpenError::Launch { path, .. } | OpenError::Exit { path, .. } => path,
        }
    }
}

/// Logs open failures and optionally forwards them to a listener.
#[derive(Debug, Clone, Default)]
struct ErrorSink {
    channel: Option<Sender<OpenError>>,
}

impl ErrorSink {
    fn report(&self, err: OpenError) {
        tracing::warn!(error = %err, "open in file browser failed");
        if let Some(channel) = &self.channel {
            if channel.send(err).is_err() {
                tracing::trace!("open error listener gone; dropping failure");
            }
        }
    }
}

/// Opens paths with the platform default handler (Finder, Explorer, xdg-open, ...).
#[derive(Debug, Default)]
pub struct SystemOpener {
    sink: ErrorSink,
}

impl SystemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward every failure to `channel` in addition to logging it.
    pub fn with_error_channel(mut self, channel: Sender<OpenError>) -> Self {
        self.sink.channel = Some(channel);
        self
    }
}

impl OpenPath for SystemOpener {
    fn open_in_browser(&self, path: &Path) {
        if !path.exists() {
            self.sink.report(OpenError::Missing(path.to_path_buf()));
            return;
        }

        tracing::debug!(path = %path.display(), "opening with system handler");
        if let Err(source) = open::that_detached(path) {
            self.sink.report(OpenError::Launch {
                program: "system handler".into(),
                path: path.to_path_buf(),
                source,
            });
        }
    }
}

/// Opens paths by running a user-configured program with the path as its last argument.
#[derive(Debug)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
    sink: ErrorSink,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            sink: ErrorSink::default(),
        }
    }

    /// Build from a command line such as `["open", "-R"]`. Returns `None` when empty.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn with_error_channel(mut self, channel: Sender<OpenError>) -> Self {
        self.sink.channel = Some(channel);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl OpenPath for CommandOpener {
    fn open_in_browser(&self, path: &Path) {
        if !path.exists() {
            self.sink.report(OpenError::Missing(path.to_path_buf()));
            return;
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                self.sink.report(OpenError::Launch {
                    program: self.program.clone(),
                    path: path.to_path_buf(),
                    source,
                });
                return;
            }
        };

        tracing::debug!(program = %self.program, path = %path.display(), "spawned opener");
        let sink = self.sink.clone();
        let program = self.program.clone();
        let path = path.to_path_buf();
        thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => sink.report(OpenError::Exit {
                program,
                path,
                status,
            }),
            Err(source) => sink.report(OpenError::Launch {
                program,
                path,
                source,
            }),
        });
    }
}

/// Records requested paths instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl OpenPath for RecordingOpener {
    fn open_in_browser(&self, path: &Path) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_path_buf());
        }
    }
}

/// Pick the opener described by configuration, falling back to the system handler.
pub fn opener_from_config(
    config: &OpenerConfig,
    errors: Option<Sender<OpenError>>,
) -> Arc<dyn OpenPath> {
    match config.command.as_deref().and_then(CommandOpener::from_command) {
        Some(mut opener) => {
            if let Some(channel) = errors {
                opener = opener.with_error_channel(channel);
            }
            Arc::new(opener)
        }
        None => {
            let mut opener = SystemOpener::new();
            if let Some(channel) = errors {
                opener = opener.with_error_channel(channel);
            }
            Arc::new(opener)
        }
    }
}
