//! CLI Tooling
//!
//! Option parsing and the host loop around the [`Dispatcher`]. The host only
//! forwards lines and awaits each one; it never touches the filesystem itself.

use crate::config::{ConfigLoader, TermiConfig};
use crate::error::ApiError;
use crate::shell::output::{OutputSink, Palette, StdoutSink, LINE_END};
use crate::shell::{CommandRegistry, Dispatcher, Outcome, Session};
use crate::store::{MemoryNodeStore, NodeStore, SledNodeStore};
use crate::vfs::{bootstrap, Vfs};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

/// Termi-Web shell: a virtual filesystem with a small command language
#[derive(Parser, Debug)]
#[command(name = "termiweb")]
#[command(about = "Browser-style shell over a persistent virtual filesystem")]
pub struct Cli {
    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Node store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Keep the filesystem in memory only
    #[arg(long, default_value = "false")]
    pub ephemeral: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Run a single command line and exit
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,
}

impl Cli {
    /// Load layered configuration and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<TermiConfig, ApiError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TermiConfig) {
        if let Some(store) = &self.store {
            config.storage.store_path = Some(store.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
    }
}

/// CLI context: the dispatcher plus what the host needs to draw the prompt.
pub struct CliContext {
    dispatcher: Dispatcher,
    user: String,
    host: String,
    palette: Palette,
}

impl CliContext {
    /// Open the configured store and wire a dispatcher writing to stdout.
    pub async fn new(config: &TermiConfig, ephemeral: bool) -> Result<Self, ApiError> {
        let store: Arc<dyn NodeStore> = if ephemeral {
            info!("Using in-memory node store");
            Arc::new(MemoryNodeStore::new())
        } else {
            let path = config.storage.resolve_store_path()?;
            Arc::new(SledNodeStore::open(path).await?)
        };
        Self::with_store(config, store, Box::new(StdoutSink)).await
    }

    /// Wire a dispatcher over an already-opened store and an arbitrary sink.
    pub async fn with_store(
        config: &TermiConfig,
        store: Arc<dyn NodeStore>,
        sink: Box<dyn OutputSink>,
    ) -> Result<Self, ApiError> {
        let options = config.storage.vfs_options();
        let vfs = if config.shell.bootstrap {
            bootstrap::mount_seeded(store, options).await?.0
        } else {
            Vfs::mount(store, options).await?
        };

        let palette = Palette::new(config.shell.color);
        let session = Session::new(vfs, sink, palette);
        Ok(Self {
            dispatcher: Dispatcher::new(CommandRegistry::with_builtins(), session),
            user: config.shell.user.clone(),
            host: config.shell.host.clone(),
            palette,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// `user@host:<cwd>$ `
    pub async fn prompt(&self) -> String {
        let cwd = self.dispatcher.current_directory().await;
        format!(
            "{}:{}$ ",
            self.palette.file(&format!("{}@{}", self.user, self.host)),
            self.palette.directory(&cwd)
        )
    }

    /// Run one line to completion.
    pub async fn run_line(&self, line: &str) -> Outcome {
        self.dispatcher.execute(line).await
    }

    /// Read lines from stdin until `exit` or end of input.
    pub async fn run_stdin(&self) -> Result<(), ApiError> {
        self.run_interactive(BufReader::new(tokio::io::stdin())).await
    }

    /// Prompt, read a line, await its execution, repeat. Lines are handled
    /// strictly in the order read.
    pub async fn run_interactive<R>(&self, input: R) -> Result<(), ApiError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let prompt = self.prompt().await;
            self.dispatcher.write(&prompt).await;

            let Some(line) = lines.next_line().await? else {
                self.dispatcher.write(LINE_END).await;
                break;
            };
            if line.trim() == "exit" {
                break;
            }
            self.run_line(&line).await;
        }
        info!("Shell session ended");
        Ok(())
    }
}

/// Process exit code for a one-shot command.
pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Empty | Outcome::Success => 0,
        Outcome::Failure | Outcome::UnknownCommand | Outcome::StorageFailure => 1,
    }
}
