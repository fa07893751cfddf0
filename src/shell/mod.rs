//! Command registry and dispatcher
//!
//! ```text
//! line ──▶ parse_line ──▶ Dispatcher::execute ──▶ CommandGate::enter
//!                                                     │
//!                                         registry lookup by name
//!                                                     │
//!                                    Command::run(args, &mut Session)
//!                                                     │
//!                                       Vfs calls ──▶ NodeStore
//!                                                     │
//!                                          Session::sink (OutputSink)
//! ```

pub mod commands;
pub mod output;

use crate::concurrency::{CommandGate, GateState};
use crate::error::StorageError;
use crate::vfs::Vfs;
use async_trait::async_trait;
use output::{OutputSink, Palette, LINE_END};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Everything a command may touch: the filesystem session, the output sink
/// and the colour scheme.
pub struct Session {
    pub vfs: Vfs,
    pub sink: Box<dyn OutputSink>,
    pub palette: Palette,
}

impl Session {
    pub fn new(vfs: Vfs, sink: Box<dyn OutputSink>, palette: Palette) -> Self {
        Self { vfs, sink, palette }
    }

    /// Write `text` followed by a line terminator.
    pub fn println(&mut self, text: &str) {
        self.sink.write(text);
        self.sink.write(LINE_END);
    }

    /// Write `text` as an error line.
    pub fn eprintln(&mut self, text: &str) {
        let styled = self.palette.error(text);
        self.println(&styled);
    }
}

/// Result of a handler that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

/// What `Dispatcher::execute` did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line, nothing ran.
    Empty,
    Success,
    /// The handler reported a usage error or an expected filesystem failure.
    Failure,
    UnknownCommand,
    /// A storage error was caught at the dispatcher boundary.
    StorageFailure,
}

/// A line split into a command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Split a line on whitespace. No quoting or escaping.
pub fn parse_line(line: &str) -> Option<Invocation> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(Invocation {
        name,
        args: tokens.collect(),
    })
}

/// A built-in command.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, args: &[String], session: &mut Session)
        -> Result<CommandStatus, StorageError>;
}

/// Name to handler mapping, populated once at startup.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        commands::register_builtins(&mut registry);
        registry
    }

    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands
            .insert(command.name().to_string(), Arc::new(command));
    }

    /// Make `alias` resolve to the already-registered `target`.
    pub fn alias(&mut self, alias: &str, target: &str) {
        if let Some(command) = self.commands.get(target).cloned() {
            self.commands.insert(alias.to_string(), command);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Routes lines to handlers, one command at a time.
pub struct Dispatcher {
    registry: CommandRegistry,
    gate: CommandGate<Session>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, session: Session) -> Self {
        Self {
            registry,
            gate: CommandGate::new(session),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    /// Run one line to completion. Concurrent callers are served one after
    /// another in arrival order.
    pub async fn execute(&self, line: &str) -> Outcome {
        let Some(invocation) = parse_line(line) else {
            return Outcome::Empty;
        };

        let mut session = self.gate.enter().await;
        let Some(command) = self.registry.get(&invocation.name) else {
            debug!(command = %invocation.name, "Unknown command");
            let message = format!("Command not found: {}", invocation.name);
            session.eprintln(&message);
            session.println("Type 'help' for available commands");
            return Outcome::UnknownCommand;
        };

        debug!(command = %invocation.name, args = ?invocation.args, "Executing");
        match command.run(&invocation.args, &mut session).await {
            Ok(CommandStatus::Success) => Outcome::Success,
            Ok(CommandStatus::Failure) => Outcome::Failure,
            Err(e) => {
                error!(command = %invocation.name, error = %e, "Command failed with storage error");
                let message = format!("{}: storage failure: {}", invocation.name, e);
                session.eprintln(&message);
                Outcome::StorageFailure
            }
        }
    }

    /// Current working directory, read through the gate.
    pub async fn current_directory(&self) -> String {
        self.gate.enter().await.vfs.current_directory().to_string()
    }

    /// Write raw text (a prompt, a trailing newline) to the session sink
    /// between commands.
    pub async fn write(&self, text: &str) {
        self.gate.enter().await.sink.write(text);
    }
}
