//! Built-in commands.

use super::{Command, CommandRegistry, CommandStatus, Session};
use crate::error::StorageError;
use crate::types::ROOT;
use async_trait::async_trait;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

type CommandResult = Result<CommandStatus, StorageError>;

pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(Help);
    registry.register(Ls);
    registry.alias("dir", "ls");
    registry.register(Cd);
    registry.register(Pwd);
    registry.register(Cat);
    registry.register(Echo);
    registry.register(Clear);
    registry.register(Mkdir);
    registry.register(Touch);
    registry.register(Rm);
    registry.register(Neofetch);
    registry.register(Df);
}

/// The single operand of a one-argument command, or a usage error written to
/// the session.
fn single_operand<'a>(args: &'a [String], usage: &str, session: &mut Session) -> Option<&'a str> {
    match args {
        [operand] => Some(operand.as_str()),
        _ => {
            session.eprintln(&format!("Usage: {}", usage));
            None
        }
    }
}

pub struct Help;

#[async_trait]
impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> CommandResult {
        let palette = session.palette;
        session.println(&palette.file("Available Commands:"));
        session.println("");
        session.println(&palette.heading("File Operations:"));
        session.println("  ls, dir [dir]    List directory contents");
        session.println("  cd [dir]         Change directory");
        session.println("  pwd              Print working directory");
        session.println("  cat <file>       Display file contents");
        session.println("  mkdir <dir>      Create directory");
        session.println("  touch <file>     Create empty file");
        session.println("  rm <path>        Remove file/directory");
        session.println("");
        session.println(&palette.heading("System:"));
        session.println("  neofetch         Display system information");
        session.println("  df               Show storage usage");
        session.println("  clear            Clear terminal");
        session.println("  echo <text>      Display text");
        session.println("  help             Show this message");
        Ok(CommandStatus::Success)
    }
}

pub struct Ls;

#[async_trait]
impl Command for Ls {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let target = args.first().map(String::as_str).unwrap_or(".");
        let Some(entries) = session.vfs.list_directory(target).await? else {
            session.eprintln(&format!("ls: {}: No such directory", target));
            return Ok(CommandStatus::Failure);
        };

        if entries.is_empty() {
            session.println("(empty directory)");
            return Ok(CommandStatus::Success);
        }

        let palette = session.palette;
        let line = entries
            .iter()
            .map(|entry| {
                if entry.is_dir() {
                    palette.directory(&format!("{}/", entry.name))
                } else {
                    palette.file(&entry.name)
                }
            })
            .collect::<Vec<_>>()
            .join("    ");
        session.println(&line);
        Ok(CommandStatus::Success)
    }
}

pub struct Cd;

#[async_trait]
impl Command for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let target = args.first().map(String::as_str).unwrap_or(ROOT);
        let changed = session.vfs.change_directory(target).await?;
        if !changed {
            session.eprintln(&format!("cd: {}: No such directory", target));
        }

        let cwd = session.vfs.current_directory().to_string();
        let line = session.palette.heading(&format!("Current directory: {}", cwd));
        session.println(&line);

        Ok(if changed {
            CommandStatus::Success
        } else {
            CommandStatus::Failure
        })
    }
}

pub struct Pwd;

#[async_trait]
impl Command for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> CommandResult {
        let cwd = session.vfs.current_directory().to_string();
        session.println(&cwd);
        Ok(CommandStatus::Success)
    }
}

pub struct Cat;

#[async_trait]
impl Command for Cat {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let Some(path) = single_operand(args, "cat <filename>", session) else {
            return Ok(CommandStatus::Failure);
        };
        match session.vfs.read_file(path).await? {
            Some(content) => {
                session.println(&content);
                Ok(CommandStatus::Success)
            }
            None => {
                session.eprintln(&format!("cat: {}: No such file", path));
                Ok(CommandStatus::Failure)
            }
        }
    }
}

pub struct Echo;

#[async_trait]
impl Command for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        session.println(&args.join(" "));
        Ok(CommandStatus::Success)
    }
}

pub struct Clear;

#[async_trait]
impl Command for Clear {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> CommandResult {
        session.sink.clear();
        Ok(CommandStatus::Success)
    }
}

pub struct Mkdir;

#[async_trait]
impl Command for Mkdir {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let Some(path) = single_operand(args, "mkdir <directory>", session) else {
            return Ok(CommandStatus::Failure);
        };
        if session.vfs.create_directory(path).await? {
            Ok(CommandStatus::Success)
        } else {
            session.eprintln(&format!("mkdir: cannot create directory '{}'", path));
            Ok(CommandStatus::Failure)
        }
    }
}

pub struct Touch;

#[async_trait]
impl Command for Touch {
    fn name(&self) -> &'static str {
        "touch"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let Some(path) = single_operand(args, "touch <filename>", session) else {
            return Ok(CommandStatus::Failure);
        };
        if session.vfs.touch(path).await? {
            Ok(CommandStatus::Success)
        } else {
            session.eprintln(&format!("touch: cannot create file '{}'", path));
            Ok(CommandStatus::Failure)
        }
    }
}

pub struct Rm;

#[async_trait]
impl Command for Rm {
    fn name(&self) -> &'static str {
        "rm"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> CommandResult {
        let Some(path) = single_operand(args, "rm <file/directory>", session) else {
            return Ok(CommandStatus::Failure);
        };
        if session.vfs.delete(path).await? {
            Ok(CommandStatus::Success)
        } else {
            session.eprintln(&format!("rm: cannot remove '{}'", path));
            Ok(CommandStatus::Failure)
        }
    }
}

pub struct Neofetch;

const LOGO: &[&str] = &[
    "        .          ",
    "       .:.         ",
    "      .:::.        ",
    "  .....:::::.....  ",
    " ::::::::::::::::: ",
    " ::::::::::::::::: ",
    "  ':::::::::::::'  ",
    "    ':::::::'      ",
    "       ':'         ",
];

#[async_trait]
impl Command for Neofetch {
    fn name(&self) -> &'static str {
        "neofetch"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> CommandResult {
        let palette = session.palette;
        let info = [
            palette.accent("user@termi-web"),
            palette.accent("-------------"),
            format!("{}: Termi-Web Linux", palette.heading("OS")),
            format!("{}: Browser VM", palette.heading("Host")),
            format!("{}: WebAssembly 5.4", palette.heading("Kernel")),
            format!("{}: 0 days", palette.heading("Uptime")),
            format!("{}: 12", palette.heading("Packages")),
            format!("{}: termi-sh 1.0", palette.heading("Shell")),
            format!("{}: xterm.js", palette.heading("Terminal")),
        ];
        for (logo, info) in LOGO.iter().zip(info.iter()) {
            session.println(&format!("{}    {}", palette.file(logo), info));
        }
        Ok(CommandStatus::Success)
    }
}

pub struct Df;

#[async_trait]
impl Command for Df {
    fn name(&self) -> &'static str {
        "df"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> CommandResult {
        let usage = session.vfs.usage().await?;
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Filesystem", "Used", "Quota", "Use%"]);
        table.add_row(vec![
            "termiweb".to_string(),
            format_bytes(usage.used_bytes),
            format_bytes(usage.quota_bytes),
            format!("{}%", usage.percent()),
        ]);
        for line in table.to_string().lines() {
            session.println(line);
        }
        Ok(CommandStatus::Success)
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
