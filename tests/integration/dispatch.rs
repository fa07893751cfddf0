use termiweb::concurrency::GateState;
use termiweb::shell::Outcome;

use crate::integration::support::{memory_shell, plain_config, shell_with_config};

#[tokio::test]
async fn unknown_command_reports_and_changes_nothing() {
    let (shell, sink, store) = memory_shell().await;
    shell.run_line("cd etc").await;
    sink.take();
    let records = store.len();

    assert_eq!(shell.run_line("foobar --flag").await, Outcome::UnknownCommand);

    assert_eq!(
        sink.take(),
        "Command not found: foobar\r\nType 'help' for available commands\r\n"
    );
    assert_eq!(shell.dispatcher().current_directory().await, "~/etc");
    assert_eq!(store.len(), records);
}

#[tokio::test]
async fn blank_line_is_ignored() {
    let (shell, sink, _store) = memory_shell().await;

    assert_eq!(shell.run_line("").await, Outcome::Empty);
    assert_eq!(shell.run_line("   \t").await, Outcome::Empty);
    assert_eq!(sink.take(), "");
}

#[tokio::test]
async fn storage_failure_is_contained_and_gate_returns_to_idle() {
    let (shell, sink, store) = memory_shell().await;

    store.set_fail_writes(true);
    assert_eq!(shell.run_line("mkdir scratch").await, Outcome::StorageFailure);
    assert!(sink.take().starts_with("mkdir: storage failure: "));
    assert_eq!(shell.dispatcher().state(), GateState::Idle);

    store.set_fail_writes(false);
    assert_eq!(shell.run_line("mkdir scratch").await, Outcome::Success);
    assert_eq!(shell.run_line("ls scratch").await, Outcome::Success);
    assert_eq!(sink.take(), "(empty directory)\r\n");
}

#[tokio::test]
async fn quota_exhaustion_surfaces_as_storage_failure() {
    let mut config = plain_config();
    config.shell.bootstrap = false;
    config.storage.quota_bytes = 1;
    let (shell, sink) = shell_with_config(&config).await;

    assert_eq!(shell.run_line("touch big.txt").await, Outcome::StorageFailure);
    let output = sink.take();
    assert!(output.starts_with("touch: storage failure: storage quota exceeded"));
    assert!(output.contains("of 1 bytes used"));

    assert_eq!(shell.run_line("ls").await, Outcome::Success);
    assert_eq!(sink.take(), "(empty directory)\r\n");
}

#[tokio::test]
async fn usage_errors_do_not_touch_storage() {
    let (shell, sink, store) = memory_shell().await;
    let records = store.len();

    assert_eq!(shell.run_line("mkdir").await, Outcome::Failure);
    assert_eq!(shell.run_line("touch a b").await, Outcome::Failure);
    assert_eq!(
        sink.take(),
        "Usage: mkdir <directory>\r\nUsage: touch <filename>\r\n"
    );
    assert_eq!(store.len(), records);
}

#[tokio::test]
async fn clear_resets_the_sink() {
    let (shell, sink, _store) = memory_shell().await;

    shell.run_line("echo before").await;
    assert_eq!(shell.run_line("clear").await, Outcome::Success);
    assert_eq!(sink.contents(), "");
    assert_eq!(sink.clear_count(), 1);
}

#[tokio::test]
async fn df_reports_the_configured_quota() {
    let (shell, sink, _store) = memory_shell().await;

    assert_eq!(shell.run_line("df").await, Outcome::Success);
    let output = sink.take();
    assert!(output.contains("Filesystem"));
    assert!(output.contains("termiweb"));
    assert!(output.contains("50.0 MB"));
}
