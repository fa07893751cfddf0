use std::sync::Arc;

use tempfile::TempDir;
use termiweb::shell::output::BufferSink;
use termiweb::shell::Outcome;
use termiweb::store::{MemoryNodeStore, SledNodeStore};
use termiweb::tooling::cli::CliContext;

use crate::integration::support::{plain_config, shell_over};

#[tokio::test]
async fn filesystem_survives_restart_and_cursor_resets() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("store");

    {
        let store = Arc::new(SledNodeStore::open(&store_path).await.unwrap());
        let (shell, _sink) = shell_over(store).await;
        shell.run_line("mkdir projects").await;
        shell.run_line("touch projects/a.txt").await;
        shell.run_line("rm tmp").await;
        shell.run_line("cd projects").await;
        assert_eq!(shell.dispatcher().current_directory().await, "~/projects");
    }

    let store = Arc::new(SledNodeStore::open(&store_path).await.unwrap());
    let (shell, sink) = shell_over(store).await;

    assert_eq!(shell.dispatcher().current_directory().await, "~");
    assert_eq!(shell.run_line("ls projects").await, Outcome::Success);
    assert_eq!(sink.take(), "a.txt\r\n");

    // No reseeding: the removed directory stays removed.
    assert_eq!(shell.run_line("ls").await, Outcome::Success);
    assert_eq!(
        sink.take(),
        "bin/    etc/    home/    usr/    var/    projects/\r\n"
    );
}

#[tokio::test]
async fn seeded_files_persist() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("store");

    {
        let store = Arc::new(SledNodeStore::open(&store_path).await.unwrap());
        let _ = shell_over(store).await;
    }

    let store = Arc::new(SledNodeStore::open(&store_path).await.unwrap());
    let (shell, sink) = shell_over(store).await;
    assert_eq!(shell.run_line("cat etc/motd").await, Outcome::Success);
    assert_eq!(sink.take(), "Welcome to Termi-Web!\r\n");
}

#[tokio::test]
async fn interrupted_first_run_is_seeded_on_next_start() {
    let store = Arc::new(MemoryNodeStore::new());
    store.set_fail_writes(true);
    let sink = BufferSink::new();
    assert!(
        CliContext::with_store(&plain_config(), store.clone(), Box::new(sink))
            .await
            .is_err()
    );
    assert!(store.is_empty());

    store.set_fail_writes(false);
    let (shell, sink) = shell_over(store.clone()).await;
    assert_eq!(shell.run_line("ls").await, Outcome::Success);
    assert_eq!(
        sink.take(),
        "bin/    etc/    home/    tmp/    usr/    var/\r\n"
    );
}
