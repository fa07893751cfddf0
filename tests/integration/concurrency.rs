use std::sync::Arc;

use futures::future::join_all;
use termiweb::concurrency::GateState;
use termiweb::shell::Outcome;
use termiweb::store::NodeStore;

use crate::integration::support::memory_shell;

#[tokio::test]
async fn concurrent_lines_run_one_at_a_time() {
    let (shell, sink, store) = memory_shell().await;

    let lines: Vec<String> = (0..16).map(|i| format!("mkdir dir{}", i)).collect();
    let outcomes = join_all(lines.iter().map(|line| shell.run_line(line))).await;

    assert!(outcomes.iter().all(|o| *o == Outcome::Success));
    assert_eq!(shell.dispatcher().state(), GateState::Idle);
    assert_eq!(sink.take(), "");
    for i in 0..16 {
        let path = format!("~/dir{}", i);
        assert!(store.get(&path).await.unwrap().is_some(), "{} missing", path);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn spawned_callers_share_one_session() {
    let (shell, sink, _store) = memory_shell().await;
    let shell = Arc::new(shell);
    shell.run_line("mkdir shared").await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shell = Arc::clone(&shell);
            tokio::spawn(async move { shell.run_line(&format!("touch shared/f{}", i)).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Outcome::Success);
    }

    sink.take();
    shell.run_line("ls shared").await;
    let listing = sink.take();
    let mut names: Vec<&str> = listing.trim_end().split("    ").collect();
    names.sort_unstable();
    let mut expected: Vec<String> = (0..8).map(|i| format!("f{}", i)).collect();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn interleaved_echoes_keep_whole_lines() {
    let (shell, sink, _store) = memory_shell().await;

    let lines: Vec<String> = (0..10).map(|i| format!("echo line {}", i)).collect();
    join_all(lines.iter().map(|line| shell.run_line(line))).await;

    let output = sink.take();
    let mut printed: Vec<&str> = output.split("\r\n").filter(|l| !l.is_empty()).collect();
    printed.sort_unstable();
    let mut expected: Vec<String> = (0..10).map(|i| format!("line {}", i)).collect();
    expected.sort_unstable();
    assert_eq!(printed, expected);
}
