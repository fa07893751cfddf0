use termiweb::shell::Outcome;
use termiweb::store::{NodeRecord, NodeStore};
use termiweb::types::EntryType;

use crate::integration::support::memory_shell;

#[tokio::test]
async fn mkdir_twice_leaves_one_node() {
    let (shell, sink, store) = memory_shell().await;

    assert_eq!(shell.run_line("mkdir work").await, Outcome::Success);
    let records = store.len();
    assert_eq!(shell.run_line("mkdir work").await, Outcome::Success);

    assert_eq!(store.len(), records);
    assert_eq!(store.list_children("~/work").await.unwrap().len(), 0);
    let root = store.get("~").await.unwrap().unwrap();
    let NodeRecord::Directory { children, .. } = root else {
        panic!("root is not a directory");
    };
    assert_eq!(children.iter().filter(|c| *c == "work").count(), 1);
    assert_eq!(sink.take(), "");
}

#[tokio::test]
async fn rm_directory_removes_every_descendant() {
    let (shell, _sink, store) = memory_shell().await;

    shell.run_line("mkdir a").await;
    shell.run_line("mkdir a/b").await;
    shell.run_line("touch a/b/c").await;
    assert!(store.get("~/a/b/c").await.unwrap().is_some());

    assert_eq!(shell.run_line("rm a").await, Outcome::Success);

    for path in ["~/a", "~/a/b", "~/a/b/c"] {
        assert!(store.get(path).await.unwrap().is_none(), "{} survived", path);
    }
    let children = store.list_children("~").await.unwrap();
    assert!(!children.iter().any(|p| p == "~/a"));
}

#[tokio::test]
async fn read_after_create_and_after_delete() {
    let (shell, sink, _store) = memory_shell().await;

    shell.run_line("touch notes.txt").await;
    assert_eq!(shell.run_line("cat notes.txt").await, Outcome::Success);
    assert_eq!(sink.take(), "\r\n");

    shell.run_line("rm notes.txt").await;
    assert_eq!(shell.run_line("cat notes.txt").await, Outcome::Failure);
    assert_eq!(sink.take(), "cat: notes.txt: No such file\r\n");
}

#[tokio::test]
async fn cd_into_missing_directory_keeps_cursor() {
    let (shell, sink, _store) = memory_shell().await;

    shell.run_line("cd home").await;
    sink.take();

    assert_eq!(shell.run_line("cd nonexistent").await, Outcome::Failure);
    assert_eq!(shell.dispatcher().current_directory().await, "~/home");
    assert_eq!(
        sink.take(),
        "cd: nonexistent: No such directory\r\nCurrent directory: ~/home\r\n"
    );
}

#[tokio::test]
async fn seeded_readme_is_readable_and_missing_file_is_reported() {
    let (shell, sink, store) = memory_shell().await;

    assert_eq!(shell.run_line("cd home/user").await, Outcome::Success);
    sink.take();

    assert_eq!(shell.run_line("cat README.md").await, Outcome::Success);
    let output = sink.take();
    assert!(output.starts_with("# Welcome to Termi-Web\n"));
    assert!(output.ends_with("Enjoy!\r\n"));

    let records = store.len();
    assert_eq!(shell.run_line("cat missing.txt").await, Outcome::Failure);
    assert_eq!(sink.take(), "cat: missing.txt: No such file\r\n");
    assert_eq!(store.len(), records);
}

#[tokio::test]
async fn ls_lists_single_created_file() {
    let (shell, sink, _store) = memory_shell().await;

    shell.run_line("mkdir projects").await;
    shell.run_line("touch projects/a.txt").await;
    sink.take();

    assert_eq!(shell.run_line("ls projects").await, Outcome::Success);
    assert_eq!(sink.take(), "a.txt\r\n");

    shell.run_line("cd projects").await;
    sink.take();
    shell.run_line("ls").await;
    assert_eq!(sink.take(), "a.txt\r\n");
}

#[tokio::test]
async fn listing_reports_entry_types() {
    let (shell, sink, store) = memory_shell().await;

    shell.run_line("mkdir projects").await;
    shell.run_line("mkdir projects/src").await;
    shell.run_line("touch projects/a.txt").await;

    let record = store.get("~/projects/a.txt").await.unwrap().unwrap();
    assert_eq!(record.entry_type(), EntryType::File);

    sink.take();
    shell.run_line("dir projects").await;
    assert_eq!(sink.take(), "src/    a.txt\r\n");
}

#[tokio::test]
async fn bootstrap_root_listing() {
    let (shell, sink, _store) = memory_shell().await;

    assert_eq!(shell.run_line("ls ~").await, Outcome::Success);
    assert_eq!(
        sink.take(),
        "bin/    etc/    home/    tmp/    usr/    var/\r\n"
    );
}

#[tokio::test]
async fn rm_of_cwd_moves_cursor_to_parent() {
    let (shell, _sink, _store) = memory_shell().await;

    shell.run_line("mkdir a").await;
    shell.run_line("mkdir a/b").await;
    shell.run_line("cd a/b").await;

    assert_eq!(shell.run_line("rm ~/a").await, Outcome::Success);
    assert_eq!(shell.dispatcher().current_directory().await, "~");
}

#[tokio::test]
async fn root_cannot_be_removed() {
    let (shell, sink, store) = memory_shell().await;

    let records = store.len();
    assert_eq!(shell.run_line("rm ~").await, Outcome::Failure);
    assert_eq!(sink.take(), "rm: cannot remove '~'\r\n");
    assert_eq!(store.len(), records);
}
