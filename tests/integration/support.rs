use std::sync::Arc;

use termiweb::config::TermiConfig;
use termiweb::shell::output::BufferSink;
use termiweb::store::{MemoryNodeStore, NodeStore};
use termiweb::tooling::cli::CliContext;

pub fn plain_config() -> TermiConfig {
    let mut config = TermiConfig::default();
    config.shell.color = false;
    config
}

/// A bootstrapped shell over an in-memory store. The store handle is returned
/// so tests can inspect records or inject write failures.
pub async fn memory_shell() -> (CliContext, BufferSink, Arc<MemoryNodeStore>) {
    let store = Arc::new(MemoryNodeStore::new());
    let (context, sink) = shell_over(store.clone()).await;
    (context, sink, store)
}

pub async fn shell_over(store: Arc<dyn NodeStore>) -> (CliContext, BufferSink) {
    let sink = BufferSink::new();
    let context = CliContext::with_store(&plain_config(), store, Box::new(sink.clone()))
        .await
        .unwrap();
    (context, sink)
}

pub async fn shell_with_config(config: &TermiConfig) -> (CliContext, BufferSink) {
    let sink = BufferSink::new();
    let context = CliContext::with_store(
        config,
        Arc::new(MemoryNodeStore::new()),
        Box::new(sink.clone()),
    )
    .await
    .unwrap();
    (context, sink)
}
