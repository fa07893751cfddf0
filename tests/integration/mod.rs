//! Integration tests for the Termi-Web shell, driven through the dispatcher

mod concurrency;
mod dispatch;
mod filesystem;
mod persistence;
mod support;
