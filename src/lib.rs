//! rollbook - A minimal file-backed student record service over HTTP
//!
//! Records live in one comma-delimited text file; every request reloads
//! the full table, mutates a local copy and writes the whole file back.

pub mod cli;
pub mod codec;
pub mod http_server;
pub mod observability;
pub mod store;
