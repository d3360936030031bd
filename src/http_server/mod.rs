//! # HTTP Server Module
//!
//! Axum-based HTTP surface for the student record service.
//!
//! # Endpoints
//!
//! - `GET /` - Embedded HTML index page
//! - `GET /students` - List all records
//! - `POST /add` - Append one record (urlencoded form)
//! - `GET /search?name=…` - Case-insensitive name search
//! - `GET /export` - Raw record file download
//! - `POST /upload` - Raw record file replacement
//! - Anything else - 404 JSON envelope

pub mod config;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use student_routes::{student_routes, StudentState};
