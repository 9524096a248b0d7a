//! PDF Server Library
//!
//! Extracts plain text from uploaded PDFs. When deployed on a managed host
//! with an idle-suspend policy, a keep-alive task pings the service's own
//! health endpoint.
//!
//! # Modules
//!
//! - `pdf`: page-by-page text extraction via MuPDF
//! - `keepalive`: optional self-ping scheduler
//! - `routes`: HTTP handlers and router construction
//! - `cors`: browser origin allow-list

pub mod config;
pub mod cors;
pub mod error;
pub mod keepalive;
pub mod pdf;
pub mod routes;
pub mod state;

pub use routes::build_router;
