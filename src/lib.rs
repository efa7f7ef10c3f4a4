//! # CEO Summit Portal
//!
//! Backend for a college entrepreneurship event: public registration,
//! multi-role participation intake, AI-assisted business document generation
//! with a deterministic template fallback, and session-gated admin views.
//!
//! ## Architecture
//!
//! 1. **Limiter** ([`limiter`]) - Per-client, per-action admission control with window eviction
//! 2. **Content** ([`content`]) - Deterministic fallback documents and AI prompts
//! 3. **AI** ([`ai`]) - External model client and AI-then-template orchestration
//! 4. **Store** ([`db`]) - Spreadsheet-style rows in SQLite or memory
//! 5. **Mail** ([`mail`]) - Confirmation emails, best effort
//! 6. **Auth** ([`auth`]) - Admin accounts, bcrypt, encrypted session cookies
//! 7. **API** ([`api`]) - Axum routes, extractors and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the API with in-memory storage
//! cargo run -- serve --ephemeral
//!
//! # Print a fallback document
//! cargo run -- generate --type business_description --input concept="a campus food delivery app"
//! ```
//!
//! ### Using as a Library
//!
//! ```rust
//! use ceo_portal::content::{generate, ContentKind, Inputs};
//!
//! let inputs: Inputs = [("concept", "a scheduling app for small businesses")]
//!     .into_iter()
//!     .collect();
//! let text = generate(&ContentKind::parse("business_description"), &inputs);
//! assert!(text.contains("BUSINESS CONCEPT"));
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`error::PortalResult<T>`](error::PortalResult).
//! Limiter operations and the fallback generator never fail.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;
pub mod api;
pub mod app_state;
pub mod auth;
pub mod cli;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod limiter;
pub mod mail;
pub mod observability;
