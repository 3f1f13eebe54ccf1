//! MiniLinker - a minimal URL shortener service
//!
//! Accepts a long URL (with an optional description and thumbnail image),
//! hands out an 8-character short id, and redirects that id back to the
//! original URL.
//!
//! # Architecture
//! - `storage`: connection lifecycle guard and the link repository (SeaORM)
//! - `services`: link business flow and the thumbnail file store
//! - `api`: HTTP handlers and middleware (actix-web)
//! - `config`: static configuration and command-line arguments
//! - `runtime`: startup wiring and the server loop
//! - `system`: logging setup

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
