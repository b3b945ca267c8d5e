//! roomchat is a small client for a token-authenticated chat room backend.
//!
//! The crate is organized around a few collaborating layers:
//! - [`api`] defines the wire payloads and the HTTP client that validates
//!   input, attaches the session token, and normalizes failures into
//!   [`api::error::ApiError`].
//! - [`auth`] holds the authentication context backed by that client and the
//!   login form flow that drives it through navigator and notifier seams.
//! - [`core`] owns the session, the injected key-value storage, the keyring
//!   backend, and configuration.
//! - [`cli`] is the terminal front end; the binary (`src/main.rs`) only
//!   forwards to [`cli::main`].

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod utils;
