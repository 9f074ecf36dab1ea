//! Terminal administrative client for the SIGEP HR/attendance backend.
//!
//! Each backend business object gets a screen controller under [`screens`];
//! the [`cli`] module maps subcommands onto those controllers and renders
//! their state as plain-text tables.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod screens;
pub mod services;
