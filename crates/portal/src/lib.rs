//! # waveportal
//!
//! The portal binary: a local server that serves the wave portal page,
//! bridges the browser wallet, and keeps the wave wall current; plus
//! read-only commands for inspecting the wall from the terminal.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod args;
pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;

mod server;
