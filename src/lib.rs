// src/lib.rs
// gitmuse - persona-styled git commit messages and branch names

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod git;
pub mod llm;
pub mod selector;
pub mod slug;
pub mod styles;
pub mod ui;

pub use error::{MuseError, Result};
