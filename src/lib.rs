pub mod analyzer;
pub mod changelog;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod history;
pub mod manifest;
pub mod notes;
pub mod preset;
pub mod resolver;
pub mod ui;

pub use error::{BumpError, Result};
