//! CLI operation mode handlers.
//!
//! This module contains the implementations for each operation mode:
//! - [`list_formats`]: Print the supported format keys
//! - [`print`]: Render to standard output
//! - [`download`]: Render and save into a directory
//! - [`preview`]: Render HTML and open it in a browser
//!
//! Input loading lives in [`input`] and writer helpers in [`output`].

pub mod download;
pub mod input;
pub mod list_formats;
pub mod output;
pub mod preview;
pub mod print;
