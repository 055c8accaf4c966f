//! Core of a directory-aware image viewer/editor.
//!
//! [`state::DirectoryLister`] steps through the supported images next to an
//! opened file; [`state::EditSession`] keeps the loaded image's committed
//! edits in an undo/redo history and renders live adjustments on top.

pub mod cli;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod image_loader;
pub mod services;
pub mod state;
pub mod transforms;
