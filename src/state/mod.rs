//! State management for the image viewer core.
//!
//! - `navigation`: sibling image listing and cursor
//! - `history`: linear undo/redo stack
//! - `adjustments`: live slider values and the display pipeline
//! - `edit_session`: clean/base/display buffers tying the above together

pub mod adjustments;
pub mod edit_session;
pub mod history;
pub mod navigation;

pub use adjustments::{LiveAdjustments, LiveParameter};
pub use edit_session::EditSession;
pub use history::HistoryStack;
pub use navigation::DirectoryLister;
