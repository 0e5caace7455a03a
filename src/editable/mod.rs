//! The editable surface: document, caret, selection and history.
//!
//! # Architecture
//!
//! - [`EditableSurface`]: the region a user types into. Owns the
//!   [`Document`](crate::model::Document), the [`Selection`], focus state,
//!   the placeholder and undo history.
//! - [`Selection`]: anchor/head pair over document positions
//! - [`EditHistory`]: bounded snapshot history for undo/redo
//!
//! Native editing (typing, Enter, Backspace) lives in `surface.rs`;
//! selection-wide formatting lives in `format.rs`.
//!
//! # Example
//!
//! ```
//! use richpad::editable::EditableSurface;
//!
//! let mut surface = EditableSurface::new("Start writing...", 100);
//! surface.insert_text("hello");
//! surface.select_all();
//! surface.toggle_style(richpad::model::StyleFlag::Bold);
//!
//! assert_eq!(surface.serialized(), "<p><b>hello</b></p>");
//! ```

mod format;
mod history;
mod selection;
mod surface;

pub use history::{EditHistory, Snapshot};
pub use selection::Selection;
pub use surface::EditableSurface;
