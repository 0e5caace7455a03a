//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use richpad::editable::EditableSurface;
use richpad::RichTextEditor;

/// Change notifications received by the owner, in order
pub type Notifications = Rc<RefCell<Vec<String>>>;

/// Mount an editor with `value` and record every notification
pub fn recording_editor(value: &str) -> (RichTextEditor, Notifications) {
    let log: Notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let editor = RichTextEditor::new(value, move |content| {
        sink.borrow_mut().push(content.to_string());
    });
    (editor, log)
}

/// Number of notifications so far
pub fn count(log: &Notifications) -> usize {
    log.borrow().len()
}

/// The most recent notification
pub fn last(log: &Notifications) -> Option<String> {
    log.borrow().last().cloned()
}

/// A surface with `markup` loaded and the caret at the end
pub fn test_surface(markup: &str) -> EditableSurface {
    let mut surface = EditableSurface::new("Start writing...", 100);
    surface.load(markup);
    surface
}
