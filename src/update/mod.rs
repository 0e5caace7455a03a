//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

pub mod command;
mod surface;
pub mod sync;
mod toolbar;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::EditorModel;

#[cfg(debug_assertions)]
use crate::tracing::SurfaceSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use command::{apply_operation, update_command, update_exec};
pub use surface::{type_text, update_surface};
pub use sync::{update_sync, ContentSync};
pub use toolbar::update_toolbar;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Sync(m) => sync::update_sync(model, m),
        Msg::Surface(m) => surface::update_surface(model, m),
        Msg::Exec { command, arg } => command::update_exec(model, &command, arg.as_deref()),
        Msg::Command(op) => command::update_command(model, op),
        Msg::Toolbar(m) => toolbar::update_toolbar(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after surface state and logs diffs.
#[cfg(debug_assertions)]
fn update_traced(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SurfaceSnapshot::from_surface(&model.surface);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = SurfaceSnapshot::from_surface(&model.surface);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "surface", %diff, "state changed");
    }
    if result.is_some() {
        debug!(target: "message", msg = %msg_name, "notifying");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Surface::MoveCaret(Left)`
/// - `Exec(bold)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        // External values can be large; the length is enough
        Msg::Sync(crate::messages::SyncMsg::ExternalValue(v)) => {
            format!("Sync::ExternalValue({} bytes)", v.len())
        }
        Msg::Sync(m) => format!("Sync::{:?}", m),
        Msg::Surface(m) => format!("Surface::{:?}", m),
        Msg::Exec { command, .. } => format!("Exec({})", command),
        Msg::Command(op) => format!("Command({})", op.name()),
        Msg::Toolbar(m) => format!("Toolbar::{:?}", m),
    }
}
