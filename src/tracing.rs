//! Logging setup and debug instrumentation for the update loop
//!
//! Configure the console via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=surface=debug,message=debug` - scoped filtering
//! - `RUST_LOG=richpad::update=debug` - module-level filtering
//!
//! File logs go to `~/.config/richpad/logs/richpad.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::editable::EditableSurface;

/// Initialize tracing with a console layer and a rotating file layer
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of surface state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub blocks: usize,
    pub anchor: (usize, usize),
    pub head: (usize, usize),
    pub selection_empty: bool,
    pub focused: bool,
    pub undo_available: bool,
}

impl SurfaceSnapshot {
    pub fn from_surface(surface: &EditableSurface) -> Self {
        let selection = surface.selection();
        Self {
            blocks: surface.document().block_count(),
            anchor: (selection.anchor.block, selection.anchor.offset),
            head: (selection.head.block, selection.head.offset),
            selection_empty: selection.is_empty(),
            focused: surface.is_focused(),
            undo_available: surface.can_undo(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SurfaceSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.blocks != other.blocks {
            changes.push(format!("blocks: {} → {}", self.blocks, other.blocks));
        }
        if self.head != other.head {
            changes.push(format!(
                "caret: ({},{}) → ({},{})",
                self.head.0, self.head.1, other.head.0, other.head.1
            ));
        }
        if self.selection_empty != other.selection_empty {
            let status = if other.selection_empty {
                "cleared"
            } else {
                "active"
            };
            changes.push(format!("selection {}", status));
        }
        if self.focused != other.focused {
            let status = if other.focused { "focused" } else { "blurred" };
            changes.push(status.to_string());
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[test]
    fn test_snapshot_diff_reports_caret_and_focus() {
        let mut surface = EditableSurface::new("", 10);
        surface.load("<p>abc</p>");
        let before = SurfaceSnapshot::from_surface(&surface);
        assert_eq!(before.diff(&before), None);

        surface.set_caret(Position::new(0, 1));
        surface.focus();
        let after = SurfaceSnapshot::from_surface(&surface);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("caret: (0,3) → (0,1); focused")
        );
    }
}
