//! Content Synchronizer: external document value in, change notifications out

use tracing::{debug, trace};

use crate::commands::Cmd;
use crate::messages::SyncMsg;
use crate::model::EditorModel;

/// Remembers the last external value so it is reconciled exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSync {
    last_external: Option<String>,
}

impl ContentSync {
    pub fn last_external(&self) -> Option<&str> {
        self.last_external.as_deref()
    }

    /// Record `value` and decide whether it must overwrite the surface.
    ///
    /// A re-delivery of the last value is ignored; a new value only
    /// overwrites when it differs from what the surface already holds.
    pub fn reconcile(&mut self, value: &str, current: &str) -> bool {
        if self.last_external.as_deref() == Some(value) {
            return false;
        }
        self.last_external = Some(value.to_string());
        value != current
    }
}

/// The change notification for the surface's current content
pub fn notify(model: &EditorModel) -> Cmd {
    Cmd::NotifyChange(model.surface.serialized())
}

/// Handle synchronizer messages
pub fn update_sync(model: &mut EditorModel, msg: SyncMsg) -> Option<Cmd> {
    match msg {
        SyncMsg::ExternalValue(value) => {
            let current = model.surface.serialized();
            if model.sync.reconcile(&value, &current) {
                debug!(len = value.len(), "loading external value");
                model.surface.load(&value);
            } else {
                trace!("external value already reconciled");
            }
            // External updates never notify
            None
        }
        SyncMsg::Focus => {
            model.surface.focus();
            None
        }
        SyncMsg::Blur => {
            model.surface.blur();
            Some(notify(model))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_once_per_value() {
        let mut sync = ContentSync::default();
        assert!(sync.reconcile("<p>a</p>", ""));
        assert!(!sync.reconcile("<p>a</p>", "<p>edited</p>"));
        assert_eq!(sync.last_external(), Some("<p>a</p>"));
    }

    #[test]
    fn test_reconcile_skips_value_already_shown() {
        let mut sync = ContentSync::default();
        assert!(!sync.reconcile("<p>x</p>", "<p>x</p>"));
        assert!(!sync.reconcile("", ""));
    }

    #[test]
    fn test_blur_notifies_and_external_value_does_not() {
        let mut model = EditorModel::default();
        assert_eq!(
            update_sync(&mut model, SyncMsg::ExternalValue("<p>a</p>".to_string())),
            None
        );
        assert_eq!(model.content(), "<p>a</p>");
        assert_eq!(
            update_sync(&mut model, SyncMsg::Blur),
            Some(Cmd::NotifyChange("<p>a</p>".to_string()))
        );
    }
}
