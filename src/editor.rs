//! The editor facade: one document value in, change notifications out
//!
//! Owns the model and the owner's change callback. Every message goes
//! through [`update`]; the resulting [`Cmd`] is executed here.

use std::fmt;

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::messages::{Msg, SurfaceMsg, SyncMsg, ToolbarMsg};
use crate::model::EditorModel;
use crate::stats::ContentStats;
use crate::toolbar::{self, ActionId, Prompt, ToolbarAction};
use crate::update::update;

type ChangeCallback = Box<dyn FnMut(&str)>;

/// A rich-text editor bound to an externally owned document value
pub struct RichTextEditor {
    model: EditorModel,
    on_change: ChangeCallback,
}

impl fmt::Debug for RichTextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl RichTextEditor {
    /// Mount an editor showing `value`. Mounting never notifies.
    pub fn new(value: &str, on_change: impl FnMut(&str) + 'static) -> Self {
        Self::with_config(EditorConfig::default(), value, on_change)
    }

    pub fn with_config(
        config: EditorConfig,
        value: &str,
        on_change: impl FnMut(&str) + 'static,
    ) -> Self {
        let mut editor = Self {
            model: EditorModel::new(config),
            on_change: Box::new(on_change),
        };
        editor.set_value(value);
        editor
    }

    /// Override the configured placeholder
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.model = self.model.with_placeholder(placeholder);
        self
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    /// Current serialized content
    pub fn content(&self) -> String {
        self.model.content()
    }

    pub fn placeholder(&self) -> &str {
        self.model.surface.placeholder()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.model.surface.placeholder_visible()
    }

    pub fn is_focused(&self) -> bool {
        self.model.surface.is_focused()
    }

    /// Word, character and reading-time counts for the current content
    pub fn stats(&self) -> ContentStats {
        ContentStats::of(self.model.surface.document(), self.model.config.words_per_minute)
    }

    /// Run a message through the update loop. Returns true when the owner
    /// was notified.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                self.process_cmd(cmd);
                true
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::NotifyChange(content) => (self.on_change)(&content),
        }
    }

    /// The owner passed a (possibly unchanged) document value
    pub fn set_value(&mut self, value: &str) {
        self.dispatch(Msg::Sync(SyncMsg::ExternalValue(value.to_string())));
    }

    pub fn focus(&mut self) {
        self.dispatch(Msg::Sync(SyncMsg::Focus));
    }

    pub fn blur(&mut self) -> bool {
        self.dispatch(Msg::Sync(SyncMsg::Blur))
    }

    /// Native editing input on the surface
    pub fn input(&mut self, msg: SurfaceMsg) -> bool {
        self.dispatch(Msg::Surface(msg))
    }

    pub fn type_text(&mut self, text: &str) -> bool {
        self.input(SurfaceMsg::InsertText(text.to_string()))
    }

    /// Execute a command identifier against the surface
    pub fn exec(&mut self, command: &str, arg: Option<&str>) -> bool {
        self.dispatch(Msg::exec(command, arg))
    }

    pub fn set_font_family(&mut self, family: &str) -> bool {
        self.dispatch(Msg::Toolbar(ToolbarMsg::SetFontFamily(family.to_string())))
    }

    pub fn set_font_size(&mut self, size: &str) -> bool {
        self.dispatch(Msg::Toolbar(ToolbarMsg::SetFontSize(size.to_string())))
    }

    /// Toolbar controls to render right now
    pub fn toolbar(&self) -> Vec<&'static ToolbarAction> {
        toolbar::visible_actions(&self.model.session)
    }

    /// Click a toolbar control, collecting input through `prompt`.
    /// Returns true when the owner was notified.
    pub fn click(&mut self, id: ActionId, prompt: &mut dyn Prompt) -> bool {
        let Some(action) = toolbar::action(id) else {
            return false;
        };
        self.click_action(action, prompt)
    }

    pub fn click_action(&mut self, action: &ToolbarAction, prompt: &mut dyn Prompt) -> bool {
        match toolbar::resolve_action(action, &self.model, prompt) {
            Some(msg) => self.dispatch(msg),
            None => false,
        }
    }
}
