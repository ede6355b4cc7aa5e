//! Single input dispatcher.
//!
//! The front-end forwards every key press here once. The dispatcher decodes
//! it into an [`Intent`] given the current [`FocusState`] and runs the
//! handler registered for that intent. This is the only place that knows
//! whether a text field has focus.

use std::collections::HashMap;

use tracing::trace;

/// Decoded user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Show or hide the command palette.
    TogglePalette,
    /// Hide the command palette.
    ClosePalette,
    /// Move the palette cursor down.
    PaletteNext,
    /// Move the palette cursor up.
    PalettePrevious,
    /// Execute the palette entry under the cursor.
    PaletteExecute,
    /// Close the creation form.
    CloseForm,
    /// Submit the creation form.
    SubmitForm,
    /// Open the creation form.
    NewTask,
    /// Start a simulated git sync.
    TriggerSync,
}

/// A key press as reported by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name, e.g. `k`, `N`, `Enter`, `Escape`.
    pub key: String,
    /// Control held.
    pub ctrl: bool,
    /// Meta / command held.
    pub meta: bool,
    /// Shift held.
    pub shift: bool,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    /// Key press with control or command held.
    #[must_use]
    pub fn command(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// Key press with shift held.
    #[must_use]
    pub fn shifted(key: impl Into<String>) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What has focus when a key arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    /// A text input, textarea, or select has focus.
    pub input_focused: bool,
    /// The command palette is open.
    pub palette_open: bool,
    /// The creation form is open.
    pub form_open: bool,
}

/// Handler run for a decoded intent.
pub type IntentHandler = Box<dyn Fn() + Send + Sync>;

/// Decodes key presses and routes intents to registered handlers.
#[derive(Default)]
pub struct InputDispatcher {
    handlers: HashMap<Intent, IntentHandler>,
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("intents", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl InputDispatcher {
    /// Dispatcher without handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `intent`, replacing any previous one.
    pub fn register<F>(&mut self, intent: Intent, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.insert(intent, Box::new(handler));
    }

    /// Decode a key press.
    #[must_use]
    pub fn decode(event: &KeyEvent, focus: FocusState) -> Option<Intent> {
        let key = event.key.as_str();

        if event.has_command_modifier() && key.eq_ignore_ascii_case("k") {
            return Some(Intent::TogglePalette);
        }

        if key == "Escape" {
            if focus.palette_open {
                return Some(Intent::ClosePalette);
            }
            if focus.form_open {
                return Some(Intent::CloseForm);
            }
            return None;
        }

        if focus.palette_open {
            return match key {
                "ArrowDown" => Some(Intent::PaletteNext),
                "ArrowUp" => Some(Intent::PalettePrevious),
                "Enter" => Some(Intent::PaletteExecute),
                _ => None,
            };
        }

        if focus.form_open {
            return (key == "Enter" && event.has_command_modifier()).then_some(Intent::SubmitForm);
        }

        if focus.input_focused || event.has_command_modifier() {
            return None;
        }

        match key {
            "n" | "N" => Some(Intent::NewTask),
            "S" if event.shift => Some(Intent::TriggerSync),
            _ => None,
        }
    }

    /// Decode a key press and run the matching handler.
    ///
    /// Returns the decoded intent, whether or not a handler was registered.
    pub fn dispatch(&self, event: &KeyEvent, focus: FocusState) -> Option<Intent> {
        let intent = Self::decode(event, focus)?;
        trace!(?intent, key = %event.key, "input intent");
        if let Some(handler) = self.handlers.get(&intent) {
            handler();
        }
        Some(intent)
    }
}
