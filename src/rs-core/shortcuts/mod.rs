use std::collections::HashMap;
use std::fmt;

use crate::page::{DomTree, KeyInput};
use crate::Logger;

pub use self::action::Action;
pub use self::editable::focus_has_editable_text;
pub use self::key_combo::{CharacterKeyEncoder, KeyComboEncoder, KeyEncoding, PhysicalKeyEncoder};

mod action;
mod editable;
mod key_combo;

/// A configured binding from a key combination to an `Action`.
#[derive(Clone, Debug, PartialEq)]
pub struct Shortcut {
    /// Identifier given by the host, if any.
    pub id: Option<String>,

    /// Key combination triggering the shortcut, in the host's `KeyEncoding`.
    ///
    /// `None` for shortcuts which can only be triggered by the host (popup
    /// menu, context menu...).
    pub key_combo: Option<String>,

    pub action: Action,

    /// If `true`, the snackbar is shown once the action is performed.
    pub show_snackbar: bool,

    /// If `true`, the host triggers this shortcut itself, even when the page
    /// does not have the focus. Key presses in the page must then not trigger it
    /// a second time.
    pub is_global: bool,

    pub is_enabled: bool,

    pub show_in_popup: bool,

    pub show_in_context_menu: bool,
}

impl Shortcut {
    /// Creates an enabled, non-global shortcut showing the snackbar.
    pub fn new(key_combo: impl Into<String>, action: Action) -> Self {
        Self {
            id: None,
            key_combo: Some(key_combo.into()),
            action,
            show_snackbar: true,
            is_global: false,
            is_enabled: true,
            show_in_popup: false,
            show_in_context_menu: false,
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)
    }
}

/// Routes key presses to the shortcuts registered for them.
pub struct ShortcutDispatcher {
    encoder: Box<dyn KeyComboEncoder>,

    /// Shortcuts per key combination, in registration order. Several
    /// shortcuts can share the same combination: all of them are triggered.
    shortcuts: HashMap<String, Vec<Shortcut>>,
}

impl ShortcutDispatcher {
    pub fn build(shortcuts: Vec<Shortcut>, encoder: Box<dyn KeyComboEncoder>) -> Self {
        let mut map: HashMap<String, Vec<Shortcut>> = HashMap::new();
        for shortcut in shortcuts {
            if !shortcut.is_enabled {
                continue;
            }
            if let Some(combo) = shortcut.key_combo.clone() {
                map.entry(combo).or_default().push(shortcut);
            }
        }
        Logger::lazy_debug(&|| format!("Added shortcut listener for {} key combination(s)", map.len()));
        Self {
            encoder,
            shortcuts: map,
        }
    }

    /// Shortcuts registered for `key_combo`, in registration order.
    pub fn shortcuts_for(&self, key_combo: &str) -> &[Shortcut] {
        self.shortcuts
            .get(key_combo)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Shortcuts which have to be triggered for a key press.
    ///
    /// Nothing is returned while the user is typing text, and global shortcuts
    /// are left to the host.
    pub fn matches<H: DomTree>(&self, host: &H, input: &KeyInput) -> Vec<&Shortcut> {
        if focus_has_editable_text(host) {
            return vec![];
        }
        let key_combo = self.encoder.encode(input);
        let registered = self.shortcuts_for(&key_combo);
        if !registered.is_empty() {
            Logger::lazy_debug(&|| format!("Shortcut recognized for key combination: {key_combo}"));
        }
        registered.iter().filter(|s| !s.is_global).collect()
    }

    /// Number of distinct key combinations registered.
    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

impl Default for ShortcutDispatcher {
    fn default() -> Self {
        Self::build(vec![], KeyEncoding::default().encoder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::FakePage;

    fn key(code: &str) -> KeyInput {
        KeyInput {
            code: code.to_owned(),
            key: code.trim_start_matches("Key").to_lowercase(),
            ..KeyInput::default()
        }
    }

    #[test]
    fn test_build_keeps_duplicates_in_order() {
        let dispatcher = ShortcutDispatcher::build(
            vec![
                Shortcut::new("KeyD", Action::SpeedUp { amount: 0.25 }),
                Shortcut::new("KeyS", Action::SlowDown { amount: 0.25 }),
                Shortcut::new("KeyD", Action::ShowRate),
            ],
            Box::new(PhysicalKeyEncoder),
        );
        assert_eq!(dispatcher.len(), 2);
        let actions: Vec<Action> = dispatcher.shortcuts_for("KeyD").iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![Action::SpeedUp { amount: 0.25 }, Action::ShowRate]);
        assert!(dispatcher.shortcuts_for("KeyZ").is_empty());
    }

    #[test]
    fn test_build_skips_disabled_and_unbound() {
        let mut disabled = Shortcut::new("KeyD", Action::ShowRate);
        disabled.is_enabled = false;
        let mut unbound = Shortcut::new("KeyP", Action::PictureInPicture);
        unbound.key_combo = None;
        let dispatcher = ShortcutDispatcher::build(vec![disabled, unbound], Box::new(PhysicalKeyEncoder));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_matches() {
        let page = FakePage::new();
        let mut global = Shortcut::new("KeyD", Action::SpeedUp { amount: 1. });
        global.is_global = true;
        let dispatcher = ShortcutDispatcher::build(
            vec![global, Shortcut::new("KeyD", Action::ShowRate)],
            Box::new(PhysicalKeyEncoder),
        );

        let found = dispatcher.matches(&page, &key("KeyD"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].action, Action::ShowRate);

        let shifted = KeyInput {
            shift: true,
            ..key("KeyD")
        };
        assert!(dispatcher.matches(&page, &shifted).is_empty());
    }

    #[test]
    fn test_no_match_while_typing() {
        let page = FakePage::new();
        let dispatcher = ShortcutDispatcher::build(
            vec![Shortcut::new("D", Action::ShowRate)],
            Box::new(CharacterKeyEncoder),
        );
        assert_eq!(dispatcher.matches(&page, &key("KeyD")).len(), 1);

        let field = page.append(page.body_id(), "TEXTAREA");
        page.set_focus(Some(field));
        assert!(dispatcher.matches(&page, &key("KeyD")).is_empty());
    }
}
