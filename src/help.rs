//! Dynamic help text generation from keymaps.

use crate::app::Message;
use crate::keys::{Keymap, format_key};

/// A single help item representing one or more related actions.
pub struct HelpItem {
    /// Messages to look up keys for. Keys are joined with "/".
    messages: Vec<Message>,
    label: &'static str,
}

impl HelpItem {
    pub fn new(message: Message, label: &'static str) -> Self {
        Self {
            messages: vec![message],
            label,
        }
    }

    /// Create a help item for paired actions (e.g., j/k for next/prev).
    pub fn pair(first: Message, second: Message, label: &'static str) -> Self {
        Self {
            messages: vec![first, second],
            label,
        }
    }

    fn keys(&self, keymap: &Keymap) -> Option<String> {
        let keys: Vec<String> = self
            .messages
            .iter()
            .filter_map(|msg| {
                keymap
                    .find_key(msg)
                    .map(|(code, mods)| format_key(code, mods))
            })
            .collect();
        if keys.is_empty() {
            return None;
        }
        Some(keys.join("/"))
    }

    /// Format this help item using the given keymap.
    /// Returns None if no keys are bound for any of the messages.
    pub fn format(&self, keymap: &Keymap) -> Option<String> {
        self.keys(keymap).map(|keys| format!("{}:{}", keys, self.label))
    }

    /// Returns (`keys_string`, label) for the help overlay.
    pub fn format_for_overlay(&self, keymap: &Keymap) -> Option<(String, &'static str)> {
        self.keys(keymap).map(|keys| (keys, self.label))
    }
}

/// Compact help shown in the status bar.
pub fn status_items() -> Vec<HelpItem> {
    use Message::{Quit, SelectNext, SelectPrev, ToggleHelp, ToggleLayout};
    vec![
        HelpItem::pair(SelectNext, SelectPrev, "nav"),
        HelpItem::new(ToggleLayout, "layout"),
        HelpItem::new(ToggleHelp, "help"),
        HelpItem::new(Quit, "quit"),
    ]
}

/// Every action, for the help overlay.
pub fn overlay_items() -> Vec<HelpItem> {
    use Message::{
        NextTheme, PageDown, PageUp, Quit, Reload, SelectFirst, SelectLast, SelectNext,
        SelectPrev, ToggleHelp, ToggleLayout,
    };
    vec![
        HelpItem::pair(SelectNext, SelectPrev, "down/up"),
        HelpItem::pair(SelectFirst, SelectLast, "top/bottom"),
        HelpItem::pair(PageDown, PageUp, "page down/up"),
        HelpItem::new(ToggleLayout, "inline/block cells"),
        HelpItem::new(NextTheme, "next theme"),
        HelpItem::new(Reload, "reload file"),
        HelpItem::new(ToggleHelp, "close help"),
        HelpItem::new(Quit, "quit"),
    ]
}

pub fn format_items(items: &[HelpItem], keymap: &Keymap) -> String {
    items
        .iter()
        .filter_map(|item| item.format(keymap))
        .collect::<Vec<_>>()
        .join("  ")
}
