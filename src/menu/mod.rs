//! Mobile navigation menu
//!
//! A single open/closed flag mirrored into everything the page shows:
//! the `open` class on the menu, the `active` class on the toggle, body
//! scroll suppression and the toggle's `aria-expanded` attribute.

use serde::Serialize;

/// Key name of the cancel key
pub const ESCAPE_KEY: &str = "Escape";

/// Input events the menu reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// Click on the toggle control
    ToggleClick,
    /// Click on a link inside the menu
    LinkClick,
    /// Click inside the overlay; `on_overlay` is false when the click
    /// landed on the menu content rather than the background
    OverlayClick { on_overlay: bool },
    /// Key press anywhere on the page
    KeyDown(String),
}

/// Visible state derived from the open flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub menu_open_class: bool,
    pub toggle_active_class: bool,
    pub body_scroll_locked: bool,
    pub aria_expanded: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply one event and return whether the visible state changed
    pub fn handle(&mut self, event: &MenuEvent) -> bool {
        let next = match event {
            MenuEvent::ToggleClick => !self.open,
            MenuEvent::LinkClick => false,
            MenuEvent::OverlayClick { on_overlay: true } => false,
            MenuEvent::OverlayClick { on_overlay: false } => self.open,
            MenuEvent::KeyDown(key) if key == ESCAPE_KEY && self.open => false,
            MenuEvent::KeyDown(_) => self.open,
        };

        let changed = next != self.open;
        if changed {
            log::debug!("Menu {}", if next { "opened" } else { "closed" });
        }
        self.open = next;
        changed
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            menu_open_class: self.open,
            toggle_active_class: self.open,
            body_scroll_locked: self.open,
            aria_expanded: if self.open { "true" } else { "false" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> NavMenu {
        let mut menu = NavMenu::new();
        assert!(menu.handle(&MenuEvent::ToggleClick));
        menu
    }

    #[test]
    fn test_starts_closed() {
        let view = NavMenu::new().view();
        assert!(!view.menu_open_class);
        assert!(!view.body_scroll_locked);
        assert_eq!(view.aria_expanded, "false");
    }

    #[test]
    fn test_toggle_opens_and_locks_scroll() {
        let view = opened().view();
        assert!(view.menu_open_class);
        assert!(view.toggle_active_class);
        assert!(view.body_scroll_locked);
        assert_eq!(view.aria_expanded, "true");
    }

    #[test]
    fn test_toggle_twice_closes() {
        let mut menu = opened();
        assert!(menu.handle(&MenuEvent::ToggleClick));
        assert!(!menu.is_open());
        assert!(!menu.view().body_scroll_locked);
    }

    #[test]
    fn test_close_events_restore_scrolling() {
        for event in [
            MenuEvent::LinkClick,
            MenuEvent::OverlayClick { on_overlay: true },
            MenuEvent::KeyDown(ESCAPE_KEY.to_string()),
        ] {
            let mut menu = opened();
            assert!(menu.handle(&event), "{:?} should close", event);
            assert_eq!(menu.view(), NavMenu::new().view());
        }
    }

    #[test]
    fn test_close_events_idempotent_when_closed() {
        for event in [
            MenuEvent::LinkClick,
            MenuEvent::OverlayClick { on_overlay: true },
            MenuEvent::KeyDown(ESCAPE_KEY.to_string()),
        ] {
            let mut menu = NavMenu::new();
            assert!(!menu.handle(&event));
            assert!(!menu.is_open());
        }
    }

    #[test]
    fn test_click_on_content_keeps_open() {
        let mut menu = opened();
        assert!(!menu.handle(&MenuEvent::OverlayClick { on_overlay: false }));
        assert!(menu.is_open());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut menu = opened();
        assert!(!menu.handle(&MenuEvent::KeyDown("Enter".to_string())));
        assert!(menu.is_open());
    }
}
