//! The collapsible navigation menu used on narrow surfaces.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a click landed relative to the menu.
pub enum ClickTarget {
    /// The menu toggle button.
    MenuButton,
    /// Inside the open menu panel.
    MenuPanel,
    /// Anywhere else on the page.
    Outside,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Open/closed state of the menu plus the link under the pointer.
pub struct MenuState {
    open: bool,
    hovered: Option<usize>,
}

impl MenuState {
    #[must_use]
    /// Whether the menu panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    /// Value of the toggle button's `aria-expanded`.
    pub fn aria_expanded(&self) -> bool {
        self.open
    }

    #[must_use]
    /// Whether page scrolling is locked while the menu is open.
    pub fn body_locked(&self) -> bool {
        self.open
    }

    /// Flips the menu. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Handles a click anywhere: clicks outside both the button and the panel close the menu.
    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Outside {
            self.close();
        }
    }

    /// Escape closes an open menu. Returns `true` when focus should return to the menu button.
    pub fn escape(&mut self) -> bool {
        if self.open {
            self.open = false;
            true
        } else {
            false
        }
    }

    /// Marks link `index` as hovered, extending its underline.
    pub fn hover(&mut self, index: usize) {
        self.hovered = Some(index);
    }

    /// Clears the hover underline.
    pub fn unhover(&mut self) {
        self.hovered = None;
    }

    #[must_use]
    /// Link currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }
}

#[cfg(test)]
#[path = "tests/menu.rs"]
mod tests;
