//! Sidebar visibility
//!
//! Wide terminals always show the sidebar. At or below the collapse width it
//! hides behind the menu trigger and closes on a click outside of it.

use crate::consts::cli_consts::display::SIDEBAR_COLLAPSE_WIDTH;

/// Where a mouse click landed, as far as the sidebar cares.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Trigger,
    Sidebar,
    Outside,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl SidebarState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_collapsible(width: u16) -> bool {
        width <= SIDEBAR_COLLAPSE_WIDTH
    }

    pub fn is_visible(&self, width: u16) -> bool {
        !Self::is_collapsible(width) || self.open
    }

    pub fn handle_click(&mut self, width: u16, target: ClickTarget) {
        match target {
            ClickTarget::Trigger => self.toggle(),
            ClickTarget::Sidebar => {}
            ClickTarget::Outside => {
                if Self::is_collapsible(width) && self.open {
                    self.open = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARROW: u16 = 80;
    const WIDE: u16 = 160;

    #[test]
    fn test_wide_terminal_always_shows_sidebar() {
        let mut sidebar = SidebarState::default();
        assert!(sidebar.is_visible(WIDE));
        sidebar.handle_click(WIDE, ClickTarget::Outside);
        assert!(sidebar.is_visible(WIDE));
        assert!(!sidebar.is_visible(NARROW));
    }

    #[test]
    fn test_outside_click_closes_on_narrow_terminal() {
        let mut sidebar = SidebarState::default();
        sidebar.handle_click(NARROW, ClickTarget::Trigger);
        assert!(sidebar.is_visible(NARROW));

        sidebar.handle_click(NARROW, ClickTarget::Sidebar);
        assert!(sidebar.is_open());

        sidebar.handle_click(NARROW, ClickTarget::Outside);
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(SidebarState::is_collapsible(SIDEBAR_COLLAPSE_WIDTH));
        assert!(!SidebarState::is_collapsible(SIDEBAR_COLLAPSE_WIDTH + 1));
    }

    #[test]
    fn test_trigger_toggles_closed_again() {
        let mut sidebar = SidebarState::default();
        sidebar.handle_click(NARROW, ClickTarget::Trigger);
        sidebar.handle_click(NARROW, ClickTarget::Trigger);
        assert!(!sidebar.is_open());
    }
}
