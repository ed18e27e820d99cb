//! # View Commands
//!
//! Cart drawer visibility and page scrolling. No business data changes here.

use tracing::debug;

use crate::state::{Section, Storefront, ViewState};

pub fn open_cart(store: &mut Storefront) -> ViewState {
    debug!("open_cart command");
    store.open_cart();
    store.view()
}

pub fn close_cart(store: &mut Storefront) -> ViewState {
    debug!("close_cart command");
    store.close_cart();
    store.view()
}

pub fn scroll_to(store: &mut Storefront, section: Section) -> ViewState {
    debug!(section = ?section, "scroll_to command");
    store.scroll_to(section);
    store.view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawer_toggles() {
        let mut store = Storefront::default();
        assert!(open_cart(&mut store).cart_open);
        assert!(!close_cart(&mut store).cart_open);
    }

    #[test]
    fn test_scroll_keeps_drawer() {
        let mut store = Storefront::default();
        open_cart(&mut store);

        let view = scroll_to(&mut store, Section::Menu);
        assert_eq!(view.section, Section::Menu);
        assert!(view.cart_open);
    }
}
