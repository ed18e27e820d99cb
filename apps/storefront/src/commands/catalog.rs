//! # Catalog Commands
//!
//! Read-only access to the menu.

use serde::Serialize;
use storefront_core::Product;
use tracing::debug;

use crate::state::{ConfigState, Storefront};

/// Menu listing with the store branding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub store_name: String,
    pub products: Vec<Product>,
}

/// Lists every product in menu order.
pub fn get_menu(store: &Storefront, config: &ConfigState) -> MenuResponse {
    debug!(products = store.catalog().len(), "get_menu command");

    MenuResponse {
        store_name: config.store_name.clone(),
        products: store.catalog().products().to_vec(),
    }
}
