//! # Catalog
//!
//! The read-only menu. Built once at startup and never mutated.
//!
//! ```text
//! Catalog::builtin()
//!     │
//!     ├── p1  Margherita Pizza   ₹299.00  [Chef's pick]
//!     ├── p2  Paneer Tikka Wrap  ₹199.00  [10% off]
//!     ├── p3  Veggie Burger      ₹179.00
//!     ├── p4  Pasta Alfredo      ₹249.00
//!     ├── p5  Sushi Platter      ₹499.00  [New]
//!     └── p6  Chocolate Brownie  ₹129.00
//! ```

use std::collections::HashSet;

use crate::error::{CatalogError, CoreError, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_amount, validate_name, validate_product_id, ValidationResult};

/// An ordered, validated list of products with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating every product.
    ///
    /// ## Rules
    /// - ids are non-empty, well-formed and unique
    /// - names are non-empty
    /// - prices are non-negative
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for product in &products {
            let check = validate_product(product).and_then(|()| {
                if seen.insert(product.id.as_str()) {
                    Ok(())
                } else {
                    Err(ValidationError::Duplicate {
                        field: "product id".to_string(),
                        value: product.id.clone(),
                    })
                }
            });

            check.map_err(|source| CatalogError::InvalidProduct {
                id: product.id.clone(),
                source,
            })?;
        }

        Ok(Catalog { products })
    }

    /// The compiled-in RestoShop menu.
    pub fn builtin() -> Self {
        Catalog {
            products: builtin_products(),
        }
    }

    /// Looks a product up by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&Product, CoreError> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Products in menu order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_name("name", &product.name)?;
    validate_amount("price", product.price)
}

fn builtin_products() -> Vec<Product> {
    vec![
        Product::new(
            "p1",
            "Margherita Pizza",
            Money::from_major_minor(299, 0),
            "https://images.unsplash.com/photo-1601924582971-b0c5be3b3a92?q=80&w=1200&auto=format&fit=crop",
            "Classic delight with 100% real mozzarella cheese and basil.",
            Some("Chef\u{2019}s pick"),
        ),
        Product::new(
            "p2",
            "Paneer Tikka Wrap",
            Money::from_major_minor(199, 0),
            "https://images.unsplash.com/photo-1625944959515-530bde4df8ab?q=80&w=1200&auto=format&fit=crop",
            "Smoky paneer tikka wrapped with fresh veggies and zingy sauce.",
            Some("10% off"),
        ),
        Product::new(
            "p3",
            "Veggie Burger",
            Money::from_major_minor(179, 0),
            "https://images.unsplash.com/photo-1498579150354-977475b7ea0b?q=80&w=1200&auto=format&fit=crop",
            "Crispy patty with fresh lettuce, tomatoes and special house sauce.",
            None,
        ),
        Product::new(
            "p4",
            "Pasta Alfredo",
            Money::from_major_minor(249, 0),
            "https://images.unsplash.com/photo-1547592180-85f173990554?q=80&w=1200&auto=format&fit=crop",
            "Silky alfredo sauce tossed with fettuccine and herbs.",
            None,
        ),
        Product::new(
            "p5",
            "Sushi Platter",
            Money::from_major_minor(499, 0),
            "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=1200&auto=format&fit=crop",
            "Assorted rolls with fresh fillings served with soy and wasabi.",
            Some("New"),
        ),
        Product::new(
            "p6",
            "Chocolate Brownie",
            Money::from_major_minor(129, 0),
            "https://images.unsplash.com/photo-1606313564200-e75d5e30476e?q=80&w=1200&auto=format&fit=crop",
            "Gooey center, crisp top, served warm. A perfect finish.",
            None,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Dish {}", id), Money::from_cents(cents), "img", "desc", None)
    }

    #[test]
    fn test_builtin_menu_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.products().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 6);
        assert_eq!(rebuilt.products()[0].name, "Margherita Pizza");
    }

    #[test]
    fn test_get_and_require() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("p5").unwrap().price.cents(), 49900);
        assert_eq!(catalog.get("p3").unwrap().tag, None);
        assert!(catalog.get("p42").is_none());
        assert!(matches!(
            catalog.require("p42"),
            Err(CoreError::ProductNotFound(id)) if id == "p42"
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![dish("a", 100), dish("a", 200)]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidProduct {
                source: ValidationError::Duplicate { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(Catalog::new(vec![dish("a", -1)]).is_err());
        assert!(Catalog::new(vec![dish("free", 0)]).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut product = dish("a", 100);
        product.name = "  ".to_string();
        assert!(Catalog::new(vec![product]).is_err());
    }
}
