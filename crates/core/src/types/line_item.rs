//! Cart line items and the product descriptors they are created from.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::parse_price;

/// Display name used when neither the page nor a stored record supplies one.
pub const PLACEHOLDER_NAME: &str = "Product";

/// One distinct product in the cart.
///
/// Name, price and image are captured when the product is first added and
/// are never refreshed afterwards. Only the quantity changes.
///
/// Serialized as `{id, name, price, image, qty}`, the persisted record shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub(crate) id: ProductId,
    pub(crate) name: String,
    pub(crate) price: f64,
    pub(crate) image: String,
    pub(crate) qty: u32,
}

impl LineItem {
    /// Create a line item.
    ///
    /// A non-finite or negative price is stored as `0.0` and a zero quantity
    /// is raised to `1`, so every constructed item is well-formed.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        qty: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price: sanitize_price(price),
            image: image.into(),
            qty: qty.max(1),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time the product was added.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Image URI, possibly empty.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Quantity, always at least 1.
    #[must_use]
    pub const fn qty(&self) -> u32 {
        self.qty
    }

    /// `price × qty` for this line.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// A product as requested by an add-to-cart action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl ProductDescriptor {
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Turn the descriptor into a fresh line with quantity 1.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem::new(self.id, self.name, self.price, self.image, 1)
    }
}

/// Raw product attributes harvested from page markup for an add request.
///
/// The `data_*` fields come from the add button's data attributes; the
/// `card_*` fields come from the enclosing product card and are only
/// consulted when the matching data attribute is missing. Empty strings are
/// treated the same as missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub data_id: Option<String>,
    pub data_name: Option<String>,
    pub data_price: Option<String>,
    pub data_image: Option<String>,
    pub card_title: Option<String>,
    pub card_price_text: Option<String>,
    pub card_image_src: Option<String>,
}

impl ProductAttributes {
    /// Resolve the attributes into a product descriptor.
    ///
    /// - id: `data-id`, then `data-name`, then the trimmed card title, then
    ///   the current Unix time in milliseconds
    /// - name: `data-name`, then the trimmed card title, then
    ///   [`PLACEHOLDER_NAME`]
    /// - price: `data-price`, else the card's price text, parsed with
    ///   [`parse_price`]
    /// - image: `data-image`, then the card image source, then empty
    #[must_use]
    pub fn resolve(&self) -> ProductDescriptor {
        let data_id = non_empty(self.data_id.as_deref());
        let data_name = non_empty(self.data_name.as_deref());
        let title = non_empty(self.card_title.as_deref().map(str::trim));

        let id = data_id
            .or(data_name)
            .or(title)
            .map_or_else(
                || chrono::Utc::now().timestamp_millis().to_string(),
                str::to_owned,
            );
        let name = data_name.or(title).unwrap_or(PLACEHOLDER_NAME);

        // A present-but-empty data-price still wins over the card text.
        let price = self
            .data_price
            .as_deref()
            .or(self.card_price_text.as_deref())
            .map_or(0.0, parse_price);

        let image = non_empty(self.data_image.as_deref())
            .or_else(|| non_empty(self.card_image_src.as_deref()))
            .unwrap_or_default();

        ProductDescriptor {
            id: ProductId::new(id),
            name: name.to_owned(),
            price,
            image: image.to_owned(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Clamp a price to a finite, non-negative value.
pub(crate) fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_new_clamps_invalid_values() {
        let item = LineItem::new(ProductId::new("a"), "A", -5.0, "", 0);
        assert!(item.price().abs() < f64::EPSILON);
        assert_eq!(item.qty(), 1);

        let item = LineItem::new(ProductId::new("b"), "B", f64::NAN, "", 3);
        assert!(item.price().abs() < f64::EPSILON);
        assert_eq!(item.qty(), 3);
    }

    #[test]
    fn test_line_item_serializes_record_shape() {
        let item = LineItem::new(ProductId::new("chili"), "Chili", 80.0, "img/chili.jpg", 2);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "chili",
                "name": "Chili",
                "price": 80.0,
                "image": "img/chili.jpg",
                "qty": 2
            })
        );
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(ProductId::new("a"), "A", 12.5, "", 4);
        assert!((item.line_total() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_prefers_data_attributes() {
        let attrs = ProductAttributes {
            data_id: Some("cumin".to_string()),
            data_name: Some("Cumin Seeds".to_string()),
            data_price: Some("120".to_string()),
            data_image: Some("img/cumin.jpg".to_string()),
            card_title: Some("Ignored Title".to_string()),
            card_price_text: Some("₹999".to_string()),
            card_image_src: Some("img/ignored.jpg".to_string()),
        };

        let product = attrs.resolve();
        assert_eq!(product.id.as_str(), "cumin");
        assert_eq!(product.name, "Cumin Seeds");
        assert!((product.price - 120.0).abs() < f64::EPSILON);
        assert_eq!(product.image, "img/cumin.jpg");
    }

    #[test]
    fn test_resolve_falls_back_to_card() {
        let attrs = ProductAttributes {
            card_title: Some("  Black Pepper  ".to_string()),
            card_price_text: Some("₹ 1,050.50".to_string()),
            card_image_src: Some("img/pepper.jpg".to_string()),
            ..Default::default()
        };

        let product = attrs.resolve();
        assert_eq!(product.id.as_str(), "Black Pepper");
        assert_eq!(product.name, "Black Pepper");
        assert!((product.price - 1050.5).abs() < f64::EPSILON);
        assert_eq!(product.image, "img/pepper.jpg");
    }

    #[test]
    fn test_resolve_id_falls_back_to_name() {
        let attrs = ProductAttributes {
            data_id: Some(String::new()),
            data_name: Some("Saffron".to_string()),
            ..Default::default()
        };

        let product = attrs.resolve();
        assert_eq!(product.id.as_str(), "Saffron");
        assert_eq!(product.name, "Saffron");
    }

    #[test]
    fn test_resolve_with_nothing() {
        let product = ProductAttributes::default().resolve();
        assert_eq!(product.name, PLACEHOLDER_NAME);
        assert!(product.price.abs() < f64::EPSILON);
        assert!(product.image.is_empty());
        // Timestamp fallback is a millisecond count.
        assert!(product.id.as_str().parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_resolve_empty_data_price_does_not_use_card_text() {
        let attrs = ProductAttributes {
            data_id: Some("x".to_string()),
            data_price: Some(String::new()),
            card_price_text: Some("₹50".to_string()),
            ..Default::default()
        };

        assert!(attrs.resolve().price.abs() < f64::EPSILON);
    }
}
