//! The shopping cart.
//!
//! The cart is client-local and unsynced: it lives in the visitor's session
//! and never touches the backend. Lines are keyed by (id, platform) - the
//! same product quoted by two platforms is two distinct lines.

use serde::{Deserialize, Serialize};

use gadgetmart_core::Paise;

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Line id (product name + platform, as produced by the price cards).
    pub id: String,
    /// Product name.
    pub name: String,
    /// Platform the quote came from (e.g., "Amazon", "Flipkart").
    pub platform: String,
    /// Quoted unit price.
    pub price: Paise,
    /// Product image URL, if any.
    pub image: Option<String>,
    /// Number of units.
    pub quantity: u32,
}

impl CartItem {
    /// Total for this line.
    #[must_use]
    pub fn line_total(&self) -> Paise {
        self.price * self.quantity
    }
}

/// A cart line without a quantity, as submitted by an add-to-cart form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub price: Paise,
    pub image: Option<String>,
}

/// The shopping cart: an ordered list of lines, unique per (id, platform).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item. An existing (id, platform) line gains one unit instead of
    /// a duplicate line.
    pub fn add(&mut self, item: NewCartItem) {
        match self.find_mut(&item.id, &item.platform) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem {
                id: item.id,
                name: item.name,
                platform: item.platform,
                price: item.price,
                image: item.image,
                quantity: 1,
            }),
        }
    }

    /// Remove the (id, platform) line. Removing a missing line is a no-op.
    pub fn remove(&mut self, id: &str, platform: &str) {
        self.items
            .retain(|item| !(item.id == id && item.platform == platform));
    }

    /// Set the quantity of the (id, platform) line, clamped to at least 1.
    /// A missing line is a no-op.
    pub fn update_quantity(&mut self, id: &str, platform: &str, quantity: u32) {
        if let Some(item) = self.find_mut(id, platform) {
            item.quantity = quantity.max(1);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price x quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Paise {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    fn find_mut(&mut self, id: &str, platform: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id && item.platform == platform)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(name: &str, platform: &str, rupees: i64) -> NewCartItem {
        NewCartItem {
            id: format!("{name}{platform}"),
            name: name.to_string(),
            platform: platform.to_string(),
            price: Paise::from_rupees(rupees),
            image: None,
        }
    }

    #[test]
    fn add_new_line_starts_at_quantity_one() {
        let mut cart = Cart::default();
        cart.add(line("iPhone 16 Pro Max", "Amazon", 129_999));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn add_existing_line_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(line("iPhone 16 Pro Max", "Amazon", 129_999));
        cart.add(line("iPhone 16 Pro Max", "Amazon", 129_999));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn same_product_on_two_platforms_is_two_lines() {
        let mut cart = Cart::default();
        cart.add(line("iPhone 16 Pro Max", "Amazon", 129_999));
        cart.add(line("iPhone 16 Pro Max", "Flipkart", 127_499));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn remove_deletes_only_the_matching_line() {
        let mut cart = Cart::default();
        cart.add(line("iPhone 16 Pro Max", "Amazon", 129_999));
        cart.add(line("iPhone 16 Pro Max", "Flipkart", 127_499));

        cart.remove("iPhone 16 Pro MaxAmazon", "Amazon");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].platform, "Flipkart");
    }

    #[test]
    fn remove_missing_line_is_noop() {
        let mut cart = Cart::default();
        cart.add(line("AirPods Max 2026", "Croma", 59_999));

        cart.remove("nope", "Amazon");

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn update_quantity_clamps_to_one() {
        let mut cart = Cart::default();
        cart.add(line("AirPods Max 2026", "Croma", 59_999));
        let id = cart.items()[0].id.clone();

        cart.update_quantity(&id, "Croma", 0);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.update_quantity(&id, "Croma", 4);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn update_quantity_on_missing_line_is_noop() {
        let mut cart = Cart::default();
        cart.update_quantity("ghost", "Amazon", 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add(line("Galaxy Buds 3 Pro", "Samsung", 9_999));
        cart.add(line("Galaxy Buds 3 Pro", "Samsung", 9_999));
        cart.add(line("Kindle Oasis 4", "Amazon", 21_999));

        assert_eq!(cart.total(), Paise::from_rupees(9_999 * 2 + 21_999));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(line("Kindle Oasis 4", "Amazon", 21_999));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Paise::ZERO);
    }

    #[test]
    fn serde_round_trip() {
        let mut cart = Cart::default();
        cart.add(line("Kindle Oasis 4", "Amazon", 21_999));

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.items(), cart.items());
    }
}
