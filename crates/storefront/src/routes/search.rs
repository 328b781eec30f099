//! Search suggestions and price-comparison views.
//!
//! Suggestions filter the static catalog. The comparison table is built from
//! the backend's quotes, padded with placeholder quotes for the partner
//! platforms the scraper has not covered yet, so the table always shows the
//! full partner lineup.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use tracing::instrument;

use gadgetmart_core::Paise;

use crate::backend::types::{PlatformQuote, ProductInfo};
use crate::catalog::{self, Gadget, image_path};

/// Maximum number of suggestions returned.
const SUGGESTION_LIMIT: usize = 5;

/// Minimum query length before suggestions kick in.
const MIN_QUERY_LEN: usize = 2;

// =============================================================================
// Suggestions
// =============================================================================

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Suggestion display data for templates.
#[derive(Clone)]
pub struct SuggestionView {
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&&'static Gadget> for SuggestionView {
    fn from(gadget: &&'static Gadget) -> Self {
        Self {
            name: gadget.name.clone(),
            price: gadget.price.display(),
            image: gadget.image.to_string(),
        }
    }
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/suggestions.html")]
pub struct SuggestionsTemplate {
    pub suggestions: Vec<SuggestionView>,
}

/// Search suggestions endpoint (HTMX).
///
/// Returns an HTML fragment of up to five catalog matches. Queries shorter
/// than two characters return an empty fragment.
#[instrument]
pub async fn suggest(Query(query): Query<SuggestQuery>) -> impl IntoResponse {
    let query_str = query.q.trim();

    let suggestions = if query_str.len() >= MIN_QUERY_LEN {
        catalog::suggestions(query_str, SUGGESTION_LIMIT)
            .iter()
            .map(SuggestionView::from)
            .collect()
    } else {
        Vec::new()
    };

    SuggestionsTemplate { suggestions }
}

// =============================================================================
// Quote Augmentation
// =============================================================================

/// Partner platforms padded into every comparison, with their price offset
/// from the best scraped quote (rupees).
pub const MOCK_PLATFORMS: [(&str, f64); 6] = [
    ("Meesho", -5000.0),
    ("Zepto", 1200.0),
    ("Shopify", 400.0),
    ("Swiggy Instamart", 800.0),
    ("Croma", 500.0),
    ("Reliance Digital", 300.0),
];

/// Price floor for padded quotes (rupees).
const MOCK_PRICE_FLOOR: f64 = 1000.0;

/// Jitter applied to padded quotes (rupees, plus or minus).
const MOCK_JITTER: f64 = 1000.0;

/// Pad the quote list with placeholder quotes for partner platforms the
/// backend did not cover.
///
/// A platform already present (matched by case-insensitive containment) is
/// never duplicated. Padded prices are the best real quote plus the
/// platform's offset plus jitter, floored at 1000 rupees. An empty quote
/// list is left alone - there is no real price to anchor on.
pub fn augment_quotes<R: Rng>(quotes: &mut Vec<PlatformQuote>, rng: &mut R) {
    let Some(min_price) = quotes
        .iter()
        .map(|quote| quote.price)
        .fold(None, |best, price| {
            Some(best.map_or(price, |b: f64| b.min(price)))
        })
    else {
        return;
    };

    let present: Vec<String> = quotes
        .iter()
        .map(|quote| quote.platform_name.to_lowercase())
        .collect();

    for (name, offset) in MOCK_PLATFORMS {
        let needle = name.to_lowercase();
        if present.iter().any(|platform| platform.contains(&needle)) {
            continue;
        }

        let jitter = rng.random_range(-MOCK_JITTER..MOCK_JITTER);
        quotes.push(PlatformQuote {
            platform_name: name.to_string(),
            platform_product_url: "#".to_string(),
            price: (min_price + offset + jitter).max(MOCK_PRICE_FLOOR),
            currency: "INR".to_string(),
            available: true,
            promo_code: None,
            fetched_at: Utc::now(),
        });
    }
}

/// Move the house platform's quote to the front (stable).
pub fn sort_own_platform_first(quotes: &mut [PlatformQuote]) {
    quotes.sort_by_key(|quote| !is_own_platform(&quote.platform_name));
}

/// Whether a platform name refers to GadgetMart itself.
fn is_own_platform(platform: &str) -> bool {
    platform.to_lowercase().contains("gadgetmart")
}

// =============================================================================
// Platform Badges
// =============================================================================

/// Emoji badge for a platform without a logo.
#[must_use]
pub fn platform_icon(platform: &str) -> &'static str {
    let lower = platform.to_lowercase();
    if lower.contains("gadgetmart") {
        "⭐"
    } else if lower.contains("amazon") {
        "🛒"
    } else if lower.contains("flipkart") {
        "📦"
    } else if lower.contains("zepto") {
        "⚡"
    } else if lower.contains("temu") {
        "🌍"
    } else {
        "🏪"
    }
}

/// Known platform logo URLs.
#[must_use]
pub fn platform_logo(platform: &str) -> Option<&'static str> {
    let lower = platform.to_lowercase();
    if lower.contains("amazon") {
        Some("https://upload.wikimedia.org/wikipedia/commons/a/a9/Amazon_logo.svg")
    } else if lower.contains("flipkart") {
        Some("https://static-assets-web.flixcart.com/batman-returns/batman-returns/p/images/fkheaderlogo_exploreplus-448d53.svg")
    } else if lower.contains("gadgetmart") {
        Some("https://cdn-icons-png.flaticon.com/512/3649/3649275.png")
    } else if lower.contains("reliance") {
        Some("https://www.reliancedigital.in/build/client/images/rd_logo_2.0.svg")
    } else if lower.contains("apple") {
        Some("https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg")
    } else if lower.contains("samsung") {
        Some("https://upload.wikimedia.org/wikipedia/commons/2/24/Samsung_Logo.svg")
    } else {
        None
    }
}

// =============================================================================
// Comparison Views
// =============================================================================

/// One platform quote, ready for the price card template.
#[derive(Clone)]
pub struct QuoteView {
    pub platform_name: String,
    /// External product URL ("#" for padded quotes).
    pub url: String,
    pub price: String,
    /// Unit price in paise, for the add-to-cart form.
    pub price_paise: i64,
    /// Unit price in rupees, for the save form and checkout link.
    pub price_rupees: String,
    pub last_scan: String,
    pub promo_code: Option<String>,
    pub is_own_platform: bool,
    pub logo: Option<&'static str>,
    pub icon: &'static str,
    /// Checkout link, present only for the house platform.
    pub checkout_url: Option<String>,
}

/// A product comparison, ready for the results template.
#[derive(Clone)]
pub struct ProductResultView {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub best_price: String,
    pub quotes: Vec<QuoteView>,
}

/// Build the comparison view: pad the quotes, put the house platform first,
/// and format everything for display.
pub fn build_result_view<R: Rng>(
    info: ProductInfo,
    user_email: Option<&str>,
    rng: &mut R,
) -> ProductResultView {
    let ProductInfo {
        name,
        brand,
        category,
        description,
        image_url,
        mut prices,
    } = info;

    augment_quotes(&mut prices, rng);
    sort_own_platform_first(&mut prices);

    let image = image_url.unwrap_or_else(|| image_path(&name, &category).to_string());

    let best_price = prices
        .iter()
        .map(|quote| quote.price)
        .fold(None, |best, price| {
            Some(best.map_or(price, |b: f64| b.min(price)))
        })
        .map_or_else(String::new, |best| Paise::from_rupees_f64(best).display());

    let quotes = prices
        .iter()
        .map(|quote| {
            let own = is_own_platform(&quote.platform_name);
            let price = Paise::from_rupees_f64(quote.price);
            let checkout_url = own.then(|| {
                format!(
                    "/checkout?product={}&amount={}&email={}",
                    urlencoding::encode(&name),
                    price.rupees_string(),
                    urlencoding::encode(user_email.unwrap_or_default())
                )
            });

            QuoteView {
                platform_name: quote.platform_name.clone(),
                url: quote.platform_product_url.clone(),
                price: price.display(),
                price_paise: price.as_paise(),
                price_rupees: price.rupees_string(),
                last_scan: quote.fetched_at.format("%H:%M:%S").to_string(),
                promo_code: quote.promo_code.clone(),
                is_own_platform: own,
                logo: platform_logo(&quote.platform_name),
                icon: platform_icon(&quote.platform_name),
                checkout_url,
            }
        })
        .collect();

    ProductResultView {
        name,
        brand,
        category,
        description,
        image,
        best_price,
        quotes,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quote(platform: &str, price: f64) -> PlatformQuote {
        PlatformQuote {
            platform_name: platform.to_string(),
            platform_product_url: format!("https://{}.example/p", platform.to_lowercase()),
            price,
            currency: "INR".to_string(),
            available: true,
            promo_code: None,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn augment_adds_missing_partner_platforms() {
        let mut quotes = vec![quote("Amazon", 50_000.0), quote("Flipkart", 49_500.0)];
        let mut rng = StdRng::seed_from_u64(7);

        augment_quotes(&mut quotes, &mut rng);

        assert_eq!(quotes.len(), 2 + MOCK_PLATFORMS.len());
        for (name, _) in MOCK_PLATFORMS {
            assert!(quotes.iter().any(|q| q.platform_name == name));
        }
    }

    #[test]
    fn augment_never_duplicates_present_platforms() {
        let mut quotes = vec![quote("Croma Retail", 20_000.0), quote("Amazon", 21_000.0)];
        let mut rng = StdRng::seed_from_u64(7);

        augment_quotes(&mut quotes, &mut rng);

        let croma_count = quotes
            .iter()
            .filter(|q| q.platform_name.to_lowercase().contains("croma"))
            .count();
        assert_eq!(croma_count, 1);
    }

    #[test]
    fn augmented_prices_respect_floor_and_jitter_bounds() {
        // Best price so low the Meesho offset (-5000) would go negative
        let mut quotes = vec![quote("Amazon", 1_500.0)];
        let mut rng = StdRng::seed_from_u64(42);

        augment_quotes(&mut quotes, &mut rng);

        for q in quotes.iter().skip(1) {
            assert!(q.price >= MOCK_PRICE_FLOOR, "{} below floor", q.platform_name);
            let (_, offset) = MOCK_PLATFORMS
                .iter()
                .find(|(name, _)| *name == q.platform_name)
                .unwrap();
            assert!(q.price <= (1_500.0 + offset + MOCK_JITTER).max(MOCK_PRICE_FLOOR));
        }
    }

    #[test]
    fn augment_leaves_empty_quote_list_alone() {
        let mut quotes = Vec::new();
        let mut rng = StdRng::seed_from_u64(7);

        augment_quotes(&mut quotes, &mut rng);

        assert!(quotes.is_empty());
    }

    #[test]
    fn own_platform_sorts_first() {
        let mut quotes = vec![
            quote("Amazon", 50_000.0),
            quote("GadgetMart", 51_000.0),
            quote("Flipkart", 49_000.0),
        ];

        sort_own_platform_first(&mut quotes);

        assert_eq!(quotes[0].platform_name, "GadgetMart");
        // Stable: the rest keep their relative order
        assert_eq!(quotes[1].platform_name, "Amazon");
        assert_eq!(quotes[2].platform_name, "Flipkart");
    }

    #[test]
    fn platform_badges() {
        assert_eq!(platform_icon("Amazon India"), "🛒");
        assert_eq!(platform_icon("GadgetMart"), "⭐");
        assert_eq!(platform_icon("Unknown Shop"), "🏪");
        assert!(platform_logo("Flipkart").is_some());
        assert!(platform_logo("Meesho").is_none());
    }

    #[test]
    fn result_view_formats_and_links() {
        let info = ProductInfo {
            name: "iPhone 16 Pro Max".to_string(),
            brand: "Apple".to_string(),
            category: "Smartphones".to_string(),
            description: "Flagship".to_string(),
            image_url: None,
            prices: vec![quote("GadgetMart", 129_999.0), quote("Amazon", 131_000.0)],
        };
        let mut rng = StdRng::seed_from_u64(7);

        let view = build_result_view(info, Some("shopper@example.com"), &mut rng);

        // Best price is computed over the padded quote set, so a placeholder
        // quote may undercut the real minimum - exactly what the comparison
        // page shows
        let min_paise = view.quotes.iter().map(|q| q.price_paise).min().unwrap();
        assert_eq!(view.best_price, Paise::new(min_paise).display());
        // Falls back to catalog imagery when the backend has none
        assert_eq!(view.image, crate::catalog::GADGET_IMAGES[0]);

        let own = &view.quotes[0];
        assert!(own.is_own_platform);
        let checkout = own.checkout_url.as_ref().unwrap();
        assert!(checkout.contains("product=iPhone%2016%20Pro%20Max"));
        assert!(checkout.contains("amount=129999"));
        assert!(checkout.contains("email=shopper%40example.com"));

        let external = view.quotes.iter().find(|q| !q.is_own_platform).unwrap();
        assert!(external.checkout_url.is_none());
    }
}
