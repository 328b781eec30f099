//! Static gadget catalog.
//!
//! The home grid and the search suggestions run over this in-memory list -
//! no backend round trip. Live per-platform quotes only enter the picture
//! when a visitor searches, via the products API.

use std::sync::LazyLock;

use gadgetmart_core::Paise;

/// Stock imagery, indexed by [`ImageKind`].
pub const GADGET_IMAGES: [&str; 10] = [
    "https://images.unsplash.com/photo-1592899677977-9c10ca588bbd?auto=format&fit=crop&q=80&w=800", // iPhone
    "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?auto=format&fit=crop&q=80&w=800", // MacBook
    "https://images.unsplash.com/photo-1523206489230-c012c64b2b48?auto=format&fit=crop&q=80&w=800", // Phone
    "https://images.unsplash.com/photo-1544117519-31a4b719223d?auto=format&fit=crop&q=80&w=800", // Apple Watch
    "https://images.unsplash.com/photo-1603351154351-5e2d0600bb77?auto=format&fit=crop&q=80&w=800", // AirPods
    "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?auto=format&fit=crop&q=80&w=800", // iPad
    "https://images.unsplash.com/photo-1605462863863-10d9e47e15ee?auto=format&fit=crop&q=80&w=800", // Camera
    "https://images.unsplash.com/photo-1588872657578-7efd1f1555ed?auto=format&fit=crop&q=80&w=800", // Laptop
    "https://images.unsplash.com/photo-1606144042614-b2417e99c4e3?auto=format&fit=crop&q=80&w=800", // Gaming
    "https://images.unsplash.com/photo-1589003077984-894e133dabab?auto=format&fit=crop&q=80&w=800", // Speaker
];

/// Index into [`GADGET_IMAGES`] by subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum ImageKind {
    IPhone = 0,
    MacBook = 1,
    Phone = 2,
    Watch = 3,
    AirPods = 4,
    IPad = 5,
    Camera = 6,
    Laptop = 7,
    Gaming = 8,
    Speaker = 9,
}

/// A browseable product category.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Categories shown on the home page.
pub const GADGET_CATEGORIES: [Category; 5] = [
    Category { name: "Smartphones", icon: "📱" },
    Category { name: "Laptops", icon: "💻" },
    Category { name: "Audio", icon: "🎧" },
    Category { name: "Gaming", icon: "🎮" },
    Category { name: "Cameras", icon: "📷" },
];

/// Brands featured in the footer strip.
pub const BRANDS: [&str; 6] = ["Apple", "Samsung", "Sony", "Dell", "Asus", "Microsoft"];

/// A catalog gadget.
#[derive(Debug, Clone)]
pub struct Gadget {
    pub name: String,
    pub brand: &'static str,
    pub price: Paise,
    pub icon: &'static str,
    pub image: &'static str,
}

/// Pick a stock image for a product by keyword.
///
/// Matching is case-insensitive substring over the name, then the category.
/// Rule order matters: "AirPods Max" must hit the earbuds rule before the
/// generic laptop/phone rules see it.
#[must_use]
pub fn image_path(name: &str, category: &str) -> &'static str {
    let n = name.to_lowercase();
    let c = category.to_lowercase();

    let kind = if n.contains("airpod") || n.contains("buds") || n.contains("pods") {
        ImageKind::AirPods
    } else if n.contains("watch") || n.contains("wearable") {
        ImageKind::Watch
    } else if n.contains("iphone") {
        ImageKind::IPhone
    } else if n.contains("macbook") {
        ImageKind::MacBook
    } else if n.contains("ipad") || n.contains("pad") {
        ImageKind::IPad
    } else if n.contains("playstation")
        || n.contains("ps5")
        || n.contains("gaming")
        || n.contains("xbox")
        || c.contains("gaming")
    {
        ImageKind::Gaming
    } else if n.contains("laptop") || c.contains("laptops") {
        ImageKind::Laptop
    } else if n.contains("phone") || c.contains("smartphones") {
        ImageKind::Phone
    } else if n.contains("audio")
        || n.contains("headphone")
        || c.contains("audio")
        || n.contains("speaker")
    {
        ImageKind::Speaker
    } else if n.contains("camera") || c.contains("cameras") {
        ImageKind::Camera
    } else {
        ImageKind::Phone
    };

    GADGET_IMAGES[kind as usize]
}

const NEW_LAUNCH_NAMES: [&str; 20] = [
    "iPhone 16 Pro Max",
    "Samsung S25 Ultra",
    "MacBook Pro M4 Max",
    "ROG Ally X2",
    "Sony PS5 Pro Digital",
    "iPad Air M3 Pro",
    "Pixel 9 Pro XL",
    "Dell XPS 16",
    "AirPods Max 2026",
    "Nintendo Switch 2 OLED",
    "Surface Laptop 7",
    "Logitech MX Anywhere 4",
    "Sony A9 III",
    "DJI Mavic 4 Pro",
    "GoPro Hero 14 Black",
    "Razer Blade 18",
    "Apple Watch Ultra 3",
    "Bose QuietComfort Ultra",
    "HP Spectre x360",
    "Lenovo Legion 9i",
];

const NEW_LAUNCH_BRANDS: [&str; 15] = [
    "Apple",
    "Samsung",
    "ASUS",
    "Sony",
    "Google",
    "Dell",
    "Nintendo",
    "Microsoft",
    "Logitech",
    "DJI",
    "GoPro",
    "Razer",
    "Bose",
    "HP",
    "Lenovo",
];

const HOT_OFFER_NAMES: [&str; 20] = [
    "Galaxy Buds 3 Pro",
    "Logitech G Pro X Superlight",
    "Kindle Oasis 4",
    "Sony WH-Ultimate",
    "GoPro Hero 13 Mini",
    "Apple Watch SE 3",
    "Dyson V15 Detect",
    "Marshall Middleton",
    "Fitbit Sense 3",
    "Beats Solo 4",
    "Bose QC Comfort",
    "Razer Viper V3",
    "Samsung T9 4TB",
    "Keychron K2 Max",
    "Anker 737 Pro",
    "Ugreen Revodok",
    "Elgato Stream Deck +",
    "Shure SM7B Pro",
    "Philips Hue Sync",
    "Nanoleaf Shapes",
];

const HOT_OFFER_BRANDS: [&str; 19] = [
    "Samsung",
    "Logitech",
    "Amazon",
    "Sony",
    "GoPro",
    "Apple",
    "Dyson",
    "Marshall",
    "Fitbit",
    "Beats",
    "Bose",
    "Razer",
    "Keychron",
    "Anker",
    "Ugreen",
    "Elgato",
    "Shure",
    "Philips",
    "Nanoleaf",
];

/// Catalog size of each synthetic list.
const LIST_LEN: usize = 60;

static NEW_LAUNCHES: LazyLock<Vec<Gadget>> = LazyLock::new(|| {
    (0..LIST_LEN)
        .map(|i| {
            let base = NEW_LAUNCH_NAMES[i % NEW_LAUNCH_NAMES.len()];
            let name = if i >= NEW_LAUNCH_NAMES.len() {
                format!("{base} Gen {}", i / NEW_LAUNCH_NAMES.len() + 1)
            } else {
                base.to_string()
            };
            Gadget {
                name,
                brand: NEW_LAUNCH_BRANDS[i % NEW_LAUNCH_BRANDS.len()],
                price: Paise::from_rupees(89_999 + i as i64 * 3_500),
                icon: "📱",
                image: image_path(base, ""),
            }
        })
        .collect()
});

static HOT_OFFERS: LazyLock<Vec<Gadget>> = LazyLock::new(|| {
    (0..LIST_LEN)
        .map(|i| {
            let base = HOT_OFFER_NAMES[i % HOT_OFFER_NAMES.len()];
            let name = if i >= HOT_OFFER_NAMES.len() {
                format!("{base} (Hot Deal #{})", i + 1)
            } else {
                base.to_string()
            };
            Gadget {
                name,
                brand: HOT_OFFER_BRANDS[i % HOT_OFFER_BRANDS.len()],
                price: Paise::from_rupees(9_999 + i as i64 * 900),
                icon: "🎁",
                image: image_path(base, ""),
            }
        })
        .collect()
});

/// Freshly launched gadgets for the home grid.
#[must_use]
pub fn new_launches() -> &'static [Gadget] {
    &NEW_LAUNCHES
}

/// Discounted gadgets.
#[must_use]
pub fn hot_offers() -> &'static [Gadget] {
    &HOT_OFFERS
}

/// Search suggestions: case-insensitive name-substring matches across both
/// lists, capped at `limit`.
#[must_use]
pub fn suggestions(query: &str, limit: usize) -> Vec<&'static Gadget> {
    let needle = query.to_lowercase();
    new_launches()
        .iter()
        .chain(hot_offers().iter())
        .filter(|gadget| gadget.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
