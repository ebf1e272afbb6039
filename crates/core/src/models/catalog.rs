//! Static catalogs: discount-code tiers, point-shop items, shop products

use crate::types::{Percent, Points, Price};
use serde::{Deserialize, Serialize};

/// A redeemable discount-code tier for the official website
#[derive(Debug, Clone)]
pub struct DiscountCatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: Points,
    pub discount: Percent,
}

/// Discount codes that can be redeemed with points
pub fn discount_code_catalog() -> Vec<DiscountCatalogEntry> {
    vec![
        DiscountCatalogEntry { id: "discount10", name: "10% Off Discount Code", cost: Points(1000), discount: Percent(10) },
        DiscountCatalogEntry { id: "discount15", name: "15% Off Discount Code", cost: Points(1500), discount: Percent(15) },
        DiscountCatalogEntry { id: "discount20", name: "20% Off Discount Code", cost: Points(2000), discount: Percent(20) },
        DiscountCatalogEntry { id: "discount25", name: "25% Off Discount Code", cost: Points(2500), discount: Percent(25) },
        DiscountCatalogEntry { id: "discount30", name: "30% Off Discount Code", cost: Points(3000), discount: Percent(30) },
    ]
}

/// An item purchasable with points from the in-app points shop
#[derive(Debug, Clone)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: Points,
    pub description: &'static str,
}

/// Items redeemable for points (issued as partner coupons)
pub fn shop_item_catalog() -> Vec<ShopItem> {
    vec![
        ShopItem { id: "premium_month", name: "FitLedger Premium (1 Month)", cost: Points(2500), description: "1-month premium app access coupon" },
        ShopItem { id: "on_whey", name: "Optimum Nutrition 20% Off", cost: Points(3000), description: "Discount on whey protein & supplements" },
        ShopItem { id: "dymatize_iso", name: "Dymatize ISO100 Coupon", cost: Points(5050), description: "15% off premium whey isolate" },
        ShopItem { id: "bsn_deal", name: "BSN Supplements Deal", cost: Points(2000), description: "25% off pre-workout & creatine" },
        ShopItem { id: "muscletech_bundle", name: "MuscleTech Bundle Offer", cost: Points(3500), description: "30% off protein + pre-workout combo" },
        ShopItem { id: "c4_energy", name: "Cellucor C4 Energy Discount", cost: Points(1500), description: "20% off C4 pre-workout series" },
        ShopItem { id: "quest_bars", name: "Quest Nutrition Bars", cost: Points(2000), description: "15% off protein bars & snacks" },
        ShopItem { id: "nike_gear", name: "Nike Training Gear 15% Off", cost: Points(4000), description: "Discount on Nike fitness apparel" },
        ShopItem { id: "adidas_wear", name: "Adidas Workout Clothes", cost: Points(3500), description: "20% off Adidas activewear" },
        ShopItem { id: "ua_gear", name: "Under Armour Gear Deal", cost: Points(3000), description: "25% off UA performance wear" },
        ShopItem { id: "bowflex_coupon", name: "Bowflex Equipment Coupon", cost: Points(5000), description: "$100 off home gym equipment" },
        ShopItem { id: "bands_set", name: "Resistance Bands Set", cost: Points(1200), description: "Free premium resistance band set" },
        ShopItem { id: "yoga_mat", name: "Yoga Mat Premium", cost: Points(1000), description: "High-quality eco-friendly yoga mat" },
    ]
}

/// Category of a currency-priced shop product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Supplements,
    Equipment,
    Apparel,
    Nutrition,
    Premium,
}

/// A currency-priced product on the shop screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProduct {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: ProductCategory,
    pub price: Price,
    pub original_price: Price,
    /// Average rating out of 5, stored in tenths (48 = 4.8 stars)
    pub rating_tenths: u16,
    pub discount: Percent,
    pub in_stock: bool,
}

/// Product list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    Rating,
    BestDiscount,
}

/// Filter by category (None = all) and case-insensitive name/brand search
pub fn filter_products<'a>(
    products: &'a [ShopProduct],
    category: Option<ProductCategory>,
    search: &str,
) -> Vec<&'a ShopProduct> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|product| category.map_or(true, |c| product.category == c))
        .filter(|product| {
            needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sort a filtered product list. `Featured` preserves the catalog order.
pub fn sort_products(products: &mut [&ShopProduct], sort_by: SortBy) {
    match sort_by {
        SortBy::Featured => {}
        SortBy::PriceLowToHigh => products.sort_by_key(|p| p.price),
        SortBy::PriceHighToLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => products.sort_by(|a, b| b.rating_tenths.cmp(&a.rating_tenths)),
        SortBy::BestDiscount => products.sort_by(|a, b| b.discount.cmp(&a.discount)),
    }
}
