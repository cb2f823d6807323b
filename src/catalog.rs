//! Catalog browsing: narrows a product list by category, price band and name,
//! then orders it by the selected sort key.

use std::{fmt::Display, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IntoDeserializer, value::Error as ValueError},
};
use utoipa::ToSchema;

use crate::models::Product;

/// Category selector value meaning "every category".
pub const ALL_CATEGORIES: i32 = 0;

/// Lower and upper price-band bounds in cents ($25 and $75).
pub const BAND_LOW: i64 = 2_500;
pub const BAND_HIGH: i64 = 7_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Best sellers first.
    #[default]
    Featured,
    Newest,
    PriceDesc,
    PriceAsc,
}

impl SortBy {
    /// Stable, so equal keys keep their incoming order.
    pub fn sort(self, products: &mut [Product]) {
        match self {
            SortBy::Featured => products.sort_by(|a, b| b.sold.cmp(&a.sold)),
            SortBy::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortBy::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    /// Strictly below $25.
    Below,
    /// $25 to $75, both ends included.
    Between,
    /// Strictly above $75.
    Above,
}

impl FromStr for SortBy {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

impl PriceBand {
    pub fn contains(self, price: i64) -> bool {
        match self {
            PriceBand::Below => price < BAND_LOW,
            PriceBand::Between => (BAND_LOW..=BAND_HIGH).contains(&price),
            PriceBand::Above => price > BAND_HIGH,
        }
    }
}

impl FromStr for PriceBand {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_range: Option<PriceBand>,
    /// Case-insensitive substring of the product name.
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub sort_by: SortBy,
}

/// Unset selectors arrive as `key=` in the query string and mean "no constraint".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    empty_as_none(deserializer).map(Option::unwrap_or_default)
}

impl CatalogFilter {
    fn category(&self) -> Option<i32> {
        self.category_id.filter(|id| *id != ALL_CATEGORIES)
    }

    pub fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(category) = self.category()
            && product.category_id != Some(category)
        {
            return false;
        }
        if let Some(band) = self.price_range
            && !band.contains(product.price)
        {
            return false;
        }
        match needle {
            Some(needle) => product.name.to_lowercase().contains(needle),
            None => true,
        }
    }
}

/// Returns the filtered and sorted view; the input is left untouched.
pub fn apply_filter(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
    let needle = filter
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut items: Vec<Product> = products
        .iter()
        .filter(|product| filter.matches(product, needle.as_deref()))
        .cloned()
        .collect();
    filter.sort_by.sort(&mut items);
    items
}
