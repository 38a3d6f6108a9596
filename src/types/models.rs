//! Part records returned by the Swarm API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{null_as_default, utc_timestamp};

/// A part offered by a supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartNumber {
    /// Swarm identifier of the manufacturer part number.
    pub swarm_part_number_manufacturer_id: Option<i64>,
    /// Base part number.
    pub base_part_number: Option<String>,
    /// Manufacturer name.
    pub manufacturer: Option<String>,
    /// Manufacturer's part number.
    pub manufacturer_part_number: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Part type category.
    pub part_type: Option<String>,
    /// Mounting type.
    pub mounting_type: Option<String>,
    /// Package type.
    pub package_type: Option<String>,
    /// Supplier name.
    pub supplier: Option<String>,
    /// Supplier's part number.
    pub supplier_part_number: Option<String>,
    /// Unit cost.
    #[serde(deserialize_with = "null_as_default")]
    pub cost: f64,
    /// Currency of `cost`.
    pub currency: Option<String>,
    /// Quantity available from the supplier.
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_available: i64,
    /// Minimum order quantity.
    #[serde(deserialize_with = "null_as_default")]
    pub minimum_order_quantity: i64,
    /// Stock available at the factory.
    pub factory_stock_available: Option<i64>,
    /// Factory lead time.
    pub factory_lead_time: Option<String>,
    /// Lifecycle status.
    pub status: Option<String>,
    /// Product page.
    pub product_url: Option<String>,
    /// Primary image.
    pub image_url: Option<String>,
    /// Datasheet links.
    #[serde(deserialize_with = "null_as_default")]
    pub datasheet_urls: Vec<String>,
    /// Search keywords.
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// When the record was created.
    #[serde(deserialize_with = "utc_timestamp")]
    pub date_created_utc: Option<DateTime<Utc>>,
}

/// Part information lookup results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartResults {
    /// Parts matching the requested part number.
    #[serde(deserialize_with = "null_as_default")]
    pub parts: Vec<PartNumber>,
}
