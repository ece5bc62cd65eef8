//! Merchants and merchant staff accounts

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reward::Image;
use super::taxonomy::{Category, Tag};

/// Merchant listed in the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Merchant {
    /// Merchant id.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Online-only flag as sent by the provider.
    pub ecommerce_only: Option<Value>,
    /// Images.
    #[serde(deserialize_with = "super::nullable")]
    pub images: Vec<Image>,
    /// Website.
    pub website: Option<String>,
    /// Tenant-defined fields.
    pub custom_fields: Value,
    /// Categories.
    #[serde(deserialize_with = "super::nullable")]
    pub category_tags: Vec<Category>,
    /// Marked as favourite by the user.
    #[serde(deserialize_with = "super::nullable")]
    pub is_favorite: bool,
    /// Promoted by the tenant.
    #[serde(deserialize_with = "super::nullable")]
    pub is_featured: bool,
    /// Tags.
    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<Tag>,
}

/// Staff account created for a merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantInfo {
    /// Staff account id.
    pub id: u64,
    /// Merchant the account belongs to.
    pub merchant_account_id: Option<u64>,
    /// Email.
    pub email: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Mobile number.
    pub mobile: Option<String>,
}
