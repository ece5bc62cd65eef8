//! Rewards, their inventory and pricing, and reservations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::taxonomy::{Category, Tag};

/// Image attached to a catalogue entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Image URL.
    #[serde(deserialize_with = "super::nullable")]
    pub url: String,
    /// Image role, e.g. `reward_thumbnail`.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "super::nullable")]
    pub image_type: String,
}

/// Brand a reward is sold under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    /// Brand id.
    pub id: u64,
    /// Brand name.
    #[serde(deserialize_with = "super::nullable")]
    pub name: String,
}

/// One way of paying for a reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPrice {
    /// Price id.
    pub id: u64,
    /// Price identifier.
    pub identifier: Option<String>,
    /// ISO currency code.
    pub currency_code: Option<String>,
    /// Cash price.
    pub price: Option<String>,
    /// Points price.
    pub points: Option<i64>,
    /// Currency of the reward value.
    pub reward_currency: Option<String>,
    /// Value of the reward.
    pub reward_amount: Option<String>,
    /// Program the points are drawn from.
    pub loyalty_program_id: Option<u64>,
}

/// Error the provider attaches when a per-user limit is hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryLimitError {
    /// Provider error code.
    pub code: Option<i64>,
    /// Provider message.
    pub message: Option<String>,
}

/// Remaining allowance for a limited reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryBalance {
    /// Units still available.
    pub available_amount: Option<i64>,
    /// `account_lifetime` or `account_interval`.
    pub limit_type: Option<String>,
    /// Why the limit applies, if it is exhausted.
    pub limit_error_klass: Option<InventoryLimitError>,
}

/// Stock and limit state for a reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardInventory {
    /// Global stock.
    pub reward_total_limit: Option<i64>,
    /// Global stock remaining.
    pub reward_total_balance: Option<i64>,
    /// Length of a limit period.
    pub minutes_per_period: Option<i64>,
    /// Start of the current period.
    pub period_start: Option<DateTime<Utc>>,
    /// Issues allowed per period.
    pub reward_limit_per_period: Option<i64>,
    /// Issues remaining this period.
    pub reward_limit_per_period_balance: Option<i64>,
    /// Issues allowed per user.
    pub reward_limit_per_user: Option<i64>,
    /// Per-user allowance.
    pub reward_limit_per_user_balance: Option<InventoryBalance>,
    /// Length of a per-user period.
    pub minutes_per_user_period: Option<i64>,
    /// Start of the current per-user period.
    pub per_user_period_start: Option<DateTime<Utc>>,
    /// Issues allowed per user per period.
    pub reward_limit_per_user_per_period: Option<i64>,
    /// Per-user allowance this period.
    pub reward_limit_per_user_per_period_balance: Option<InventoryBalance>,
}

/// Loyalty tier a reward is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardLoyaltyScope {
    /// Loyalty program id.
    pub loyalty_id: u64,
    /// Whether the user has reached the tier.
    #[serde(deserialize_with = "super::nullable")]
    pub attained: bool,
    /// Program name.
    pub loyalty_name: Option<String>,
    /// Points needed to redeem.
    pub loyalty_points_required_for_redemption: Option<i64>,
    /// Visible before the tier is reached.
    #[serde(deserialize_with = "super::nullable")]
    pub sneak_peek: bool,
}

/// Catalogue reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    /// Reward id.
    pub id: u64,
    /// Display name.
    #[serde(deserialize_with = "super::nullable")]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Secondary title.
    pub subtitle: Option<String>,
    /// Whether the reward can be issued right now.
    #[serde(deserialize_with = "super::nullable")]
    pub operating_now: bool,
    /// Redemption instructions.
    pub steps_to_redeem: Option<String>,
    /// Merchant id.
    pub merchant_id: Option<u64>,
    /// Merchant name.
    pub merchant_name: Option<String>,
    /// Merchant website.
    pub merchant_website: Option<String>,
    /// Merchant logo.
    pub merchant_logo_url: Option<String>,
    /// Alternative merchant name.
    pub alt_merchant_name: Option<String>,
    /// Alternative merchant website.
    pub alt_merchant_website: Option<String>,
    /// Alternative merchant text.
    pub alt_merchant_text: Option<String>,
    /// Only redeemable online.
    #[serde(deserialize_with = "super::nullable")]
    pub ecommerce_only: bool,
    /// Brands.
    #[serde(deserialize_with = "super::nullable")]
    pub brands: Vec<Brand>,
    /// Validity start.
    pub valid_from: Option<DateTime<Utc>>,
    /// Validity end.
    pub valid_to: Option<DateTime<Utc>>,
    /// Sale start.
    pub selling_from: Option<DateTime<Utc>>,
    /// Sale end.
    pub selling_to: Option<DateTime<Utc>>,
    /// Whether the current user may obtain it.
    #[serde(deserialize_with = "super::nullable")]
    pub eligible: bool,
    /// Images.
    #[serde(deserialize_with = "super::nullable")]
    pub images: Vec<Image>,
    /// Stock and limits.
    pub inventory: Option<RewardInventory>,
    /// Prices.
    #[serde(rename = "reward_price")]
    #[serde(deserialize_with = "super::nullable")]
    pub reward_prices: Vec<RewardPrice>,
    /// Tenant-defined fields.
    pub custom_fields: Value,
    /// Terms and conditions.
    pub terms_and_conditions: Option<String>,
    /// Tier restrictions.
    #[serde(deserialize_with = "super::nullable")]
    pub loyalty: Vec<RewardLoyaltyScope>,
    /// Tags.
    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<Tag>,
    /// Categories.
    #[serde(deserialize_with = "super::nullable")]
    pub category_tags: Vec<Category>,
    /// Can be gifted.
    #[serde(deserialize_with = "super::nullable")]
    pub is_giftable: bool,
    /// Marked as favourite by the user.
    #[serde(deserialize_with = "super::nullable")]
    pub is_favourite: bool,
}

/// Hold on a reward created by a reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardReservation {
    /// Reservation id, used to confirm or release.
    pub id: u64,
    /// Code of the held voucher.
    pub voucher_code: Option<String>,
    /// Key of the held voucher.
    pub voucher_key: Option<String>,
    /// Provider state of the held voucher.
    pub state: Option<String>,
    /// Voucher type.
    pub voucher_type: Option<String>,
    /// Tenant-defined fields.
    pub custom_fields: Value,
    /// When the hold lapses.
    pub reserved_expires_at: Option<DateTime<Utc>>,
}

/// One hit of a reward search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Kind of document matched.
    pub document_type: Option<String>,
    /// Relevance score.
    pub score: Option<f64>,
    /// Matched reward.
    pub reward: Reward,
}
