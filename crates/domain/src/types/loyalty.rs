//! Loyalty programs, balances and point transactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transaction::Transaction;

/// Balance held in one point currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointBalance {
    /// Point currency identifier.
    pub identifier: Option<String>,
    /// Points held.
    pub points: Option<f64>,
}

/// Points that lapse on a given date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryPoint {
    /// Expiry date.
    pub date: Option<DateTime<Utc>>,
    /// Points lapsing on that date.
    pub aggregated_points: f64,
}

/// Loyalty program membership of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyProgram {
    /// Program id.
    pub id: u64,
    /// Program name.
    pub name: Option<String>,
    /// Member number.
    pub membership_number: Option<String>,
    /// Spendable points.
    pub points_balance: Option<f64>,
    /// Points counted towards tiers.
    pub tier_points: Option<f64>,
    /// Balance per point currency.
    #[serde(deserialize_with = "super::nullable")]
    pub points_balances: Vec<PointBalance>,
    /// Upcoming expiries.
    #[serde(deserialize_with = "super::nullable")]
    pub aging_points: Vec<ExpiryPoint>,
}

/// Point movement on a loyalty program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyTransaction {
    /// Transaction id, used to release a reservation.
    pub id: u64,
    /// Program the points belong to.
    pub loyalty_program_id: Option<u64>,
    /// Signed point delta.
    pub points: Option<f64>,
    /// Tenant-defined properties.
    pub properties: Value,
    /// Caller-supplied reference.
    pub transaction_reference: Option<String>,
    /// When the movement happened.
    pub transacted_at: Option<DateTime<Utc>>,
}

/// Purchase details attached to a history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyTransactionDetail {
    /// Detail type, e.g. `transaction`.
    #[serde(rename = "type")]
    pub detail_type: Option<String>,
    /// Underlying purchase.
    pub data: Option<Transaction>,
}

/// One row of the user's point history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyTransactionHistoryEntry {
    /// Entry id.
    pub id: u64,
    /// Point delta.
    pub amount: Option<f64>,
    /// Account identifier.
    pub identifier: Option<String>,
    /// Program id.
    pub loyalty_id: Option<u64>,
    /// Program name.
    pub loyalty_name: Option<String>,
    /// Entry name.
    pub name: Option<String>,
    /// Tenant-defined properties.
    pub properties: Value,
    /// Earn rule that produced the entry.
    pub rule_id: Option<u64>,
    /// Earn rule name.
    pub rule_name: Option<String>,
    /// Purchase amount as text.
    pub transacted_amount: Option<String>,
    /// When the entry was recorded.
    pub transacted_at: Option<DateTime<Utc>>,
    /// Purchase amount in cents.
    pub transacted_cents: Option<i64>,
    /// Purchase currency.
    pub transacted_currency: Option<String>,
    /// Linked purchase.
    pub transaction_details: Option<LoyaltyTransactionDetail>,
}
