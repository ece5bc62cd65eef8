//! Purchase transactions recorded at a point of sale

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Purchase recorded against a user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Transaction id.
    pub id: u64,
    /// Account the purchase belongs to. Numeric or textual depending on tenant.
    pub user_account_id: Value,
    /// `purchase` or a tenant-defined type.
    pub transaction_type: Option<String>,
    /// Purchase amount.
    pub amount: Option<f64>,
    /// Purchase currency.
    pub currency: Option<String>,
    /// When the purchase happened.
    pub transaction_date: Option<DateTime<Utc>>,
    /// Workflow that processed it.
    pub workflow_id: Option<u64>,
    /// Tenant-defined properties.
    pub properties: Value,
    /// Caller-supplied reference.
    pub transaction_reference: Option<String>,
    /// Points earned by the purchase.
    pub points_earned: Option<f64>,
    /// Merchant staff account that recorded it.
    pub merchant_user_account_id: Option<u64>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    pub updated_at: Option<DateTime<Utc>>,
}
