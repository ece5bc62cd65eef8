//! Vouchers and their redemption lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reward::Reward;

/// Provider-side state of a voucher.
///
/// `issued → redemption_in_progress → redeemed`; releasing a reservation
/// moves `redemption_in_progress` back to `issued`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherState {
    /// Owned and unused.
    #[default]
    Issued,
    /// Reserved at a point of sale, awaiting confirm or release.
    RedemptionInProgress,
    /// Consumed.
    Redeemed,
    /// Reservation handed back.
    Released,
    /// State added by the provider after this SDK was built.
    #[serde(other)]
    Unknown,
}

impl VoucherState {
    /// Whether a reservation may be placed on a voucher in this state.
    pub const fn can_reserve(self) -> bool {
        matches!(self, Self::Issued | Self::Released)
    }

    /// Whether a reservation on this voucher can still be confirmed or released.
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::RedemptionInProgress)
    }
}

/// Account that owns a voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherOwner {
    /// External identifier of the owner.
    pub identifier: Option<String>,
}

/// Issued reward instance held by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voucher {
    /// Voucher id.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Reward the voucher was issued from.
    pub reward: Option<Reward>,
    /// Lifecycle state.
    #[serde(deserialize_with = "super::nullable")]
    pub state: VoucherState,
    /// Expiry of the voucher itself.
    pub voucher_expires_at: Option<DateTime<Utc>>,
    /// Validity start.
    pub valid_from: Option<DateTime<Utc>>,
    /// Validity end.
    pub valid_to: Option<DateTime<Utc>>,
    /// Owner.
    pub user_account: Option<VoucherOwner>,
    /// Redemption code.
    pub voucher_code: Option<String>,
    /// Code type, usually `code`.
    pub voucher_type: Option<String>,
    /// When a pending reservation lapses.
    pub reservation_expires_at: Option<DateTime<Utc>>,
    /// When a reward hold lapses.
    pub reserved_expires_at: Option<DateTime<Utc>>,
    /// When the voucher was redeemed.
    pub redemption_date: Option<DateTime<Utc>>,
    /// When the voucher was issued.
    pub issued_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_parse_from_wire_names() {
        let voucher: Voucher = serde_json::from_value(serde_json::json!({
            "id": 10,
            "state": "redemption_in_progress"
        }))
        .unwrap();
        assert_eq!(voucher.state, VoucherState::RedemptionInProgress);
        assert!(voucher.state.is_reserved());
        assert!(!voucher.state.can_reserve());
    }

    #[test]
    fn unknown_state_does_not_fail_parsing() {
        let voucher: Voucher =
            serde_json::from_value(serde_json::json!({"id": 1, "state": "gifted"})).unwrap();
        assert_eq!(voucher.state, VoucherState::Unknown);
    }

    #[test]
    fn missing_state_defaults_to_issued() {
        let voucher: Voucher = serde_json::from_value(serde_json::json!({"id": 1})).unwrap();
        assert_eq!(voucher.state, VoucherState::Issued);
        assert!(voucher.state.can_reserve());
    }
}
