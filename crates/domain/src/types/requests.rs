//! Request bodies for POS-side write operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identity::Identification;
use super::invoice::InvoiceItemType;

/// Transaction type the provider assumes when none is given.
pub const PURCHASE: &str = "purchase";

/// Purchase details of a [`TransactionRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequestData {
    /// `purchase` or a tenant-defined type.
    pub transaction_type: String,
    /// Caller reference, unique per purchase.
    pub transaction_reference: String,
    /// Purchase amount.
    pub amount: f64,
    /// ISO currency code.
    pub currency: String,
    /// When the purchase happened.
    pub transaction_date: DateTime<Utc>,
    /// Tenant-defined properties.
    pub properties: Map<String, Value>,
}

/// Body of `POST /v4/pos/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Account the purchase is recorded against.
    pub user_account_id: String,
    /// Purchase details.
    pub transaction_data: TransactionRequestData,
}

impl TransactionRequest {
    /// Plain purchase dated now.
    pub fn purchase(
        user_account_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        transaction_reference: impl Into<String>,
        properties: Map<String, Value>,
    ) -> Self {
        Self::custom(
            PURCHASE,
            user_account_id,
            amount,
            currency,
            transaction_reference,
            properties,
            Utc::now(),
        )
    }

    /// Transaction of an arbitrary type and date.
    pub fn custom(
        transaction_type: impl Into<String>,
        user_account_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        transaction_reference: impl Into<String>,
        properties: Map<String, Value>,
        transaction_date: DateTime<Utc>,
    ) -> Self {
        Self {
            user_account_id: user_account_id.into(),
            transaction_data: TransactionRequestData {
                transaction_type: transaction_type.into(),
                transaction_reference: transaction_reference.into(),
                amount,
                currency: currency.into(),
                transaction_date,
                properties,
            },
        }
    }
}

/// Account reference inside POS request bodies: `{"id": n}` or
/// `{"identifier": s}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserAccountRef {
    /// By provider id.
    Id {
        /// Account id.
        id: u64,
    },
    /// By external identifier.
    Identifier {
        /// External identifier.
        identifier: String,
    },
}

impl From<&Identification> for UserAccountRef {
    fn from(identification: &Identification) -> Self {
        match identification {
            Identification::Id { id } => Self::Id { id: *id },
            Identification::Identifier { identifier } => {
                Self::Identifier { identifier: identifier.clone() }
            }
        }
    }
}

impl From<Identification> for UserAccountRef {
    fn from(identification: Identification) -> Self {
        Self::from(&identification)
    }
}

/// Body of `POST /v4/pos/loyalty_transactions`: a hard earn or burn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyTransactionRequest {
    /// Account whose balance moves.
    pub user_account: UserAccountRef,
    /// Program the points belong to.
    pub loyalty_program_id: u64,
    /// Signed point delta.
    pub points: f64,
    /// Caller reference.
    pub transaction_reference: Option<String>,
    /// Tenant-defined type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    /// Tenant-defined properties.
    pub properties: Map<String, Value>,
}

impl LoyaltyTransactionRequest {
    /// Point movement with the given sign.
    pub fn new(
        user_account: impl Into<UserAccountRef>,
        loyalty_program_id: u64,
        points: f64,
        transaction_reference: Option<String>,
    ) -> Self {
        Self {
            user_account: user_account.into(),
            loyalty_program_id,
            points,
            transaction_reference,
            transaction_type: None,
            properties: Map::new(),
        }
    }

    /// Deduct `points` (always sent negative).
    pub fn burn(user_account: impl Into<UserAccountRef>, loyalty_program_id: u64, points: f64) -> Self {
        Self::new(user_account, loyalty_program_id, -points.abs(), None)
    }

    /// Award `points` (always sent positive).
    pub fn earn(user_account: impl Into<UserAccountRef>, loyalty_program_id: u64, points: f64) -> Self {
        Self::new(user_account, loyalty_program_id, points.abs(), None)
    }

    /// Set the transaction type.
    #[must_use]
    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    /// Set the caller reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }
}

/// Body of `POST /v4/pos/loyalty_transactions/reserve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyReservationRequest {
    /// Account whose points are held.
    pub user_account: UserAccountRef,
    /// Program the points belong to.
    pub loyalty_program_id: u64,
    /// Points to hold.
    pub points: f64,
}

impl LoyaltyReservationRequest {
    /// Hold `points` on the account.
    pub fn new(user_account: impl Into<UserAccountRef>, loyalty_program_id: u64, points: f64) -> Self {
        Self { user_account: user_account.into(), loyalty_program_id, points }
    }
}

/// Reserved item consumed by an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceUsedItem {
    /// Voucher or loyalty transaction id.
    pub item_id: u64,
    /// What the id refers to.
    pub item_type: InvoiceItemType,
}

impl InvoiceUsedItem {
    /// A reserved voucher.
    pub const fn reward(voucher_id: u64) -> Self {
        Self { item_id: voucher_id, item_type: InvoiceItemType::Reward }
    }

    /// A loyalty point reservation.
    pub const fn points(loyalty_transaction_id: u64) -> Self {
        Self { item_id: loyalty_transaction_id, item_type: InvoiceItemType::StoredValue }
    }
}

/// Caller-side description of a purchase settled by an invoice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceTransactionInput {
    /// Defaults to `purchase`.
    pub transaction_type: Option<String>,
    /// Caller reference.
    pub transaction_reference: String,
    /// ISO currency code.
    pub currency: String,
    /// Voucher codes applied to the purchase.
    pub applied_vouchers: Vec<String>,
    /// Points applied to the purchase.
    pub applied_points: Option<f64>,
    /// Extra tenant-defined properties.
    pub properties: Map<String, Value>,
}

/// Purchase line of an [`InvoiceRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTransactionData {
    /// `purchase` unless overridden.
    pub transaction_type: String,
    /// Caller reference.
    pub transaction_reference: String,
    /// ISO currency code.
    pub currency: String,
    /// Purchase amount.
    pub amount: f64,
    /// Merchant the purchase was made at.
    pub merchant_identifier: String,
    /// Tenant properties plus `applied_vouchers`, `applied_points` and
    /// `merchant_identifier`.
    pub properties: Map<String, Value>,
}

impl InvoiceTransactionData {
    /// Build the purchase line, folding applied vouchers and points into the
    /// properties the provider expects.
    pub fn new(amount: f64, merchant_identifier: impl Into<String>, input: InvoiceTransactionInput) -> Self {
        let merchant_identifier = merchant_identifier.into();
        let mut properties = input.properties;
        if !input.applied_vouchers.is_empty() {
            properties.insert(
                "applied_vouchers".to_string(),
                Value::String(input.applied_vouchers.join(",")),
            );
        }
        if let Some(points) = input.applied_points {
            properties.insert("applied_points".to_string(), Value::String(format_points(points)));
        }
        properties
            .insert("merchant_identifier".to_string(), Value::String(merchant_identifier.clone()));

        Self {
            transaction_type: input.transaction_type.unwrap_or_else(|| PURCHASE.to_string()),
            transaction_reference: input.transaction_reference,
            currency: input.currency,
            amount,
            merchant_identifier,
            properties,
        }
    }
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 && points.abs() < 1e15 {
        format!("{points:.0}")
    } else {
        points.to_string()
    }
}

/// Body of `POST /v4/pos/invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Account the invoice settles for.
    pub user_account: UserAccountRef,
    /// Purchases covered by the invoice.
    pub transaction_data: Vec<InvoiceTransactionData>,
    /// Reserved vouchers and points consumed.
    pub used_items: Vec<InvoiceUsedItem>,
}

impl InvoiceRequest {
    /// Empty invoice for an account.
    pub fn new(user_account: impl Into<UserAccountRef>) -> Self {
        Self { user_account: user_account.into(), transaction_data: Vec::new(), used_items: Vec::new() }
    }

    /// Append purchase lines.
    #[must_use]
    pub fn add_transactions(mut self, transactions: impl IntoIterator<Item = InvoiceTransactionData>) -> Self {
        self.transaction_data.extend(transactions);
        self
    }

    /// Append consumed items.
    #[must_use]
    pub fn used(mut self, items: impl IntoIterator<Item = InvoiceUsedItem>) -> Self {
        self.used_items.extend(items);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_account_ref_serializes_without_tag() {
        let by_id = UserAccountRef::from(Identification::id(1));
        let by_identifier = UserAccountRef::from(Identification::identifier("0001"));

        assert_eq!(serde_json::to_value(by_id).unwrap(), json!({"id": 1}));
        assert_eq!(serde_json::to_value(by_identifier).unwrap(), json!({"identifier": "0001"}));
    }

    #[test]
    fn burn_is_always_negative_and_earn_positive() {
        let account = Identification::identifier("0001");
        assert_eq!(LoyaltyTransactionRequest::burn(&account, 4567, 200.0).points, -200.0);
        assert_eq!(LoyaltyTransactionRequest::burn(&account, 4567, -200.0).points, -200.0);
        assert_eq!(LoyaltyTransactionRequest::earn(&account, 4567, -100.0).points, 100.0);
    }

    #[test]
    fn loyalty_request_defaults() {
        let request = LoyaltyTransactionRequest::new(Identification::identifier("0001"), 1234, 50.0, None);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "user_account": {"identifier": "0001"},
                "loyalty_program_id": 1234,
                "points": 50.0,
                "transaction_reference": null,
                "properties": {}
            })
        );

        let typed = request.with_transaction_type("purchase");
        assert_eq!(typed.transaction_type.as_deref(), Some("purchase"));
    }

    #[test]
    fn invoice_transaction_folds_applied_items_into_properties() {
        let input = InvoiceTransactionInput {
            transaction_type: Some("purchase-overall".into()),
            transaction_reference: "transaction-ref-001".into(),
            currency: "THB".into(),
            applied_vouchers: vec!["001".into(), "002".into()],
            applied_points: Some(200.0),
            properties: Map::new(),
        };
        let data = InvoiceTransactionData::new(200.0, "merchant-0001", input);

        assert_eq!(data.transaction_type, "purchase-overall");
        assert_eq!(
            Value::Object(data.properties),
            json!({
                "applied_vouchers": "001,002",
                "applied_points": "200",
                "merchant_identifier": "merchant-0001"
            })
        );
    }

    #[test]
    fn invoice_transaction_omits_unset_applied_items() {
        let input = InvoiceTransactionInput {
            transaction_reference: "transaction-ref-001".into(),
            currency: "THB".into(),
            ..Default::default()
        };
        let data = InvoiceTransactionData::new(200.0, "merchant-0001", input);

        assert_eq!(data.transaction_type, PURCHASE);
        assert_eq!(Value::Object(data.properties), json!({"merchant_identifier": "merchant-0001"}));
    }

    #[test]
    fn invoice_request_accumulates_lines_and_items() {
        let line = InvoiceTransactionData::new(
            1234.0,
            "merchant-0001",
            InvoiceTransactionInput { currency: "THB".into(), ..Default::default() },
        );
        let request = InvoiceRequest::new(Identification::identifier("0001"))
            .add_transactions([line])
            .used([InvoiceUsedItem::reward(10), InvoiceUsedItem::points(321)]);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["user_account"], json!({"identifier": "0001"}));
        assert_eq!(body["transaction_data"].as_array().map(Vec::len), Some(1));
        assert_eq!(
            body["used_items"],
            json!([
                {"item_id": 10, "item_type": "Reward::Transaction"},
                {"item_id": 321, "item_type": "StoredValue::Transaction"}
            ])
        );
    }

    #[test]
    fn purchase_uses_purchase_type() {
        let request = TransactionRequest::purchase("user-account-001", 123.0, "THB", "ref-1", Map::new());
        assert_eq!(request.transaction_data.transaction_type, PURCHASE);
        assert_eq!(request.user_account_id, "user-account-001");
    }
}
