//! Invoices created at a point of sale

use serde::{Deserialize, Serialize};

/// What an invoice line consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceItemType {
    /// A reserved voucher.
    #[serde(rename = "Reward::Transaction")]
    Reward,
    /// Reserved loyalty points.
    #[serde(rename = "StoredValue::Transaction")]
    StoredValue,
}

/// Line of a created invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Line id.
    pub id: u64,
    /// Consumed voucher or loyalty transaction id.
    pub item_id: u64,
    /// Kind of consumed item.
    pub item_type: InvoiceItemType,
}

/// Invoice settling vouchers and points against purchases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Invoice id.
    pub id: u64,
    /// Free-text description.
    pub description: Option<String>,
    /// Consumed items.
    #[serde(deserialize_with = "super::nullable")]
    pub invoice_items: Vec<InvoiceItem>,
}
