//! Wire models exchanged with the Perx API

pub mod campaign;
pub mod customer;
pub mod identity;
pub mod invoice;
pub mod loyalty;
pub mod merchant;
pub mod paging;
pub mod requests;
pub mod reward;
pub mod scope;
pub mod taxonomy;
pub mod token;
pub mod transaction;
pub mod voucher;

use serde::{Deserialize, Deserializer};

pub use campaign::Campaign;
pub use customer::Customer;
pub use identity::Identification;
pub use invoice::{Invoice, InvoiceItem, InvoiceItemType};
pub use loyalty::{
    ExpiryPoint, LoyaltyProgram, LoyaltyTransaction, LoyaltyTransactionDetail,
    LoyaltyTransactionHistoryEntry, PointBalance,
};
pub use merchant::{Merchant, MerchantInfo};
pub use paging::{PageCursor, PagingMeta, VoucherPagingMeta};
pub use requests::{
    InvoiceRequest, InvoiceTransactionData, InvoiceTransactionInput, InvoiceUsedItem,
    LoyaltyReservationRequest, LoyaltyTransactionRequest, TransactionRequest,
    TransactionRequestData, UserAccountRef,
};
pub use reward::{
    Brand, Image, InventoryBalance, InventoryLimitError, Reward, RewardInventory,
    RewardLoyaltyScope, RewardPrice, RewardReservation, SearchResult,
};
pub use scope::{RewardScope, VoucherScope};
pub use taxonomy::{Category, Tag};
pub use token::{BearerTokenResponse, Token, TokenKind, TokenResponse};
pub use transaction::Transaction;
pub use voucher::{Voucher, VoucherOwner, VoucherState};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_collections_and_flags_fall_back_to_defaults() {
        let reward: Reward = serde_json::from_value(json!({
            "id": 3,
            "name": null,
            "images": null,
            "is_giftable": null,
            "tags": [{"id": 1, "name": "hot"}]
        }))
        .unwrap();

        assert_eq!(reward.id, 3);
        assert!(reward.name.is_empty());
        assert!(reward.images.is_empty());
        assert!(!reward.is_giftable);
        assert_eq!(reward.tags.len(), 1);
    }
}
