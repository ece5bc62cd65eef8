//! Point-of-sale endpoints, called with the application token

use perx_domain::{
    Invoice, InvoiceRequest, LoyaltyReservationRequest, LoyaltyTransaction,
    LoyaltyTransactionRequest, MerchantInfo, Result, Token, Transaction, TransactionRequest,
    UserAccountRef, Voucher,
};
use serde::de::IgnoredAny;
use serde_json::json;
use tracing::instrument;

use super::{authorized, first_entry, path_id, PerxClient};
use crate::envelope::{List, Object, Root};
use crate::transport::ApiRequest;

impl PerxClient {
    /// Record a purchase; returns the recorded transaction.
    #[instrument(skip(self, token, request), fields(reference = %request.transaction_data.transaction_reference))]
    pub async fn submit_transaction(&self, token: &Token, request: &TransactionRequest) -> Result<Transaction> {
        let request = authorized(ApiRequest::post("/v4/pos/transactions").json(request)?, token);
        first_entry(self.call::<List<Transaction>>(request).await?.data, "transaction")
    }

    /// Hard earn or burn of loyalty points.
    #[instrument(skip(self, token, request), fields(loyalty_program_id = request.loyalty_program_id))]
    pub async fn submit_loyalty_transaction(
        &self,
        token: &Token,
        request: &LoyaltyTransactionRequest,
    ) -> Result<Vec<LoyaltyTransaction>> {
        let request = authorized(ApiRequest::post("/v4/pos/loyalty_transactions").json(request)?, token);
        Ok(self.call::<List<LoyaltyTransaction>>(request).await?.data)
    }

    /// Hold points; release with [`PerxClient::release_loyalty_points`].
    #[instrument(skip(self, token, request), fields(loyalty_program_id = request.loyalty_program_id))]
    pub async fn reserve_loyalty_points(
        &self,
        token: &Token,
        request: &LoyaltyReservationRequest,
    ) -> Result<LoyaltyTransaction> {
        let request =
            authorized(ApiRequest::post("/v4/pos/loyalty_transactions/reserve").json(request)?, token);
        first_entry(self.call::<List<LoyaltyTransaction>>(request).await?.data, "loyalty transaction")
    }

    /// Hand reserved points back to the account.
    #[instrument(skip(self, token, user_account))]
    pub async fn release_loyalty_points(
        &self,
        token: &Token,
        user_account: &UserAccountRef,
        loyalty_transaction_id: &str,
    ) -> Result<bool> {
        let loyalty_transaction_id = path_id("loyaltyTransactionId", loyalty_transaction_id)?;
        let request = authorized(
            ApiRequest::put(format!(
                "/v4/pos/loyalty_transactions/{loyalty_transaction_id}/revert_redemption"
            ))
            .json_value(json!({ "user_account": user_account })),
            token,
        );
        self.call::<Root<IgnoredAny>>(request).await?;
        Ok(true)
    }

    /// Undo a voucher reservation made at a point of sale.
    #[instrument(skip(self, token))]
    pub async fn release_voucher(&self, token: &Token, voucher_id: &str) -> Result<Voucher> {
        let voucher_id = path_id("voucherId", voucher_id)?;
        let request =
            authorized(ApiRequest::put(format!("/v4/pos/vouchers/{voucher_id}/revert_redemption")), token);
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }

    #[instrument(skip(self, token, request))]
    pub async fn create_invoice(&self, token: &Token, request: &InvoiceRequest) -> Result<Invoice> {
        let request = authorized(ApiRequest::post("/v4/pos/invoices").json(request)?, token);
        Ok(self.call::<Object<Invoice>>(request).await?.data)
    }

    /// Create a staff login for a merchant.
    #[instrument(skip(self, token, email))]
    pub async fn create_merchant_info(
        &self,
        token: &Token,
        username: &str,
        email: &str,
        merchant_id: u64,
    ) -> Result<MerchantInfo> {
        let request = authorized(
            ApiRequest::post("/v4/pos/merchant_user_accounts").json_value(json!({
                "username": username,
                "email": email,
                "merchant_id": merchant_id,
            })),
            token,
        );
        Ok(self.call::<Object<MerchantInfo>>(request).await?.data)
    }
}
