//! Application-scoped (point of sale) façade

use perx_domain::constants::VOUCHER_CHUNK_SIZE;
use perx_domain::{
    Customer, Invoice, InvoiceRequest, LoyaltyReservationRequest, LoyaltyTransaction,
    LoyaltyTransactionRequest, MerchantInfo, Result, Token, Transaction, TransactionRequest,
    UserAccountRef, Voucher,
};
use tracing::instrument;

use crate::batch::for_each_chunked;
use crate::client::PerxClient;
use crate::reservation::{LoyaltyPointsReservationOps, TwoPhaseReservation};
use crate::token::TokenBroker;

/// Provider operations performed with the application token.
#[derive(Clone)]
pub struct PosProxy {
    client: PerxClient,
    broker: TokenBroker,
}

impl PosProxy {
    pub(crate) fn new(client: PerxClient, broker: TokenBroker) -> Self {
        Self { client, broker }
    }

    /// # Errors
    /// See [`TokenBroker::assure_application_token`].
    pub async fn get_token(&self) -> Result<Token> {
        self.broker.assure_application_token().await
    }

    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice> {
        let token = self.get_token().await?;
        self.client.create_invoice(&token, request).await
    }

    /// Revert voucher reservations, five at a time.
    #[instrument(skip(self, voucher_ids), fields(count = voucher_ids.len()))]
    pub async fn release_vouchers<I: AsRef<str> + Sync>(&self, voucher_ids: &[I]) -> Result<Vec<Voucher>> {
        let token = self.get_token().await?;
        let client = &self.client;
        for_each_chunked(&token, voucher_ids, VOUCHER_CHUNK_SIZE, move |token, voucher_id| {
            client.release_voucher(token, voucher_id.as_ref())
        })
        .await
    }

    pub async fn submit_loyalty_transaction(
        &self,
        request: &LoyaltyTransactionRequest,
    ) -> Result<Vec<LoyaltyTransaction>> {
        let token = self.get_token().await?;
        self.client.submit_loyalty_transaction(&token, request).await
    }

    pub async fn reserve_loyalty_points(
        &self,
        request: &LoyaltyReservationRequest,
    ) -> Result<LoyaltyTransaction> {
        let token = self.get_token().await?;
        self.client.reserve_loyalty_points(&token, request).await
    }

    pub async fn release_loyalty_points(
        &self,
        user_account: &UserAccountRef,
        loyalty_transaction_id: &str,
    ) -> Result<bool> {
        let token = self.get_token().await?;
        self.client.release_loyalty_points(&token, user_account, loyalty_transaction_id).await
    }

    /// Point hold driven through reserve, then confirm or release.
    pub fn loyalty_points_reservation(&self) -> TwoPhaseReservation<LoyaltyPointsReservationOps> {
        TwoPhaseReservation::new(LoyaltyPointsReservationOps::new(self.clone()))
    }

    pub async fn submit_transaction(&self, request: &TransactionRequest) -> Result<Transaction> {
        let token = self.get_token().await?;
        self.client.submit_transaction(&token, request).await
    }

    pub async fn get_customer_detail(&self, customer_id: u64) -> Result<Customer> {
        let token = self.get_token().await?;
        self.client.get_customer_detail(&token, customer_id).await
    }

    pub async fn create_merchant_info(
        &self,
        username: &str,
        email: &str,
        merchant_id: u64,
    ) -> Result<MerchantInfo> {
        let token = self.get_token().await?;
        self.client.create_merchant_info(&token, username, email, merchant_id).await
    }
}

impl std::fmt::Debug for PosProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosProxy").field("lang", &self.client.lang()).finish_non_exhaustive()
    }
}
