//! User-scoped façade

use perx_domain::constants::{
    CATEGORY_PAGE_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_RESERVATION_TIMEOUT_MS, VOUCHER_CHUNK_SIZE,
};
use perx_domain::{
    Campaign, Category, Customer, Identification, LoyaltyProgram, LoyaltyTransaction,
    LoyaltyTransactionHistoryEntry, Merchant, Result, Reward, RewardReservation, RewardScope,
    SearchResult, Token, Voucher, VoucherPagingMeta, VoucherScope,
};
use tracing::instrument;

use super::PosProxy;
use crate::batch::for_each_chunked;
use crate::client::PerxClient;
use crate::envelope::ListEnvelope;
use crate::pagination::collect_all_pages;
use crate::reservation::{RewardReservationOps, TwoPhaseReservation, VoucherReservationOps};
use crate::token::TokenBroker;

/// Provider operations performed as one user.
///
/// Every call acquires the user's token from the shared pool first.
#[derive(Clone)]
pub struct UserProxy {
    client: PerxClient,
    broker: TokenBroker,
    identity: Identification,
}

impl UserProxy {
    pub(crate) fn new(client: PerxClient, broker: TokenBroker, identity: Identification) -> Self {
        Self { client, broker, identity }
    }

    pub const fn identity(&self) -> &Identification {
        &self.identity
    }

    /// Current token of this user, issued if needed.
    ///
    /// # Errors
    /// See [`TokenBroker::assure_token`].
    pub async fn get_token(&self) -> Result<Token> {
        self.broker.assure_token(&self.identity).await
    }

    // Rewards and catalogue

    pub async fn get_reward(&self, reward_id: &str) -> Result<Reward> {
        let token = self.get_token().await?;
        self.client.get_reward(&token, reward_id).await
    }

    pub async fn query_rewards(&self, scope: &RewardScope) -> Result<ListEnvelope<Reward>> {
        let token = self.get_token().await?;
        self.client.get_rewards(&token, scope).await
    }

    /// Full-text reward search. Page defaults to 1, size to
    /// [`DEFAULT_PAGE_SIZE`].
    pub async fn search_rewards(
        &self,
        keyword: &str,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ListEnvelope<SearchResult>> {
        let (page, size) = paging(page, size);
        let token = self.get_token().await?;
        self.client.search_rewards(&token, keyword, page, size).await
    }

    pub async fn list_categories(&self, page: u32, size: u32) -> Result<ListEnvelope<Category>> {
        let token = self.get_token().await?;
        self.client.get_categories(&token, None, page, size).await
    }

    pub async fn list_categories_by_parent_id(
        &self,
        parent_id: &str,
        page: u32,
        size: u32,
    ) -> Result<ListEnvelope<Category>> {
        let token = self.get_token().await?;
        self.client.get_categories(&token, Some(parent_id), page, size).await
    }

    /// Every category, optionally under one parent, fetched page by page.
    ///
    /// # Errors
    /// `MalformedPayload` when pages overlap, otherwise any fetch error.
    #[instrument(skip(self), fields(identity = %self.identity))]
    pub async fn list_all_categories(&self, parent_id: Option<&str>) -> Result<Vec<Category>> {
        let token = self.get_token().await?;
        let token = &token;
        collect_all_pages(1, |page| async move {
            self.client.get_categories(token, parent_id, page, CATEGORY_PAGE_SIZE).await
        })
        .await
    }

    // Reward lifecycle

    pub async fn issue_reward(&self, reward_id: &str) -> Result<Voucher> {
        let token = self.get_token().await?;
        self.client.issue_reward(&token, reward_id).await
    }

    /// Hold a reward; `timeout_ms` defaults to 15 minutes.
    pub async fn reserve_reward(
        &self,
        reward_id: &str,
        timeout_ms: Option<u64>,
    ) -> Result<RewardReservation> {
        let token = self.get_token().await?;
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_RESERVATION_TIMEOUT_MS);
        self.client.reserve_reward(&token, reward_id, timeout_ms).await
    }

    pub async fn confirm_reserved_reward(&self, reservation_id: &str) -> Result<Voucher> {
        let token = self.get_token().await?;
        self.client.confirm_reserved_reward(&token, reservation_id).await
    }

    pub async fn release_reserved_reward(&self, reservation_id: &str) -> Result<Voucher> {
        let token = self.get_token().await?;
        self.client.release_reserved_reward(&token, reservation_id).await
    }

    /// Reward reservation driven through reserve, then confirm or release.
    pub fn reward_reservation(&self, timeout_ms: Option<u64>) -> TwoPhaseReservation<RewardReservationOps> {
        TwoPhaseReservation::new(RewardReservationOps::new(
            self.clone(),
            timeout_ms.unwrap_or(DEFAULT_RESERVATION_TIMEOUT_MS),
        ))
    }

    // Vouchers

    pub async fn get_voucher(&self, voucher_id: &str) -> Result<Voucher> {
        let token = self.get_token().await?;
        self.client.get_voucher(&token, voucher_id).await
    }

    pub async fn query_vouchers(
        &self,
        scope: &VoucherScope,
    ) -> Result<ListEnvelope<Voucher, VoucherPagingMeta>> {
        let token = self.get_token().await?;
        self.client.get_vouchers(&token, scope).await
    }

    /// Redeem vouchers in one step.
    pub async fn redeem_vouchers<I: AsRef<str> + Sync>(&self, voucher_ids: &[I]) -> Result<Vec<Voucher>> {
        self.redeem_chunked(voucher_ids, None).await
    }

    /// Move vouchers to `redemption_in_progress`.
    pub async fn reserve_vouchers<I: AsRef<str> + Sync>(&self, voucher_ids: &[I]) -> Result<Vec<Voucher>> {
        self.redeem_chunked(voucher_ids, Some(false)).await
    }

    /// Complete the redemption of reserved vouchers.
    pub async fn confirm_vouchers<I: AsRef<str> + Sync>(&self, voucher_ids: &[I]) -> Result<Vec<Voucher>> {
        self.redeem_chunked(voucher_ids, Some(true)).await
    }

    #[instrument(skip(self, voucher_ids), fields(identity = %self.identity, count = voucher_ids.len()))]
    async fn redeem_chunked<I: AsRef<str> + Sync>(
        &self,
        voucher_ids: &[I],
        confirm: Option<bool>,
    ) -> Result<Vec<Voucher>> {
        let token = self.get_token().await?;
        let client = &self.client;
        for_each_chunked(&token, voucher_ids, VOUCHER_CHUNK_SIZE, move |token, voucher_id| {
            client.redeem_voucher(token, voucher_id.as_ref(), confirm)
        })
        .await
    }

    /// Voucher reservation that releases through `pos`.
    pub fn voucher_reservation(&self, pos: &PosProxy) -> TwoPhaseReservation<VoucherReservationOps> {
        TwoPhaseReservation::new(VoucherReservationOps::new(self.clone(), pos.clone()))
    }

    // Loyalty

    pub async fn get_loyalty_program(&self, loyalty_id: &str) -> Result<LoyaltyProgram> {
        let token = self.get_token().await?;
        self.client.get_loyalty_program(&token, loyalty_id).await
    }

    pub async fn query_loyalty_programs(&self) -> Result<Vec<LoyaltyProgram>> {
        let token = self.get_token().await?;
        self.client.get_loyalty_programs(&token).await
    }

    pub async fn get_loyalty_transactions(
        &self,
        loyalty_id: &str,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ListEnvelope<LoyaltyTransaction>> {
        let (page, size) = paging(page, size);
        let token = self.get_token().await?;
        self.client.get_loyalty_transactions(&token, loyalty_id, page, size).await
    }

    pub async fn query_transactions_history(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        transaction_reference: Option<&str>,
    ) -> Result<ListEnvelope<LoyaltyTransactionHistoryEntry>> {
        let (page, per_page) = paging(page, per_page);
        let token = self.get_token().await?;
        self.client.get_transactions_history(&token, page, per_page, transaction_reference).await
    }

    // Customer, merchants and campaigns

    pub async fn get_me(&self) -> Result<Customer> {
        let token = self.get_token().await?;
        self.client.get_me(&token).await
    }

    pub async fn list_all_merchants(
        &self,
        page: u32,
        per_page: u32,
        favorite: Option<bool>,
    ) -> Result<ListEnvelope<Merchant>> {
        let token = self.get_token().await?;
        self.client.get_merchants(&token, page, per_page, favorite).await
    }

    pub async fn get_merchant(&self, merchant_id: &str) -> Result<Merchant> {
        let token = self.get_token().await?;
        self.client.get_merchant(&token, merchant_id).await
    }

    pub async fn list_all_campaigns(
        &self,
        page: u32,
        per_page: u32,
        campaign_type: Option<&str>,
    ) -> Result<ListEnvelope<Campaign>> {
        let token = self.get_token().await?;
        self.client.get_campaigns(&token, page, per_page, campaign_type).await
    }

    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign> {
        let token = self.get_token().await?;
        self.client.get_campaign(&token, campaign_id).await
    }

    /// Microsite URL for `campaign`, signed in as this user. `None` when no
    /// microsite base URL is configured.
    ///
    /// # Errors
    /// Token acquisition errors.
    pub async fn campaign_microsite_url(&self, campaign: &Campaign) -> Result<Option<String>> {
        let Some(base_url) = self.client.config().microsite_base_url.as_deref() else {
            return Ok(None);
        };
        let token = self.get_token().await?;
        Ok(Some(campaign.microsite_url(base_url, &token.access_token)))
    }

    // Other

    pub async fn perform_custom_trigger(&self, trigger_id: &str) -> Result<()> {
        let token = self.get_token().await?;
        self.client.perform_custom_trigger(&token, trigger_id).await
    }
}

fn paging(page: Option<u32>, size: Option<u32>) -> (u32, u32) {
    (page.unwrap_or(1), size.unwrap_or(DEFAULT_PAGE_SIZE))
}

impl std::fmt::Debug for UserProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProxy")
            .field("identity", &self.identity)
            .field("lang", &self.client.lang())
            .finish_non_exhaustive()
    }
}
