//! Reward catalogue and reward reservation endpoints

use perx_domain::{
    Category, PagingMeta, Result, Reward, RewardReservation, RewardScope, SearchResult, Token,
    Voucher,
};
use tracing::instrument;

use super::{authorized, path_id, PerxClient};
use crate::envelope::{List, ListEnvelope, Object, RewardsKey};
use crate::transport::ApiRequest;

impl PerxClient {
    #[instrument(skip(self, token))]
    pub async fn get_reward(&self, token: &Token, reward_id: &str) -> Result<Reward> {
        let reward_id = path_id("rewardId", reward_id)?;
        let request = authorized(ApiRequest::get(format!("/v4/rewards/{reward_id}")), token);
        Ok(self.call::<Object<Reward>>(request).await?.data)
    }

    /// One page of rewards matching `scope`.
    #[instrument(skip(self, token))]
    pub async fn get_rewards(&self, token: &Token, scope: &RewardScope) -> Result<ListEnvelope<Reward>> {
        let request = authorized(ApiRequest::get("/v4/rewards").query_pairs(scope.query_pairs()), token);
        self.call::<List<Reward>>(request).await
    }

    /// Full-text reward search; hits are nested under `data.rewards`.
    #[instrument(skip(self, token))]
    pub async fn search_rewards(
        &self,
        token: &Token,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<ListEnvelope<SearchResult>> {
        let request = authorized(
            ApiRequest::get("/v4/search")
                .query("search_string", keyword)
                .query("page", page)
                .query("size", size),
            token,
        );
        self.call::<List<SearchResult, PagingMeta, RewardsKey>>(request).await
    }

    #[instrument(skip(self, token))]
    pub async fn get_categories(
        &self,
        token: &Token,
        parent_id: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<ListEnvelope<Category>> {
        let parent_id = parent_id.map(|id| path_id("parentId", id)).transpose()?;
        let request = authorized(
            ApiRequest::get("/v4/categories")
                .query_opt("parent_id", parent_id)
                .query("page", page)
                .query("size", size),
            token,
        );
        self.call::<List<Category>>(request).await
    }

    /// Issue a voucher for a reward to the token holder.
    #[instrument(skip(self, token))]
    pub async fn issue_reward(&self, token: &Token, reward_id: &str) -> Result<Voucher> {
        let reward_id = path_id("rewardId", reward_id)?;
        let request = authorized(ApiRequest::post(format!("/v4/rewards/{reward_id}/issue")), token);
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }

    /// Hold a reward for `timeout_ms`; the hold must be confirmed or released.
    #[instrument(skip(self, token))]
    pub async fn reserve_reward(
        &self,
        token: &Token,
        reward_id: &str,
        timeout_ms: u64,
    ) -> Result<RewardReservation> {
        let reward_id = path_id("rewardId", reward_id)?;
        let request = authorized(
            ApiRequest::post(format!("/v4/rewards/{reward_id}/reserve")).query("timeout", timeout_ms),
            token,
        );
        Ok(self.call::<Object<RewardReservation>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn confirm_reserved_reward(&self, token: &Token, reservation_id: &str) -> Result<Voucher> {
        let reservation_id = path_id("reservationId", reservation_id)?;
        let request =
            authorized(ApiRequest::patch(format!("/v4/vouchers/{reservation_id}/confirm")), token);
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn release_reserved_reward(&self, token: &Token, reservation_id: &str) -> Result<Voucher> {
        let reservation_id = path_id("reservationId", reservation_id)?;
        let request =
            authorized(ApiRequest::patch(format!("/v4/vouchers/{reservation_id}/release")), token);
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }
}
