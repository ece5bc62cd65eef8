//! Merchant and campaign catalogue

use perx_domain::{Campaign, Merchant, Result, Token};
use tracing::instrument;

use super::{authorized, path_id, PerxClient};
use crate::envelope::{List, ListEnvelope, Object};
use crate::transport::ApiRequest;

impl PerxClient {
    #[instrument(skip(self, token))]
    pub async fn get_merchants(
        &self,
        token: &Token,
        page: u32,
        size: u32,
        favorite: Option<bool>,
    ) -> Result<ListEnvelope<Merchant>> {
        let request = authorized(
            ApiRequest::get("/v4/merchants")
                .query("page", page)
                .query("size", size)
                .query_opt("favorite", favorite),
            token,
        );
        self.call::<List<Merchant>>(request).await
    }

    #[instrument(skip(self, token))]
    pub async fn get_merchant(&self, token: &Token, merchant_id: &str) -> Result<Merchant> {
        let merchant_id = path_id("merchantId", merchant_id)?;
        let request = authorized(ApiRequest::get(format!("/v4/merchants/{merchant_id}")), token);
        Ok(self.call::<Object<Merchant>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn get_campaigns(
        &self,
        token: &Token,
        page: u32,
        size: u32,
        campaign_type: Option<&str>,
    ) -> Result<ListEnvelope<Campaign>> {
        let request = authorized(
            ApiRequest::get("/v4/campaigns")
                .query("page", page)
                .query("size", size)
                .query_opt("campaign_type", campaign_type),
            token,
        );
        self.call::<List<Campaign>>(request).await
    }

    #[instrument(skip(self, token))]
    pub async fn get_campaign(&self, token: &Token, campaign_id: &str) -> Result<Campaign> {
        let campaign_id = path_id("campaignId", campaign_id)?;
        let request = authorized(ApiRequest::get(format!("/v4/campaigns/{campaign_id}")), token);
        Ok(self.call::<Object<Campaign>>(request).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::testing::{client, user_token, ScriptedTransport};

    #[tokio::test]
    async fn merchants_filter_favorites() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.reply(200, json!({"data": [{"id": 1, "name": "Cafe", "is_favorite": true}]}));

        let page = client(&transport).get_merchants(&user_token(), 1, 10, Some(true)).await.unwrap();

        assert!(page.data[0].is_favorite);
        assert_eq!(
            transport.requests()[0].query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "10".to_string()),
                ("favorite".to_string(), "true".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn campaign_by_id() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.reply(200, json!({"data": {"id": 12, "campaign_type": "game", "enrolled": null}}));

        let campaign = client(&transport).get_campaign(&user_token(), "12").await.unwrap();

        assert_eq!(campaign.campaign_type.as_deref(), Some("game"));
        assert!(!campaign.enrolled);
        assert_eq!(transport.requests()[0].path, "/v4/campaigns/12");
    }
}
