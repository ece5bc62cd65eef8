//! Loyalty program endpoints

use perx_domain::{
    LoyaltyProgram, LoyaltyTransaction, LoyaltyTransactionHistoryEntry, Result, Token,
};
use tracing::instrument;

use super::{authorized, path_id, PerxClient};
use crate::envelope::{List, ListEnvelope, Object};
use crate::transport::ApiRequest;

impl PerxClient {
    #[instrument(skip(self, token))]
    pub async fn get_loyalty_program(&self, token: &Token, loyalty_id: &str) -> Result<LoyaltyProgram> {
        let loyalty_id = path_id("loyaltyId", loyalty_id)?;
        let request = authorized(ApiRequest::get(format!("/v4/loyalty/{loyalty_id}")), token);
        Ok(self.call::<Object<LoyaltyProgram>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn get_loyalty_programs(&self, token: &Token) -> Result<Vec<LoyaltyProgram>> {
        let request = authorized(ApiRequest::get("/v4/loyalty"), token);
        Ok(self.call::<List<LoyaltyProgram>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn get_loyalty_transactions(
        &self,
        token: &Token,
        loyalty_id: &str,
        page: u32,
        size: u32,
    ) -> Result<ListEnvelope<LoyaltyTransaction>> {
        let loyalty_id = path_id("loyaltyId", loyalty_id)?;
        let request = authorized(
            ApiRequest::get(format!("/v4/loyalty/{loyalty_id}/transactions"))
                .query("page", page)
                .query("size", size),
            token,
        );
        self.call::<List<LoyaltyTransaction>>(request).await
    }

    /// Earn and burn history across every program, newest first.
    #[instrument(skip(self, token))]
    pub async fn get_transactions_history(
        &self,
        token: &Token,
        page: u32,
        per_page: u32,
        transaction_reference: Option<&str>,
    ) -> Result<ListEnvelope<LoyaltyTransactionHistoryEntry>> {
        let request = authorized(
            ApiRequest::get("/v4/loyalty/transactions_history")
                .query("page", page)
                .query("per_page", per_page)
                .query_opt("transaction_reference", transaction_reference),
            token,
        );
        self.call::<List<LoyaltyTransactionHistoryEntry>>(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::testing::{client, user_token, ScriptedTransport};

    #[tokio::test]
    async fn programs_list_returns_plain_vec() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.reply(200, json!({"data": [{"id": 1, "points_balance": 10.0}, {"id": 2}]}));

        let programs = client(&transport).get_loyalty_programs(&user_token()).await.unwrap();

        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].points_balance, Some(10.0));
    }

    #[tokio::test]
    async fn history_sends_optional_reference() {
        let transport = Arc::new(ScriptedTransport::default());
        transport
            .reply(200, json!({"data": [], "meta": {"total_pages": 0}}))
            .reply(200, json!({"data": [{"id": 4, "amount": 20.0}]}));
        let client = client(&transport);

        client.get_transactions_history(&user_token(), 1, 25, None).await.unwrap();
        let page =
            client.get_transactions_history(&user_token(), 2, 10, Some("ref-1")).await.unwrap();

        assert_eq!(page.data[0].amount, Some(20.0));
        let requests = transport.requests();
        assert_eq!(requests[0].query.len(), 2);
        assert_eq!(
            requests[1].query.last(),
            Some(&("transaction_reference".to_string(), "ref-1".to_string()))
        );
    }

    #[tokio::test]
    async fn loyalty_id_is_validated() {
        let transport = Arc::new(ScriptedTransport::default());
        let err = client(&transport)
            .get_loyalty_transactions(&user_token(), "1;drop", 1, 25)
            .await
            .unwrap_err();
        assert!(matches!(err, perx_domain::PerxError::BadInput(_)));
    }
}
