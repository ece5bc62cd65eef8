//! Customer lookups

use perx_domain::{Customer, Result, Token};
use tracing::instrument;

use super::{authorized, PerxClient};
use crate::envelope::Object;
use crate::transport::ApiRequest;

impl PerxClient {
    /// Customer record by provider id, read with an application token.
    #[instrument(skip(self, application_token))]
    pub async fn get_customer_detail(&self, application_token: &Token, id: u64) -> Result<Customer> {
        let request = authorized(ApiRequest::get(format!("/v4/pos/user_accounts/{id}")), application_token);
        Ok(self.call::<Object<Customer>>(request).await?.data)
    }

    /// Customer record of the token holder.
    #[instrument(skip(self, user_token))]
    pub async fn get_me(&self, user_token: &Token) -> Result<Customer> {
        let request = authorized(ApiRequest::get("/v4/customers/me"), user_token);
        Ok(self.call::<Object<Customer>>(request).await?.data)
    }
}
