//! Voucher endpoints and custom triggers

use perx_domain::{PerxError, Result, Token, Voucher, VoucherPagingMeta, VoucherScope};
use serde::de::IgnoredAny;
use tracing::{instrument, warn};

use super::{authorized, path_id, PerxClient};
use crate::envelope::{parse_and_evaluate, List, ListEnvelope, Object, Root};
use crate::transport::ApiRequest;

impl PerxClient {
    #[instrument(skip(self, token))]
    pub async fn get_voucher(&self, token: &Token, voucher_id: &str) -> Result<Voucher> {
        let voucher_id = path_id("voucherId", voucher_id)?;
        let request = authorized(ApiRequest::get(format!("/v4/vouchers/{voucher_id}")), token);
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }

    #[instrument(skip(self, token))]
    pub async fn get_vouchers(
        &self,
        token: &Token,
        scope: &VoucherScope,
    ) -> Result<ListEnvelope<Voucher, VoucherPagingMeta>> {
        let request = authorized(ApiRequest::get("/v4/vouchers").query_pairs(scope.query_pairs()), token);
        self.call::<List<Voucher, VoucherPagingMeta>>(request).await
    }

    /// Redeem a voucher.
    ///
    /// `Some(false)` only reserves it, `Some(true)` confirms an earlier
    /// reservation, `None` redeems in one step.
    #[instrument(skip(self, token))]
    pub async fn redeem_voucher(
        &self,
        token: &Token,
        voucher_id: &str,
        confirm: Option<bool>,
    ) -> Result<Voucher> {
        let voucher_id = path_id("voucherId", voucher_id)?;
        let request = authorized(
            ApiRequest::post(format!("/v4/vouchers/{voucher_id}/redeem")).query_opt("confirm", confirm),
            token,
        );
        Ok(self.call::<Object<Voucher>>(request).await?.data)
    }

    /// Fire a tenant-defined trigger.
    ///
    /// Only a 4xx response with a body is an error; anything else is
    /// accepted.
    #[instrument(skip(self, token))]
    pub async fn perform_custom_trigger(&self, token: &Token, trigger_id: &str) -> Result<()> {
        let trigger_id = path_id("triggerId", trigger_id)?;
        let request = authorized(ApiRequest::put(format!("/v4/app_triggers/{trigger_id}")), token);
        let response = self.send(request).await?;
        if !response.is_client_error() {
            return Ok(());
        }
        let Some(body) = response.body else {
            return Ok(());
        };
        warn!(status = response.status, "custom trigger rejected");
        let rendered = body.to_string();
        match parse_and_evaluate::<Root<IgnoredAny>>(Some(body), response.status) {
            Err(err) => Err(err),
            Ok(_) => Err(PerxError::rejected("no-error-code", rendered)),
        }
    }
}
