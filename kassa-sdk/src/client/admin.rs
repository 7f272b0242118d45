//! Admin API client (operator tooling → Kassa server).
//!
//! Every request carries `Authorization: Bearer {admin_secret}`.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::objects::{
    ConfirmDepositRequest, DepositResponse, ListDepositsQuery, RejectDepositRequest,
    ScanStateResponse, UnattributedTransferResponse,
};

/// Typed HTTP client for the Kassa **Admin API**.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    secret: String,
}

impl AdminClient {
    /// Create a new `AdminClient`.
    ///
    /// * `base_url` – root URL of the Kassa server.
    /// * `secret` – the plaintext admin secret.
    pub fn new(base_url: Url, secret: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            secret: secret.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/v1/admin/deposits/{id}/confirm` – manually confirm a
    /// deposit and credit the user.
    pub async fn confirm_deposit(
        &self,
        deposit_id: Uuid,
        request: ConfirmDepositRequest,
    ) -> Result<DepositResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/admin/deposits/{deposit_id}/confirm"))?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.secret)
            .json(&request)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /api/v1/admin/deposits/{id}/reject` – reject a pending deposit.
    pub async fn reject_deposit(
        &self,
        deposit_id: Uuid,
        reason: impl Into<String>,
    ) -> Result<DepositResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/admin/deposits/{deposit_id}/reject"))?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.secret)
            .json(&RejectDepositRequest {
                reason: reason.into(),
            })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/admin/deposits` – list deposits with pagination and an
    /// optional status filter.
    pub async fn list_deposits(
        &self,
        query: &ListDepositsQuery,
    ) -> Result<Vec<DepositResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/admin/deposits")?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.secret)
            .query(query)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/admin/transfers/unattributed` – the manual-review queue.
    pub async fn list_unattributed_transfers(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UnattributedTransferResponse>, ClientError> {
        let mut url = self.base_url.join("/api/v1/admin/transfers/unattributed")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = offset {
                pairs.append_pair("offset", &offset.to_string());
            }
        }

        let resp = self.http.get(url).bearer_auth(&self.secret).send().await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/admin/scan-state` – scanner cursor freshness.
    pub async fn scan_state(&self) -> Result<ScanStateResponse, ClientError> {
        let url = self.base_url.join("/api/v1/admin/scan-state")?;

        let resp = self.http.get(url).bearer_auth(&self.secret).send().await?;

        parse_response(resp).await
    }
}
