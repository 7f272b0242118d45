//! User API client (wallet backend → Kassa server).

use reqwest::Client;
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::objects::{
    BalanceResponse, CancelDepositRequest, CreateDepositRequest, DepositResponse,
};

/// Typed HTTP client for the Kassa **User API**.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: Client,
    base_url: Url,
}

impl UserClient {
    /// Create a new `UserClient`.
    ///
    /// * `base_url` – root URL of the Kassa server.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/v1/deposits/create-automated` – open a top-up and receive
    /// the payable amount to transfer.
    pub async fn create_deposit(
        &self,
        user_id: i64,
        requested_amount: Decimal,
    ) -> Result<DepositResponse, ClientError> {
        let url = self.base_url.join("/api/v1/deposits/create-automated")?;

        let resp = self
            .http
            .post(url)
            .json(&CreateDepositRequest {
                user_id,
                requested_amount,
            })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/deposits/user/{user_id}` – list the user's deposits.
    pub async fn list_deposits(&self, user_id: i64) -> Result<Vec<DepositResponse>, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/deposits/user/{user_id}"))?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `POST /api/v1/deposits/{id}/cancel` – cancel a pending deposit.
    pub async fn cancel_deposit(
        &self,
        deposit_id: Uuid,
        user_id: i64,
    ) -> Result<DepositResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/deposits/{deposit_id}/cancel"))?;

        let resp = self
            .http
            .post(url)
            .json(&CancelDepositRequest { user_id })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/balance/{user_id}` – the user's available/frozen balance.
    pub async fn get_balance(&self, user_id: i64) -> Result<BalanceResponse, ClientError> {
        let url = self.base_url.join(&format!("/api/v1/balance/{user_id}"))?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }
}
