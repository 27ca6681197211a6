use super::{Error, StorageResult};
use crate::gcp::{
    oauth2::token::{AccessToken, Token, TokenGenerator},
    Client,
};
use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

#[derive(Debug)]
struct TokenStateHolder {
    client: Client,
    token_generator: Box<dyn TokenGenerator>,
    token: RwLock<Token>,
}

impl TokenStateHolder {
    pub async fn new(
        client: Client,
        token_generator: Box<dyn TokenGenerator>,
    ) -> StorageResult<Self> {
        let token = token_generator
            .get(&client)
            .await
            .map_err(Error::GcsTokenError)?;
        Ok(Self {
            client,
            token_generator,
            token: RwLock::new(token),
        })
    }

    async fn get_token(&self) -> Option<AccessToken> {
        let t = self.token.read().await;

        if t.is_valid() {
            Some(t.access_token())
        } else {
            None
        }
    }

    async fn refresh_token(&self) -> StorageResult<AccessToken> {
        if let Some(token) = self.get_token().await {
            Ok(token)
        } else {
            let t = self
                .token_generator
                .get(&self.client)
                .await
                .map_err(Error::GcsTokenError)?;
            let access_token = t.access_token();
            *self.token.write().await = t;
            Ok(access_token)
        }
    }
}

#[derive(Debug)]
pub(super) struct StorageClient {
    client: Client,
    token_state_holder: TokenStateHolder,
}

impl StorageClient {
    /// The first token is fetched eagerly so that bad credentials fail at
    /// construction time rather than on the first storage call.
    pub async fn new(token_generator: Box<dyn TokenGenerator>) -> StorageResult<Self> {
        let client = Client::default();
        let token_state_holder = TokenStateHolder::new(client.clone(), token_generator).await?;

        Ok(Self {
            client,
            token_state_holder,
        })
    }

    async fn success_response(
        url: &str,
        response: reqwest::Response,
    ) -> StorageResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(super::Error::GcsResourceNotFound {
                url: url.to_owned(),
            });
        }

        let err = response.text().await.map_err(super::Error::GcsHttpError)?;
        Err(super::Error::gcs_unexpected_response_error(url, err))
    }

    async fn with_auth(&self, request_builder: RequestBuilder) -> StorageResult<RequestBuilder> {
        Ok(request_builder.bearer_auth(self.token_state_holder.refresh_token().await?))
    }

    pub async fn delete(&self, url: &str) -> StorageResult<()> {
        let request = self.with_auth(self.client.client.delete(url)).await?;
        let response = request.send().await.map_err(super::Error::GcsHttpError)?;
        Self::success_response(url, response).await?;
        Ok(())
    }

    pub async fn post_as_json<R, Q, B>(&self, url: &str, query: &Q, body: &B) -> StorageResult<R>
    where
        R: DeserializeOwned,
        Q: Serialize,
        B: Serialize,
    {
        let request = self
            .with_auth(self.client.client.post(url).query(query).json(body))
            .await?;
        let response = request.send().await.map_err(super::Error::GcsHttpError)?;
        let r: super::super::DeserializedResponse<R> = Self::success_response(url, response)
            .await?
            .json()
            .await
            .map_err(super::Error::GcsHttpError)?;
        r.into_result()
            .map_err(|err| super::Error::gcs_unexpected_json::<R>(url, err))
    }

    pub async fn get_as_json<R, Q>(&self, url: &str, query: &Q) -> StorageResult<R>
    where
        R: DeserializeOwned,
        Q: serde::Serialize,
    {
        let request = self
            .with_auth(self.client.client.get(url).query(query))
            .await?;
        let response = request.send().await.map_err(super::Error::GcsHttpError)?;
        let r: super::super::DeserializedResponse<R> = Self::success_response(url, response)
            .await?
            .json()
            .await
            .map_err(super::Error::GcsHttpError)?;
        r.into_result()
            .map_err(|err| super::Error::gcs_unexpected_json::<R>(url, err))
    }
}
