use std::fmt;
use std::future::Future;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// JSON transport for a fixed base URL. Paths start with `/`.
pub trait HttpClient: Send + Sync {
    fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send;

    fn post<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    fn put<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// [`HttpClient`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
}

impl ReqwestHttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, url: String, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        debug!(%method, %url, "sending request");

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method,
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { method, url, status });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            method,
            url: url.clone(),
            source,
        })?;
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(method, url.clone(), request).await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send_json(Method::Get, url, request)
    }

    fn post<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        self.send_json(Method::Post, url, request)
    }

    fn put<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.url(path);
        let request = self.client.put(&url).json(body);
        self.send_json(Method::Put, url, request)
    }

    fn delete(&self, path: &str) -> impl Future<Output = Result<(), ApiError>> + Send {
        let url = self.url(path);
        let request = self.client.delete(&url);
        async move {
            self.send(Method::Delete, url, request).await?;
            Ok(())
        }
    }
}
