//! JSON-over-HTTP plumbing shared by the provider clients and the health probe.

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet, transport_error,
};

/// `Authorization: Bearer <key>` header value.
pub(crate) fn bearer(provider: LlmProvider, api_key: &str) -> Result<HeaderValue, AiLlmError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        ProviderError::new(
            provider,
            ProviderErrorKind::Decode(format!("API key is not a valid header value: {e}")),
        )
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Client with compression enabled and optional bearer auth on every request.
pub(crate) fn client(timeout: Duration, auth: Option<HeaderValue>) -> Result<Client, AiLlmError> {
    let mut headers = HeaderMap::new();
    if let Some(auth) = auth {
        headers.insert(header::AUTHORIZATION, auth);
    }
    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?)
}

/// POSTs `body` as JSON and decodes a 2xx response into `R`.
pub(crate) async fn post_json<B, R>(
    client: &Client,
    provider: LlmProvider,
    url: &str,
    body: &B,
    timeout: Duration,
) -> Result<R, AiLlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let text = send(provider, url, client.post(url).json(body), timeout).await?;
    serde_json::from_str(&text).map_err(|e| {
        error!(%provider, %url, error = %e, "undecodable provider response");
        AiLlmError::from(ProviderError::new(
            provider,
            ProviderErrorKind::Decode(format!("{url}: {e}")),
        ))
    })
}

/// GETs `url` and returns the body of a 2xx response.
pub(crate) async fn get_text(
    client: &Client,
    provider: LlmProvider,
    url: &str,
    timeout: Duration,
) -> Result<String, AiLlmError> {
    send(provider, url, client.get(url), timeout).await
}

async fn send(
    provider: LlmProvider,
    url: &str,
    req: RequestBuilder,
    timeout: Duration,
) -> Result<String, AiLlmError> {
    let started = Instant::now();
    let resp = req
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| transport_error(e, timeout))?;
    let latency_ms = started.elapsed().as_millis();

    if !status.is_success() {
        let snippet = make_snippet(&body);
        error!(%provider, %status, %url, %snippet, latency_ms, "provider returned error status");
        return Err(ProviderError::new(
            provider,
            ProviderErrorKind::HttpStatus(HttpError {
                status,
                url: url.to_string(),
                snippet,
            }),
        )
        .into());
    }

    debug!(%provider, %url, latency_ms, bytes = body.len(), "provider call ok");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_is_sensitive() {
        let v = bearer(LlmProvider::OpenAI, "sk-test").unwrap();
        assert!(v.is_sensitive());
        assert_eq!(v.to_str().unwrap(), "Bearer sk-test");
    }

    #[test]
    fn bearer_rejects_control_chars() {
        let err = bearer(LlmProvider::OpenAI, "sk\n-test").unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::Decode(_),
                ..
            })
        ));
    }
}
