use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    connection::{Commitment, Connection},
    error::InvocationError,
    signer::Identity,
    tokenizer::ImageTokenizer,
};

const GENERATE_AND_TOKENIZE_PATH: &[&str] = &["v1", "generate-and-tokenize"];

/// Delegates generation and minting to a remote tokenization service over HTTP.
///
/// Only the owner's public key and a signature over the description are sent. The service uses
/// the signature as proof that the caller holds the key it wants the token minted to.
#[derive(Debug, Clone)]
pub struct GatewayTokenizer {
    client: reqwest::Client,
    url: Url,
}

#[derive(Debug, Clone, Parser)]
pub struct GatewayArgs {
    #[clap(
        long = "gateway",
        env = "TOKENIZER_GATEWAY",
        help = "Base URL of the image tokenization service"
    )]
    gateway: Url,
}

#[derive(Debug, Serialize)]
struct GenerateAndTokenizeRequest<'a> {
    rpc_url: &'a str,
    commitment: Commitment,
    owner: String,
    description: &'a str,
    signature: String,
}

impl GatewayArgs {
    pub fn into_tokenizer(self) -> Result<GatewayTokenizer> {
        GatewayTokenizer::new(self.gateway)
    }
}

impl GatewayTokenizer {
    pub fn new(base: Url) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Appends the endpoint path to `base`, keeping its query string (e.g. an API key).
    pub fn with_client(client: reqwest::Client, base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            anyhow::bail!("invalid gateway URL: {}", base);
        }

        let mut url = base;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("invalid gateway URL"))?
            .pop_if_empty()
            .extend(GENERATE_AND_TOKENIZE_PATH);

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ImageTokenizer for GatewayTokenizer {
    async fn generate_and_tokenize(
        &self,
        connection: &Connection,
        identity: &Identity,
        description: &str,
    ) -> Result<Value, InvocationError> {
        let request = GenerateAndTokenizeRequest {
            rpc_url: connection.endpoint().as_str(),
            commitment: connection.commitment(),
            owner: identity.pubkey(),
            description,
            signature: identity.sign(description.as_bytes()),
        };

        log::trace!(
            "Sending request to {}: {}",
            self.url,
            serde_json::to_string(&request).unwrap_or_default()
        );

        let response = self.client.post(self.url().clone()).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        log::trace!("Response from {} ({}): {}", self.url, status, body);

        if !status.is_success() {
            return Err(InvocationError::Collaborator(error_message(status, &body)));
        }

        serde_json::from_str(&body).map_err(|err| {
            InvocationError::Collaborator(format!("invalid response from tokenizer: {err}"))
        })
    }
}

/// Prefers the service's own explanation over the bare status code.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let reported = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["error", "message"].iter().find_map(|field| match value.get(field) {
            Some(Value::String(message)) => Some(message.to_owned()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        })
    });

    match reported {
        Some(message) => format!("tokenizer returned {status}: {message}"),
        None if body.trim().is_empty() => format!("tokenizer returned {status}"),
        None => format!("tokenizer returned {status}: {}", body.trim()),
    }
}
