use std::io::Write;

use serde_json::Value;
use url::Url;

use crate::{
    connection::{Commitment, Connection, DEFAULT_RPC_URL},
    error::InvocationError,
    signer::Identity,
    tokenizer::ImageTokenizer,
};

pub const DEFAULT_DESCRIPTION: &str = "A futuristic city with flying cars and glowing skyscrapers";

/// Everything a single generate-and-tokenize run needs, made explicit so that nothing is
/// hard-coded at the call site.
#[derive(Debug)]
pub struct InvocationConfig {
    pub endpoint: Url,
    pub commitment: Commitment,
    /// `None` for a fresh ephemeral keypair.
    pub identity: Option<Identity>,
    pub description: String,
}

impl InvocationConfig {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            // Constant literal, always parses
            endpoint: Url::parse(DEFAULT_RPC_URL).unwrap(),
            commitment: Commitment::Confirmed,
            identity: None,
            description: description.into(),
        }
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION)
    }
}

/// Calls the tokenizer exactly once. Nothing is retried.
pub async fn invoke<T>(
    tokenizer: T,
    connection: &Connection,
    identity: &Identity,
    description: &str,
) -> Result<Value, InvocationError>
where
    T: ImageTokenizer,
{
    log::debug!(
        "Generating and tokenizing image for {} via {} ({})",
        identity.pubkey(),
        connection.endpoint(),
        connection.commitment()
    );

    tokenizer
        .generate_and_tokenize(connection, identity, description)
        .await
}

/// Writes the outcome of [`invoke`]: the result to `out`, or the error to `err`. Never both.
pub fn report<O, E>(
    outcome: &Result<Value, InvocationError>,
    out: &mut O,
    err: &mut E,
    colored: bool,
) -> std::io::Result<()>
where
    O: Write,
    E: Write,
{
    match outcome {
        Ok(value) => {
            let rendered = if colored {
                colored_json::to_colored_json_auto(value)
                    .unwrap_or_else(|_| value.to_string())
            } else {
                value.to_string()
            };

            writeln!(out, "Generated and tokenized image: {rendered}")
        }
        Err(error) => writeln!(err, "Error: {error}"),
    }
}

/// Builds the connection and identity from `config`, invokes the tokenizer once and reports the
/// outcome. A failed call is reported, not returned.
pub async fn run<T, O, E>(
    tokenizer: T,
    config: InvocationConfig,
    out: &mut O,
    err: &mut E,
    colored: bool,
) -> std::io::Result<Result<Value, InvocationError>>
where
    T: ImageTokenizer,
    O: Write,
    E: Write,
{
    let connection = Connection::new(config.endpoint, config.commitment);
    let identity = config.identity.unwrap_or_else(Identity::generate);

    let outcome = invoke(tokenizer, &connection, &identity, &config.description).await;
    report(&outcome, out, err, colored)?;

    Ok(outcome)
}
