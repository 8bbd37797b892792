use async_trait::async_trait;
use auto_impl::auto_impl;
use serde_json::Value;

use crate::{connection::Connection, error::InvocationError, signer::Identity};

mod gateway;
pub use gateway::{GatewayArgs, GatewayTokenizer};

/// Something that turns a text description into an image and mints it as a token owned by
/// `identity`, on the cluster behind `connection`.
///
/// Whether repeated calls with the same description mint duplicates is up to the implementation.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait ImageTokenizer {
    async fn generate_and_tokenize(
        &self,
        connection: &Connection,
        identity: &Identity,
        description: &str,
    ) -> Result<Value, InvocationError>;
}
