use std::io::IsTerminal;

use anyhow::Result;
use clap::{builder::NonEmptyStringValueParser, Parser};

use crate::{
    connection::ConnectionArgs,
    invocation::{self, InvocationConfig, DEFAULT_DESCRIPTION},
    signer::SignerArgs,
    tokenizer::GatewayArgs,
    verbosity::VerbosityArgs,
};

#[derive(Debug, Parser)]
pub struct Generate {
    #[clap(flatten)]
    connection: ConnectionArgs,
    #[clap(flatten)]
    signer: SignerArgs,
    #[clap(flatten)]
    gateway: GatewayArgs,
    #[clap(
        default_value = DEFAULT_DESCRIPTION,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Text description of the image to generate"
    )]
    description: String,
    #[clap(flatten)]
    verbosity: VerbosityArgs,
}

impl Generate {
    pub async fn run(self) -> Result<()> {
        self.verbosity.setup_logging();

        let (endpoint, commitment) = self.connection.into_endpoint()?;
        let identity = self.signer.into_identity()?;
        let tokenizer = self.gateway.into_tokenizer()?;

        let config = InvocationConfig {
            endpoint,
            commitment,
            identity: Some(identity),
            description: self.description,
        };

        // A failed call has already been reported on stderr and still counts as a finished run
        invocation::run(
            tokenizer,
            config,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
            std::io::stdout().is_terminal(),
        )
        .await?;

        Ok(())
    }
}
