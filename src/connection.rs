use std::{fmt::Display, str::FromStr};

use anyhow::Result;
use clap::{builder::PossibleValue, Parser, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use url::Url;

/// Endpoint used when neither `--rpc` nor `--cluster` is supplied.
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

/// An RPC endpoint bound to a commitment level. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    endpoint: Url,
    commitment: Commitment,
}

#[derive(Debug, Clone, Parser)]
pub struct ConnectionArgs {
    #[clap(long = "rpc", env = "SOLANA_RPC", help = "Solana JSON-RPC endpoint")]
    rpc: Option<Url>,
    #[clap(
        long = "cluster",
        env = "SOLANA_CLUSTER",
        help = "Well-known Solana cluster to use when no RPC endpoint is given"
    )]
    cluster: Option<Cluster>,
    #[clap(
        long = "commitment",
        env = "SOLANA_COMMITMENT",
        default_value = "confirmed",
        help = "Commitment level for on-chain queries"
    )]
    commitment: Commitment,
}

impl Connection {
    pub fn new(endpoint: Url, commitment: Commitment) -> Self {
        Self {
            endpoint,
            commitment,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }
}

impl ConnectionArgs {
    /// Resolves the endpoint to use. An explicit URL always wins over a cluster preset.
    pub fn into_endpoint(self) -> Result<(Url, Commitment)> {
        let endpoint = match (self.rpc, self.cluster) {
            (Some(rpc), None) => rpc,
            (Some(rpc), Some(_)) => {
                eprintln!(
                    "{}",
                    "WARNING: when an RPC endpoint is supplied, the --cluster option and the \
                    SOLANA_CLUSTER environment variable are ignored."
                        .bright_magenta()
                );

                rpc
            }
            (None, Some(cluster)) => cluster.rpc_url()?,
            (None, None) => {
                eprintln!(
                    "{}",
                    "WARNING: no RPC endpoint or cluster provided. Falling back to the public \
                    mainnet-beta endpoint, which is heavily rate limited."
                        .bright_magenta()
                );

                Url::parse(DEFAULT_RPC_URL)?
            }
        };

        Ok((endpoint, self.commitment))
    }
}

impl Cluster {
    pub fn rpc_url(&self) -> Result<Url> {
        let url = match self {
            Self::MainnetBeta => DEFAULT_RPC_URL,
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        };

        Ok(Url::parse(url)?)
    }
}

impl ValueEnum for Cluster {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::MainnetBeta, Self::Devnet, Self::Testnet, Self::Localnet]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::MainnetBeta => Some(PossibleValue::new("mainnet-beta").aliases(["mainnet"])),
            Self::Devnet => Some(PossibleValue::new("devnet")),
            Self::Testnet => Some(PossibleValue::new("testnet")),
            Self::Localnet => {
                Some(PossibleValue::new("localnet").aliases(["local", "localhost"]))
            }
        }
    }
}

impl FromStr for Cluster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, false)
            .map_err(|_| anyhow::anyhow!("unknown cluster: {}", s))
    }
}

impl Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display_value(self, f)
    }
}

impl ValueEnum for Commitment {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Processed, Self::Confirmed, Self::Finalized]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Processed => Some(PossibleValue::new("processed")),
            Self::Confirmed => Some(PossibleValue::new("confirmed")),
            Self::Finalized => Some(PossibleValue::new("finalized")),
        }
    }
}

impl FromStr for Commitment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, false)
            .map_err(|_| anyhow::anyhow!("unknown commitment level: {}", s))
    }
}

impl Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display_value(self, f)
    }
}

/// Displays the canonical CLI token, so parsing and printing share the `ValueEnum` table.
fn display_value<T>(value: &T, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
where
    T: ValueEnum,
{
    match value.to_possible_value() {
        Some(possible) => f.write_str(possible.get_name()),
        None => Err(std::fmt::Error),
    }
}
