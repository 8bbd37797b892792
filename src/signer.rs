use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;

use crate::path::ExpandedPathbufParser;

/// An ed25519 keypair used to authorize requests on behalf of its owner.
///
/// The secret half never leaves this type: it's not printed by `Debug`, and there's no way to
/// serialize it.
pub struct Identity {
    key: SigningKey,
}

#[derive(Debug, thiserror::Error)]
pub enum KeypairFileError {
    #[error("keypair file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(std::io::Error),
    #[error("keypair file is not a JSON byte array: {0}")]
    Malformed(serde_json::Error),
    #[error("keypair file must contain {KEYPAIR_LENGTH} bytes, found {0}")]
    InvalidLength(usize),
    #[error("public key in keypair file does not match its secret key")]
    MismatchedPublicKey,
}

#[derive(Debug, Clone, Parser)]
pub struct SignerArgs {
    #[clap(
        long,
        env = "SOLANA_KEYPAIR",
        value_parser = ExpandedPathbufParser,
        help = "Path to a Solana keypair JSON file; a fresh keypair is generated when omitted"
    )]
    keypair: Option<PathBuf>,
}

impl Identity {
    /// Generates a fresh keypair that only lives as long as this process.
    pub fn generate() -> Self {
        Self {
            key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Loads a keypair in the format written by `solana-keygen`: a JSON array of 64 bytes, the
    /// secret key followed by the public key.
    pub fn from_keypair_file<P>(path: P) -> Result<Self, KeypairFileError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(KeypairFileError::NotFound(path.to_owned()));
        }

        let contents = std::fs::read_to_string(path).map_err(KeypairFileError::Io)?;
        let bytes: Vec<u8> =
            serde_json::from_str(&contents).map_err(KeypairFileError::Malformed)?;

        Self::from_keypair_bytes(&bytes)
    }

    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, KeypairFileError> {
        let bytes: &[u8; KEYPAIR_LENGTH] = bytes
            .try_into()
            .map_err(|_| KeypairFileError::InvalidLength(bytes.len()))?;

        let mut secret = [0u8; SECRET_KEY_LENGTH];
        secret.copy_from_slice(&bytes[..SECRET_KEY_LENGTH]);
        let key = SigningKey::from_bytes(&secret);

        if key.verifying_key().as_bytes()[..] != bytes[SECRET_KEY_LENGTH..] {
            return Err(KeypairFileError::MismatchedPublicKey);
        }

        Ok(Self { key })
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Base58-encoded public key, i.e. the Solana address of this identity.
    pub fn pubkey(&self) -> String {
        bs58::encode(self.verifying_key().as_bytes()).into_string()
    }

    /// Signs `message` and returns the base58-encoded signature.
    pub fn sign(&self, message: &[u8]) -> String {
        bs58::encode(self.key.sign(message).to_bytes()).into_string()
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

impl SignerArgs {
    pub fn into_identity(self) -> Result<Identity> {
        match self.keypair {
            Some(keypair) => Ok(Identity::from_keypair_file(keypair)?),
            None => {
                let identity = Identity::generate();
                log::info!("Using ephemeral keypair {}", identity.pubkey());

                Ok(identity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use ed25519_dalek::{Signature, Verifier};

    use super::*;

    fn keypair_json(identity: &Identity) -> String {
        let mut bytes = identity.key.to_bytes().to_vec();
        bytes.extend_from_slice(identity.verifying_key().as_bytes());
        serde_json::to_string(&bytes).unwrap()
    }

    #[test]
    fn test_load_keypair_file() {
        let original = Identity::generate();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(keypair_json(&original).as_bytes()).unwrap();

        let loaded = Identity::from_keypair_file(file.path()).unwrap();
        assert_eq!(loaded.pubkey(), original.pubkey());
    }

    #[test]
    fn test_reject_bad_keypair_files() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            Identity::from_keypair_file(dir.path().join("missing.json")),
            Err(KeypairFileError::NotFound(_))
        ));
        assert!(matches!(
            Identity::from_keypair_bytes(&[1u8; 32]),
            Err(KeypairFileError::InvalidLength(32))
        ));

        let short = dir.path().join("short.json");
        std::fs::write(&short, "[1, 2, 3]").unwrap();
        assert!(matches!(
            Identity::from_keypair_file(&short),
            Err(KeypairFileError::InvalidLength(3))
        ));

        let out_of_range = dir.path().join("range.json");
        std::fs::write(&out_of_range, "[256]").unwrap();
        assert!(matches!(
            Identity::from_keypair_file(&out_of_range),
            Err(KeypairFileError::Malformed(_))
        ));

        let mut mismatched = Identity::generate().key.to_bytes().to_vec();
        mismatched.extend_from_slice(Identity::generate().verifying_key().as_bytes());
        assert!(matches!(
            Identity::from_keypair_bytes(&mismatched),
            Err(KeypairFileError::MismatchedPublicKey)
        ));
    }

    #[test]
    fn test_signature_verifies() {
        let identity = Identity::generate();
        let signature = bs58::decode(identity.sign(b"hello")).into_vec().unwrap();
        let signature = Signature::from_slice(&signature).unwrap();

        assert!(identity
            .verifying_key()
            .verify(b"hello", &signature)
            .is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = Identity::generate();
        let secret = bs58::encode(identity.key.to_bytes()).into_string();
        let debug = format!("{identity:?}");

        assert!(debug.contains(&identity.pubkey()));
        assert!(!debug.contains(&secret));
        assert!(!debug.contains(&format!("{:?}", identity.key.to_bytes())));
    }
}
