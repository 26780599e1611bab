// config.rs — client configuration from the environment.

use multisig_core::Pubkey;
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Environment variable holding the program id (base58 or hex).
pub const PROGRAM_ID_ENV: &str = "MULTISIG_PROGRAM_ID";

/// Program id of the original devnet deployment.
pub const DEFAULT_PROGRAM_ID: &str = "5FpL8Pq6ahy8dh7ydXqfYrJYCiKDHrwcGFGtRoZ1t9DA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Program that owns wallet and request accounts.
    pub program_id: Pubkey,
}

impl ClientConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Read `MULTISIG_PROGRAM_ID`, falling back to [`DEFAULT_PROGRAM_ID`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::resolve(std::env::var(PROGRAM_ID_ENV).ok().as_deref())
    }

    fn resolve(program_id: Option<&str>) -> Result<Self, ClientError> {
        let raw = program_id.unwrap_or(DEFAULT_PROGRAM_ID);
        let program_id = raw
            .parse()
            .map_err(|e| ClientError::InvalidConfig(format!("{}: {}", PROGRAM_ID_ENV, e)))?;
        Ok(Self { program_id })
    }
}
