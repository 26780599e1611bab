//! Shared fixture for the end-to-end multisig tests.
//!
//! Every test gets its own [`InMemoryLedger`] with the program deployed at
//! the configured program id (`MULTISIG_PROGRAM_ID`, or the default).

use std::sync::atomic::{AtomicU8, Ordering};

use multisig_client::{ClientConfig, ClientError, InMemoryLedger, multisig};
use multisig_core::Pubkey;

/// Deterministic key with every byte set to `tag`.
pub fn key(tag: u8) -> Pubkey {
    Pubkey::new([tag; 32])
}

pub struct Fixture {
    pub ledger: InMemoryLedger,
    pub config: ClientConfig,
    pub wallet: Pubkey,
    pub signers: [Pubkey; 3],
    pub receiver: Pubkey,
    next_request: AtomicU8,
}

impl Fixture {
    /// Ledger with an initialized `m`-of-3 wallet holding `balance`.
    pub async fn new(m: u8, balance: u64) -> Result<Self, ClientError> {
        let fixture = Self::uninitialized(balance).await?;
        multisig::initialize_wallet(
            &fixture.ledger,
            &fixture.config,
            fixture.wallet,
            fixture.signers,
            m,
        )
        .await?;
        Ok(fixture)
    }

    /// Ledger with an allocated but uninitialized wallet account.
    pub async fn uninitialized(balance: u64) -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        let ledger = InMemoryLedger::new(config.program_id);
        let wallet = key(0xA0);
        multisig::create_wallet_account(&ledger, &config, wallet, balance).await?;

        Ok(Self {
            ledger,
            config,
            wallet,
            signers: [key(1), key(2), key(3)],
            receiver: key(0xB0),
            next_request: AtomicU8::new(0x10),
        })
    }

    /// Allocate a fresh request account and initialize it for `amount`.
    pub async fn new_request(&self, amount: u64) -> Result<Pubkey, ClientError> {
        self.new_request_to(amount, self.receiver).await
    }

    pub async fn new_request_to(&self, amount: u64, receiver: Pubkey) -> Result<Pubkey, ClientError> {
        let request = key(self.next_request.fetch_add(1, Ordering::Relaxed));
        multisig::create_request_account(&self.ledger, &self.config, request, 0).await?;
        multisig::initialize_request(
            &self.ledger,
            &self.config,
            self.wallet,
            request,
            self.signers[0],
            receiver,
            amount,
        )
        .await?;
        Ok(request)
    }
}
