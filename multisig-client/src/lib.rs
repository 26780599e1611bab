//! Client side of the multisig program.
//!
//! - [`builder`] builds the three program instructions with their account
//!   ordering
//! - [`ledger`] defines transactions and the [`LedgerClient`] interface
//! - [`memory`] is an in-process ledger hosting the program, used for tests
//!   and local runs
//! - [`multisig`] chains the above into the create/initialize/approve flows
//!
//! | Instruction    | Accounts in order                                            |
//! |----------------|--------------------------------------------------------------|
//! | init_wallet    | wallet (w), signer1, signer2, signer3                        |
//! | create_request | wallet, request (w), creator (s)                             |
//! | approve        | wallet (w), request (w), signer (s), receiver (w)            |

pub mod builder;
pub mod config;
pub mod ledger;
pub mod memory;
pub mod multisig;

pub use config::ClientConfig;
pub use ledger::{
    LedgerClient, Transaction, TransactionError, TransactionInstruction, TransactionStatus, TxId,
};
pub use memory::InMemoryLedger;

use multisig_core::{MultisigError, Pubkey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("program error: {0}")]
    Program(#[from] MultisigError),
    #[error("transaction failed: {0}")]
    Transaction(#[from] TransactionError),
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("account {0} already exists")]
    AccountAlreadyExists(Pubkey),
    #[error("missing signature for {0}")]
    MissingSignature(Pubkey),
    #[error("transaction has no instructions")]
    EmptyTransaction,
    #[error("unknown transaction {0}")]
    UnknownTransaction(TxId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
