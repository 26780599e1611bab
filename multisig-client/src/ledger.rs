// ledger.rs — transaction types and the ledger client interface.

use std::collections::BTreeSet;
use std::fmt;

use multisig_core::{Account, AccountMeta, MultisigError, Pubkey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::ClientError;

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// One program invocation inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInstruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Ordered instructions plus the keys that signed them.
///
/// `signers` lists keys whose signatures the submitting side has produced.
/// Verifying the signatures themselves belongs to the ledger's transport
/// layer; the ledger only checks that every account marked `is_signer` is
/// covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub instructions: Vec<TransactionInstruction>,
    pub signers: Vec<Pubkey>,
}

impl Transaction {
    pub fn new(signers: &[Pubkey]) -> Self {
        Self {
            instructions: vec![],
            signers: signers.to_vec(),
        }
    }

    pub fn add(mut self, instruction: TransactionInstruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// Keys some instruction marks as `is_signer`.
    pub fn required_signers(&self) -> BTreeSet<Pubkey> {
        self.instructions
            .iter()
            .flat_map(|ix| ix.accounts.iter())
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect()
    }

    /// Canonical bytes of the instructions, used for the transaction id.
    pub fn message_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for ix in &self.instructions {
            out.extend_from_slice(ix.program_id.as_bytes());
            out.extend_from_slice(&(ix.accounts.len() as u32).to_le_bytes());
            for meta in &ix.accounts {
                out.extend_from_slice(meta.pubkey.as_bytes());
                out.push(meta.is_signer as u8);
                out.push(meta.is_writable as u8);
            }
            out.extend_from_slice(&(ix.data.len() as u32).to_le_bytes());
            out.extend_from_slice(&ix.data);
        }
        out
    }
}

/// Transaction id: SHA-256 of a ledger sequence number and the message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId([u8; 32]);

impl TxId {
    pub fn compute(sequence: u64, message: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(sequence.to_le_bytes());
        hasher.update(message);
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self)
    }
}

// ---------------------------------------------------------------------------
// Execution outcome
// ---------------------------------------------------------------------------

/// Why a submitted transaction was not committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("instruction {index} failed: {error}")]
    Program { index: usize, error: MultisigError },
    #[error("no program deployed at {0}")]
    UnknownProgram(Pubkey),
    #[error("account {0} is passed writable more than once in one instruction")]
    DuplicateWritableAccount(Pubkey),
    #[error("program returned {got} post-states for {expected} accounts")]
    PostStateCountMismatch { expected: usize, got: usize },
    #[error("read-only account {0} was modified")]
    ReadonlyAccountModified(Pubkey),
    #[error("program debited account {0} it does not own")]
    IllegalDebit(Pubkey),
    #[error("illegal change to data or owner of account {0}")]
    IllegalDataChange(Pubkey),
    #[error("balances before and after the instruction do not sum up")]
    UnbalancedTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Committed,
    Failed(TransactionError),
}

// ---------------------------------------------------------------------------
// Ledger client
// ---------------------------------------------------------------------------

/// What the multisig client needs from a ledger.
///
/// Implementations decide transport, fees and confirmation depth. A
/// transaction either commits all of its instructions or none of them.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// Allocate a zero-filled account of `space` bytes holding `lamports`,
    /// owned by `owner`.
    async fn create_account(
        &self,
        address: Pubkey,
        space: usize,
        lamports: u64,
        owner: Pubkey,
    ) -> Result<TxId, ClientError>;

    /// Submit a transaction. An `Ok` id only means it was accepted; use
    /// [`confirm_transaction`](LedgerClient::confirm_transaction) for the
    /// outcome.
    async fn send_transaction(&self, tx: Transaction) -> Result<TxId, ClientError>;

    async fn get_account(&self, address: &Pubkey) -> Result<Account, ClientError>;

    async fn confirm_transaction(&self, id: &TxId) -> Result<TransactionStatus, ClientError>;
}
