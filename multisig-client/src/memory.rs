// memory.rs — in-process ledger hosting the multisig program.
//
// Stands in for a local validator: accounts live in a map, transactions run
// one at a time, and a transaction's effects are committed only if every
// instruction in it succeeds and passes the runtime checks below.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};
use multisig_core::{Account, AccountWithMetadata, Pubkey};
use tokio::sync::Mutex;

use crate::ClientError;
use crate::ledger::{
    LedgerClient, Transaction, TransactionError, TransactionInstruction, TransactionStatus, TxId,
};

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    statuses: HashMap<TxId, TransactionStatus>,
    sequence: u64,
}

impl LedgerState {
    fn next_id(&mut self, message: &[u8]) -> TxId {
        let id = TxId::compute(self.sequence, message);
        self.sequence += 1;
        id
    }
}

/// Ledger with the multisig program deployed at `program_id`.
#[derive(Debug)]
pub struct InMemoryLedger {
    program_id: Pubkey,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Run all instructions against a scratch copy of the touched accounts.
    /// Returns the accounts to commit.
    fn execute(
        &self,
        accounts: &HashMap<Pubkey, Account>,
        tx: &Transaction,
    ) -> Result<HashMap<Pubkey, Account>, TransactionError> {
        let mut scratch: HashMap<Pubkey, Account> = HashMap::new();

        for (index, ix) in tx.instructions.iter().enumerate() {
            if ix.program_id != self.program_id {
                return Err(TransactionError::UnknownProgram(ix.program_id));
            }
            check_duplicate_writable(ix)?;

            // Accounts the ledger has never seen are handed over empty.
            let pre_states: Vec<AccountWithMetadata> = ix
                .accounts
                .iter()
                .map(|meta| AccountWithMetadata {
                    account_id: meta.pubkey,
                    account: scratch
                        .get(&meta.pubkey)
                        .or_else(|| accounts.get(&meta.pubkey))
                        .cloned()
                        .unwrap_or_default(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect();

            let post_states = multisig_program::process(&ix.program_id, &pre_states, &ix.data)
                .map_err(|error| TransactionError::Program { index, error })?;
            verify_post_states(&ix.program_id, &pre_states, &post_states)?;

            for (pre, post) in pre_states.iter().zip(post_states) {
                if post != pre.account {
                    scratch.insert(pre.account_id, post);
                }
            }
        }

        Ok(scratch)
    }
}

/// A key may be repeated, but only one of its positions may be writable.
/// Readonly positions must come back unchanged, so the single writable
/// post-state is the one committed.
fn check_duplicate_writable(ix: &TransactionInstruction) -> Result<(), TransactionError> {
    let mut writable = BTreeSet::new();
    for meta in ix.accounts.iter().filter(|meta| meta.is_writable) {
        if !writable.insert(meta.pubkey) {
            return Err(TransactionError::DuplicateWritableAccount(meta.pubkey));
        }
    }
    Ok(())
}

/// Runtime rules every program invocation must obey.
fn verify_post_states(
    program_id: &Pubkey,
    pre_states: &[AccountWithMetadata],
    post_states: &[Account],
) -> Result<(), TransactionError> {
    if pre_states.len() != post_states.len() {
        return Err(TransactionError::PostStateCountMismatch {
            expected: pre_states.len(),
            got: post_states.len(),
        });
    }

    let mut before: u128 = 0;
    let mut after: u128 = 0;
    for (pre, post) in pre_states.iter().zip(post_states) {
        let id = pre.account_id;
        let owned = pre.account.owner == *program_id;

        if !pre.is_writable && *post != pre.account {
            return Err(TransactionError::ReadonlyAccountModified(id));
        }
        if post.owner != pre.account.owner
            || post.data.len() != pre.account.data.len()
            || (!owned && post.data != pre.account.data)
        {
            return Err(TransactionError::IllegalDataChange(id));
        }
        if !owned && post.balance < pre.account.balance {
            return Err(TransactionError::IllegalDebit(id));
        }

        before += u128::from(pre.account.balance);
        after += u128::from(post.balance);
    }

    if before != after {
        return Err(TransactionError::UnbalancedTransaction);
    }
    Ok(())
}

impl LedgerClient for InMemoryLedger {
    async fn create_account(
        &self,
        address: Pubkey,
        space: usize,
        lamports: u64,
        owner: Pubkey,
    ) -> Result<TxId, ClientError> {
        let mut state = self.state.lock().await;
        if state.accounts.contains_key(&address) {
            return Err(ClientError::AccountAlreadyExists(address));
        }

        let mut message = address.as_bytes().to_vec();
        message.extend_from_slice(owner.as_bytes());
        message.extend_from_slice(&(space as u64).to_le_bytes());
        let id = state.next_id(&message);

        state.accounts.insert(address, Account::new(owner, lamports, space));
        state.statuses.insert(id, TransactionStatus::Committed);
        info!("account {} created: {} bytes, {} lamports, owner {}", address, space, lamports, owner);
        Ok(id)
    }

    async fn send_transaction(&self, tx: Transaction) -> Result<TxId, ClientError> {
        if tx.instructions.is_empty() {
            return Err(ClientError::EmptyTransaction);
        }
        if let Some(missing) = tx
            .required_signers()
            .into_iter()
            .find(|key| !tx.signers.contains(key))
        {
            return Err(ClientError::MissingSignature(missing));
        }

        let mut state = self.state.lock().await;
        let id = state.next_id(&tx.message_bytes());

        let status = match self.execute(&state.accounts, &tx) {
            Ok(changes) => {
                debug!("tx {} commits {} account(s)", id, changes.len());
                state.accounts.extend(changes);
                TransactionStatus::Committed
            }
            Err(e) => {
                warn!("tx {} failed: {}", id, e);
                TransactionStatus::Failed(e)
            }
        };
        info!("tx {} processed: {:?}", id, status);
        state.statuses.insert(id, status);
        Ok(id)
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Account, ClientError> {
        let state = self.state.lock().await;
        state
            .accounts
            .get(address)
            .cloned()
            .ok_or(ClientError::AccountNotFound(*address))
    }

    async fn confirm_transaction(&self, id: &TxId) -> Result<TransactionStatus, ClientError> {
        let state = self.state.lock().await;
        state
            .statuses
            .get(id)
            .cloned()
            .ok_or(ClientError::UnknownTransaction(*id))
    }
}
