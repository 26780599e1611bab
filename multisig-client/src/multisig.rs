//! High-level multisig flows over any [`LedgerClient`].
//!
//! Mirrors the usual script sequence: allocate the wallet account, initialize
//! it with three signers, allocate and initialize a request, then approve it
//! from each signer until the transfer executes.
//!
//! `wallet_json` and `request_json` are read-only views for display.

use log::info;
use multisig_core::{Pubkey, Request, RequestStatus, Wallet};
use serde_json::{Value, json};

use crate::{
    ClientConfig, ClientError, LedgerClient, Transaction, TransactionError, TransactionStatus,
    TxId, builder,
};

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Submit `tx` and map a failed confirmation to an error.
pub async fn send_and_confirm<L: LedgerClient>(
    ledger: &L,
    tx: Transaction,
) -> Result<TxId, ClientError> {
    let id = ledger.send_transaction(tx).await?;
    match ledger.confirm_transaction(&id).await? {
        TransactionStatus::Committed => Ok(id),
        TransactionStatus::Failed(TransactionError::Program { error, .. }) => {
            Err(ClientError::Program(error))
        }
        TransactionStatus::Failed(e) => Err(ClientError::Transaction(e)),
    }
}

// ---------------------------------------------------------------------------
// Account allocation
// ---------------------------------------------------------------------------

/// Allocate an empty wallet account funded with `lamports`.
pub async fn create_wallet_account<L: LedgerClient>(
    ledger: &L,
    config: &ClientConfig,
    wallet: Pubkey,
    lamports: u64,
) -> Result<TxId, ClientError> {
    ledger
        .create_account(wallet, Wallet::LEN, lamports, config.program_id)
        .await
}

/// Allocate an empty request account.
pub async fn create_request_account<L: LedgerClient>(
    ledger: &L,
    config: &ClientConfig,
    request: Pubkey,
    lamports: u64,
) -> Result<TxId, ClientError> {
    ledger
        .create_account(request, Request::LEN, lamports, config.program_id)
        .await
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

pub async fn initialize_wallet<L: LedgerClient>(
    ledger: &L,
    config: &ClientConfig,
    wallet: Pubkey,
    signers: [Pubkey; 3],
    m: u8,
) -> Result<TxId, ClientError> {
    let tx = Transaction::new(&[]).add(builder::init_wallet(&config.program_id, &wallet, signers, m));
    let id = send_and_confirm(ledger, tx).await?;
    info!("wallet {} initialized ({}-of-3), tx {}", wallet, m, id);
    Ok(id)
}

pub async fn initialize_request<L: LedgerClient>(
    ledger: &L,
    config: &ClientConfig,
    wallet: Pubkey,
    request: Pubkey,
    creator: Pubkey,
    receiver: Pubkey,
    amount: u64,
) -> Result<TxId, ClientError> {
    let ix = builder::create_request(&config.program_id, &wallet, &request, &creator, &receiver, amount);
    let id = send_and_confirm(ledger, Transaction::new(&[creator]).add(ix)).await?;
    info!("request {} for {} to {} created, tx {}", request, amount, receiver, id);
    Ok(id)
}

/// Approve `request` as `signer`. The receiver is read from the request.
///
/// Returns the request status after the approval.
pub async fn approve_request<L: LedgerClient>(
    ledger: &L,
    config: &ClientConfig,
    wallet: Pubkey,
    request: Pubkey,
    signer: Pubkey,
) -> Result<RequestStatus, ClientError> {
    let current = fetch_request(ledger, &request).await?;
    let ix = builder::approve(&config.program_id, &wallet, &request, &signer, &current.receiver);
    let id = send_and_confirm(ledger, Transaction::new(&[signer]).add(ix)).await?;

    let status = fetch_request(ledger, &request).await?.status();
    info!("request {} approved by {}: {:?}, tx {}", request, signer, status, id);
    Ok(status)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

pub async fn fetch_wallet<L: LedgerClient>(ledger: &L, wallet: &Pubkey) -> Result<Wallet, ClientError> {
    let account = ledger.get_account(wallet).await?;
    Ok(Wallet::unpack(&account.data)?)
}

pub async fn fetch_request<L: LedgerClient>(ledger: &L, request: &Pubkey) -> Result<Request, ClientError> {
    let account = ledger.get_account(request).await?;
    Ok(Request::unpack(&account.data)?)
}

fn status_str(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Uninitialized => "Uninitialized",
        RequestStatus::Pending => "Pending",
        RequestStatus::Executed => "Executed",
    }
}

pub fn wallet_json(address: &Pubkey, wallet: &Wallet, balance: u64) -> Result<Value, ClientError> {
    let data = wallet.pack()?;
    Ok(json!({
        "address": address.to_string(),
        "initialized": wallet.is_initialized(),
        "threshold": wallet.m,
        "signers": wallet.signers().iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        "balance": balance,
        "data_hex": hex::encode(data),
    }))
}

pub fn request_json(address: &Pubkey, request: &Request, wallet: &Wallet) -> Result<Value, ClientError> {
    let data = request.pack()?;
    Ok(json!({
        "address": address.to_string(),
        "wallet": request.wallet.to_string(),
        "receiver": request.receiver.to_string(),
        "amount": request.amount,
        "approvals": request.approvals(),
        "approval_count": request.approval_count(),
        "threshold": wallet.m,
        "finished": request.is_finished(),
        "status": status_str(request.status()),
        "data_hex": hex::encode(data),
    }))
}
