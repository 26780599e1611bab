// approve.rs — handler for the Approve instruction.
//
// Records one designated signer's approval. The approval that brings the
// count to the wallet threshold also executes the transfer; if the transfer
// cannot happen, the approval is rejected with it.
//
// Expected accounts:
// - accounts[0]: wallet (owned by the program, writable, debited on execution)
// - accounts[1]: request (owned by the program, writable, bound to accounts[0])
// - accounts[2]: signer (must sign, must be one of the wallet's three keys)
// - accounts[3]: receiver (writable, must match the request's receiver)

use log::info;
use multisig_core::{
    Account, AccountWithMetadata, MultisigError, MultisigResult, Pubkey, Request, Wallet,
};

use crate::{check_owner, execute, post_states};

pub fn handle(program_id: &Pubkey, accounts: &[AccountWithMetadata]) -> MultisigResult<Vec<Account>> {
    let wallet_account = &accounts[0];
    let request_account = &accounts[1];
    let signer = &accounts[2];
    let receiver_account = &accounts[3];

    check_owner(program_id, wallet_account)?;
    check_owner(program_id, request_account)?;

    let wallet = Wallet::unpack(&wallet_account.account.data)?;
    let mut request = Request::unpack(&request_account.account.data)?;

    if request.is_initialized() && request.wallet != wallet_account.account_id {
        return Err(MultisigError::WalletMismatch);
    }
    if request.is_initialized() && request.receiver != receiver_account.account_id {
        return Err(MultisigError::ReceiverMismatch);
    }

    let threshold_met = request.approve(&wallet, &signer.account_id)?;
    info!(
        "request {} approved by {} ({}/{})",
        request_account.account_id,
        signer.account_id,
        request.approval_count(),
        wallet.m
    );

    let mut posts = post_states(accounts);
    if threshold_met {
        let (wallet_post, rest) = posts.split_at_mut(1);
        execute::handle(&wallet, &request, &mut wallet_post[0], &mut rest[2])?;
    }
    request.pack_into(&mut posts[1].data)?;

    Ok(posts)
}
