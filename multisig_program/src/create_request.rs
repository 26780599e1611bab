// create_request.rs — handler for the CreateRequest instruction.
//
// Expected accounts:
// - accounts[0]: wallet (owned by the program, initialized)
// - accounts[1]: request (owned by the program, writable, zeroed Request::LEN bytes)
// - accounts[2]: creator (must sign)

use log::info;
use multisig_core::{Account, AccountWithMetadata, MultisigResult, Pubkey, Request, Wallet};

use crate::{check_owner, post_states};

pub fn handle(
    program_id: &Pubkey,
    accounts: &[AccountWithMetadata],
    amount: u64,
    receiver: Pubkey,
) -> MultisigResult<Vec<Account>> {
    let wallet_account = &accounts[0];
    let request_account = &accounts[1];
    check_owner(program_id, wallet_account)?;
    check_owner(program_id, request_account)?;

    let wallet = Wallet::unpack(&wallet_account.account.data)?;
    let mut request = Request::unpack(&request_account.account.data)?;
    request.initialize(wallet_account.account_id, &wallet, amount, receiver)?;

    let mut posts = post_states(accounts);
    request.pack_into(&mut posts[1].data)?;

    info!(
        "request {} created by {}: {} to {}",
        request_account.account_id, accounts[2].account_id, amount, receiver
    );
    Ok(posts)
}
