// Execute — performs the native-balance transfer of a fully-approved request.
//
// There is no Execute op-code. The approve handler calls this in the same
// instruction as the approval that reaches the threshold, so a request can
// never sit satisfied but unexecuted.

use log::info;
use multisig_core::{Account, MultisigError, MultisigResult, Request, Wallet};

/// Move `request.amount` from the wallet account to the receiver account.
///
/// Both accounts are post-state copies owned by the caller; they are left
/// untouched on error.
pub fn handle(
    wallet: &Wallet,
    request: &Request,
    wallet_account: &mut Account,
    receiver_account: &mut Account,
) -> MultisigResult<()> {
    if !request.has_threshold(wallet.m) {
        return Err(MultisigError::ThresholdNotMet);
    }

    let amount = request.amount;
    let debited = wallet_account
        .balance
        .checked_sub(amount)
        .ok_or(MultisigError::InsufficientWalletBalance)?;
    let credited = receiver_account
        .balance
        .checked_add(amount)
        .ok_or(MultisigError::ArithmeticOverflow)?;

    wallet_account.balance = debited;
    receiver_account.balance = credited;

    info!("request executed: {} transferred to {}", amount, request.receiver);
    Ok(())
}
