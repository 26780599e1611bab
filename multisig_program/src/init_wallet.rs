// init_wallet.rs — handler for the InitWallet instruction.
//
// Expected accounts:
// - accounts[0]: wallet (owned by the program, writable, zeroed Wallet::LEN bytes)
// - accounts[1..4]: the three designated signers (no signature needed)

use log::info;
use multisig_core::{Account, AccountWithMetadata, MultisigResult, Pubkey, Wallet};

use crate::{check_owner, post_states};

pub fn handle(
    program_id: &Pubkey,
    accounts: &[AccountWithMetadata],
    m: u8,
) -> MultisigResult<Vec<Account>> {
    let wallet_account = &accounts[0];
    check_owner(program_id, wallet_account)?;

    let mut wallet = Wallet::unpack(&wallet_account.account.data)?;
    let signers = [
        accounts[1].account_id,
        accounts[2].account_id,
        accounts[3].account_id,
    ];
    wallet.initialize(m, signers)?;

    let mut posts = post_states(accounts);
    wallet.pack_into(&mut posts[0].data)?;

    info!("wallet {} initialized: {:?}", wallet_account.account_id, wallet);
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use multisig_core::MultisigError;

    fn init_accounts(wallet_data: Vec<u8>, signers: [Pubkey; 3]) -> Vec<AccountWithMetadata> {
        let mut accounts = vec![make_account(
            WALLET_ID,
            program_account(500, wallet_data),
            false,
            true,
        )];
        for signer in signers {
            accounts.push(make_account(signer, Account::default(), false, false));
        }
        accounts
    }

    #[test]
    fn test_init_wallet_writes_record() {
        let accounts = init_accounts(vec![0u8; Wallet::LEN], [SIGNER_A, SIGNER_B, SIGNER_C]);
        let posts = handle(&PROGRAM_ID, &accounts, 2).unwrap();

        assert_eq!(posts.len(), 4);
        let wallet = Wallet::unpack(&posts[0].data).unwrap();
        assert!(wallet.is_initialized());
        assert_eq!(wallet.m, 2);
        assert_eq!(wallet.signers(), [SIGNER_A, SIGNER_B, SIGNER_C]);
        assert_eq!(posts[0].balance, 500);
        assert_eq!(posts[1], accounts[1].account);
    }

    #[test]
    fn test_init_wallet_twice_fails() {
        let existing = initialized_wallet(3).pack().unwrap();
        let accounts = init_accounts(existing, [SIGNER_C, SIGNER_B, SIGNER_A]);
        assert_eq!(
            handle(&PROGRAM_ID, &accounts, 1),
            Err(MultisigError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_init_wallet_bad_threshold() {
        let accounts = init_accounts(vec![0u8; Wallet::LEN], [SIGNER_A, SIGNER_B, SIGNER_C]);
        assert_eq!(handle(&PROGRAM_ID, &accounts, 0), Err(MultisigError::InvalidThreshold));
        assert_eq!(handle(&PROGRAM_ID, &accounts, 4), Err(MultisigError::InvalidThreshold));
    }

    #[test]
    fn test_init_wallet_duplicate_signer() {
        let accounts = init_accounts(vec![0u8; Wallet::LEN], [SIGNER_A, SIGNER_B, SIGNER_A]);
        assert_eq!(handle(&PROGRAM_ID, &accounts, 2), Err(MultisigError::DuplicateSigner));
    }

    #[test]
    fn test_init_wallet_wrong_size() {
        let accounts = init_accounts(vec![0u8; Wallet::LEN + 1], [SIGNER_A, SIGNER_B, SIGNER_C]);
        assert_eq!(handle(&PROGRAM_ID, &accounts, 2), Err(MultisigError::LayoutMismatch));
    }

    #[test]
    fn test_init_wallet_foreign_owner() {
        let mut accounts = init_accounts(vec![0u8; Wallet::LEN], [SIGNER_A, SIGNER_B, SIGNER_C]);
        accounts[0].account.owner = OUTSIDER;
        assert_eq!(handle(&PROGRAM_ID, &accounts, 2), Err(MultisigError::IncorrectProgramId));
    }
}
