//! Multisig program — instruction dispatcher and handlers.
//!
//! The program is a pure function from account pre-states to post-states.
//! Nothing is written in place: the hosting ledger commits the returned
//! post-states only when every instruction of a transaction succeeds.

pub mod approve;
pub mod create_request;
pub mod execute;
pub mod init_wallet;

use log::{info, warn};
use multisig_core::{
    Account, AccountRole, AccountWithMetadata, Instruction, MultisigError, MultisigResult, Pubkey,
};

const INIT_WALLET_ROLES: [AccountRole; 4] = [
    AccountRole::WRITABLE, // wallet
    AccountRole::READONLY, // signer1
    AccountRole::READONLY, // signer2
    AccountRole::READONLY, // signer3
];

const CREATE_REQUEST_ROLES: [AccountRole; 3] = [
    AccountRole::READONLY, // wallet
    AccountRole::WRITABLE, // request
    AccountRole::SIGNER,   // creator
];

const APPROVE_ROLES: [AccountRole; 4] = [
    AccountRole::WRITABLE, // wallet
    AccountRole::WRITABLE, // request
    AccountRole::SIGNER,   // approving signer
    AccountRole::WRITABLE, // receiver
];

/// Minimum roles for the leading accounts of `instruction`.
pub fn required_roles(instruction: &Instruction) -> &'static [AccountRole] {
    match instruction {
        Instruction::InitWallet { .. } => &INIT_WALLET_ROLES,
        Instruction::CreateRequest { .. } => &CREATE_REQUEST_ROLES,
        Instruction::Approve => &APPROVE_ROLES,
    }
}

/// Main entry point called by the ledger.
///
/// Returns one post-state per entry of `accounts`, in the same order.
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountWithMetadata],
    instruction_data: &[u8],
) -> MultisigResult<Vec<Account>> {
    let instruction = Instruction::unpack(instruction_data).inspect_err(|e| {
        warn!("rejected instruction data {:?}: {}", instruction_data.first(), e);
    })?;
    info!("Instruction::{:?}", instruction);

    let result = check_roles(accounts, required_roles(&instruction)).and_then(|()| {
        match instruction {
            Instruction::InitWallet { m } => init_wallet::handle(program_id, accounts, m),
            Instruction::CreateRequest { amount, receiver } => {
                create_request::handle(program_id, accounts, amount, receiver)
            }
            Instruction::Approve => approve::handle(program_id, accounts),
        }
    });

    if let Err(e) = &result {
        warn!("instruction {} failed: {} (code {})", instruction.tag(), e, e.code());
    }
    result
}

fn check_roles(accounts: &[AccountWithMetadata], roles: &[AccountRole]) -> MultisigResult<()> {
    if accounts.len() < roles.len() {
        warn!("expected {} accounts, got {}", roles.len(), accounts.len());
        return Err(MultisigError::NotEnoughAccountKeys);
    }
    for (index, (account, role)) in accounts.iter().zip(roles).enumerate() {
        if !role.is_satisfied_by(account) {
            warn!(
                "account {} ({}) lacks role {:?}: signer={} writable={}",
                index, account.account_id, role, account.is_signer, account.is_writable
            );
            return Err(MultisigError::InvalidAccountRole);
        }
    }
    Ok(())
}

pub(crate) fn check_owner(program_id: &Pubkey, account: &AccountWithMetadata) -> MultisigResult<()> {
    if account.account.owner != *program_id {
        warn!(
            "wrong owner for {}: owner {}, program_id {}",
            account.account_id, account.account.owner, program_id
        );
        return Err(MultisigError::IncorrectProgramId);
    }
    Ok(())
}

/// Start post-states as copies of the pre-states.
pub(crate) fn post_states(accounts: &[AccountWithMetadata]) -> Vec<Account> {
    accounts.iter().map(|a| a.account.clone()).collect()
}


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;
    use multisig_core::{Request, RequestStatus, Wallet};

    fn approve_accounts(
        wallet: &Wallet,
        wallet_balance: u64,
        request: &Request,
        signer: Pubkey,
    ) -> Vec<AccountWithMetadata> {
        vec![
            make_account(WALLET_ID, program_account(wallet_balance, wallet.pack().unwrap()), false, true),
            make_account(REQUEST_ID, program_account(0, request.pack().unwrap()), false, true),
            make_account(signer, Account::default(), true, false),
            make_account(RECEIVER, Account::default(), false, true),
        ]
    }

    /// Feed post-states back as the next pre-states.
    fn apply(accounts: &mut [AccountWithMetadata], posts: Vec<Account>) {
        for (account, post) in accounts.iter_mut().zip(posts) {
            account.account = post;
        }
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            process(&PROGRAM_ID, &[], &[9]),
            Err(MultisigError::UnknownInstruction)
        );
    }

    #[test]
    fn test_not_enough_accounts() {
        let accounts = vec![make_account(
            WALLET_ID,
            program_account(0, vec![0u8; Wallet::LEN]),
            false,
            true,
        )];
        assert_eq!(
            process(&PROGRAM_ID, &accounts, &[0, 2]),
            Err(MultisigError::NotEnoughAccountKeys)
        );
    }

    #[test]
    fn test_role_check_precedes_semantic_checks() {
        // Request data is garbage-length and the signer is an outsider, but the
        // missing signature must be reported first.
        let wallet = initialized_wallet(2);
        let mut accounts = vec![
            make_account(WALLET_ID, program_account(0, wallet.pack().unwrap()), false, true),
            make_account(REQUEST_ID, program_account(0, vec![1, 2, 3]), false, true),
            make_account(OUTSIDER, Account::default(), false, false),
            make_account(RECEIVER, Account::default(), false, true),
        ];
        assert_eq!(
            process(&PROGRAM_ID, &accounts, &[2]),
            Err(MultisigError::InvalidAccountRole)
        );

        accounts[2].is_signer = true;
        assert_eq!(
            process(&PROGRAM_ID, &accounts, &[2]),
            Err(MultisigError::LayoutMismatch)
        );
    }

    #[test]
    fn test_readonly_wallet_cannot_be_approved_against() {
        let wallet = initialized_wallet(1);
        let request = pending_request(&wallet, 10);
        let mut accounts = approve_accounts(&wallet, 100, &request, SIGNER_A);
        accounts[0].is_writable = false;
        assert_eq!(
            process(&PROGRAM_ID, &accounts, &[2]),
            Err(MultisigError::InvalidAccountRole)
        );
    }

    #[test]
    fn test_two_of_three_scenario() {
        let mut accounts = vec![
            make_account(
                WALLET_ID,
                program_account(1_000_000, vec![0u8; Wallet::LEN]),
                false,
                true,
            ),
            make_account(SIGNER_A, Account::default(), false, false),
            make_account(SIGNER_B, Account::default(), false, false),
            make_account(SIGNER_C, Account::default(), false, false),
        ];
        let posts = process(&PROGRAM_ID, &accounts, &[0, 2]).unwrap();
        apply(&mut accounts, posts);
        let wallet = Wallet::unpack(&accounts[0].account.data).unwrap();
        assert_eq!(wallet.m, 2);

        let mut create = vec![
            accounts[0].clone(),
            make_account(REQUEST_ID, program_account(0, vec![0u8; Request::LEN]), false, true),
            make_account(SIGNER_A, Account::default(), true, false),
        ];
        let data = Instruction::CreateRequest { amount: 100_000, receiver: RECEIVER }.pack();
        let posts = process(&PROGRAM_ID, &create, &data).unwrap();
        apply(&mut create, posts);
        let request = Request::unpack(&create[1].account.data).unwrap();
        assert_eq!(request.status(), RequestStatus::Pending);

        let mut approve = approve_accounts(&wallet, 1_000_000, &request, SIGNER_A);
        let posts = process(&PROGRAM_ID, &approve, &[2]).unwrap();
        apply(&mut approve, posts);
        let request = Request::unpack(&approve[1].account.data).unwrap();
        assert_eq!(request.approvals(), [true, false, false]);
        assert_eq!(request.status(), RequestStatus::Pending);
        assert_eq!(approve[0].account.balance, 1_000_000);

        approve[2] = make_account(SIGNER_B, Account::default(), true, false);
        let posts = process(&PROGRAM_ID, &approve, &[2]).unwrap();
        apply(&mut approve, posts);
        let request = Request::unpack(&approve[1].account.data).unwrap();
        assert_eq!(request.approvals(), [true, true, false]);
        assert_eq!(request.status(), RequestStatus::Executed);
        assert_eq!(approve[0].account.balance, 900_000);
        assert_eq!(approve[3].account.balance, 100_000);

        approve[2] = make_account(SIGNER_C, Account::default(), true, false);
        assert_eq!(
            process(&PROGRAM_ID, &approve, &[2]),
            Err(MultisigError::NotPending)
        );
    }
}
