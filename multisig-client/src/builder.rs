// builder.rs — instruction builders with the program's account ordering.

use multisig_core::{AccountMeta, Instruction, Pubkey};

use crate::ledger::TransactionInstruction;

/// `InitWallet`: the three signers only need to be referenced, not sign.
pub fn init_wallet(
    program_id: &Pubkey,
    wallet: &Pubkey,
    signers: [Pubkey; 3],
    m: u8,
) -> TransactionInstruction {
    let mut accounts = vec![AccountMeta::new(*wallet, false)];
    accounts.extend(signers.iter().map(|s| AccountMeta::new_readonly(*s, false)));
    TransactionInstruction {
        program_id: *program_id,
        accounts,
        data: Instruction::InitWallet { m }.pack(),
    }
}

pub fn create_request(
    program_id: &Pubkey,
    wallet: &Pubkey,
    request: &Pubkey,
    creator: &Pubkey,
    receiver: &Pubkey,
    amount: u64,
) -> TransactionInstruction {
    TransactionInstruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*wallet, false),
            AccountMeta::new(*request, false),
            AccountMeta::new_readonly(*creator, true),
        ],
        data: Instruction::CreateRequest {
            amount,
            receiver: *receiver,
        }
        .pack(),
    }
}

/// `Approve`: only the approving signer signs. The wallet is writable so the
/// threshold-reaching approval can debit it.
pub fn approve(
    program_id: &Pubkey,
    wallet: &Pubkey,
    request: &Pubkey,
    signer: &Pubkey,
    receiver: &Pubkey,
) -> TransactionInstruction {
    TransactionInstruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*wallet, false),
            AccountMeta::new(*request, false),
            AccountMeta::new_readonly(*signer, true),
            AccountMeta::new(*receiver, false),
        ],
        data: Instruction::Approve.pack(),
    }
}
