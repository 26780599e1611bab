// multisig_core — shared types for the 3-signer threshold multisig program.
//
// Holds the instruction enum and its wire codec, the Wallet/Request records,
// the account model, and the error taxonomy. Used by the on-chain program and
// by off-chain clients alike.

pub mod account;
pub mod error;
pub mod pubkey;
pub mod state;

pub use account::{Account, AccountMeta, AccountRole, AccountWithMetadata};
pub use error::{MultisigError, MultisigResult};
pub use pubkey::{ParsePubkeyError, Pubkey};
pub use state::{Request, RequestStatus, Wallet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// Instructions for the multisig program.
///
/// Flow:
/// 1. `InitWallet { m }` fixes the threshold and the three signers
/// 2. `CreateRequest` binds a fresh request account to the wallet
/// 3. Each designated signer sends `Approve`; the approval that reaches `m`
///    also performs the transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Initialize a multisig wallet.
    ///
    /// **Accounts:**
    /// 0. `wallet` — writable, uninitialized wallet account
    /// 1. `signer1`
    /// 2. `signer2`
    /// 3. `signer3`
    InitWallet {
        /// Required approvals (1..=3)
        m: u8,
    },

    /// Initialize a withdrawal request against a wallet.
    ///
    /// **Accounts:**
    /// 0. `wallet` — initialized wallet account
    /// 1. `request` — writable, uninitialized request account
    /// 2. `creator` — signer
    CreateRequest {
        amount: u64,
        receiver: Pubkey,
    },

    /// Approve a request as one of the wallet's signers.
    ///
    /// **Accounts:**
    /// 0. `wallet` — writable, debited on execution
    /// 1. `request` — writable
    /// 2. `signer` — signer, one of the designated keys
    /// 3. `receiver` — writable, credited on execution
    Approve,
}

impl Instruction {
    pub const INIT_WALLET: u8 = 0;
    pub const CREATE_REQUEST: u8 = 1;
    pub const APPROVE: u8 = 2;

    pub fn tag(&self) -> u8 {
        match self {
            Self::InitWallet { .. } => Self::INIT_WALLET,
            Self::CreateRequest { .. } => Self::CREATE_REQUEST,
            Self::Approve => Self::APPROVE,
        }
    }

    /// Decode `[op-code][payload]`. Payloads must have their exact length.
    pub fn unpack(input: &[u8]) -> MultisigResult<Self> {
        let (tag, rest) = input
            .split_first()
            .ok_or(MultisigError::InvalidInstructionData)?;

        match *tag {
            Self::INIT_WALLET => {
                let [m] = rest else {
                    return Err(MultisigError::InvalidInstructionData);
                };
                Ok(Self::InitWallet { m: *m })
            }
            Self::CREATE_REQUEST => {
                if rest.len() != 8 + 32 {
                    return Err(MultisigError::InvalidInstructionData);
                }
                let amount = rest
                    .get(..8)
                    .and_then(|slice| slice.try_into().ok())
                    .map(u64::from_le_bytes)
                    .ok_or(MultisigError::InvalidInstructionData)?;
                let receiver =
                    Pubkey::from_slice(&rest[8..]).ok_or(MultisigError::InvalidInstructionData)?;
                Ok(Self::CreateRequest { amount, receiver })
            }
            Self::APPROVE => {
                if !rest.is_empty() {
                    return Err(MultisigError::InvalidInstructionData);
                }
                Ok(Self::Approve)
            }
            _ => Err(MultisigError::UnknownInstruction),
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut buf = vec![self.tag()];
        match self {
            Self::InitWallet { m } => buf.push(*m),
            Self::CreateRequest { amount, receiver } => {
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.extend_from_slice(receiver.as_bytes());
            }
            Self::Approve => {}
        }
        buf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_init_wallet() {
        assert_eq!(Instruction::unpack(&[0, 2]).unwrap(), Instruction::InitWallet { m: 2 });
    }

    #[test]
    fn test_unpack_create_request() {
        let receiver = Pubkey::new([9u8; 32]);
        let mut data = vec![1u8];
        data.extend_from_slice(&100_000u64.to_le_bytes());
        data.extend_from_slice(receiver.as_bytes());

        let ix = Instruction::unpack(&data).unwrap();
        assert_eq!(ix, Instruction::CreateRequest { amount: 100_000, receiver });
        assert_eq!(ix.pack(), data);
    }

    #[test]
    fn test_unpack_approve() {
        assert_eq!(Instruction::unpack(&[2]).unwrap(), Instruction::Approve);
        assert_eq!(Instruction::Approve.pack(), vec![2]);
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(Instruction::unpack(&[3]), Err(MultisigError::UnknownInstruction));
        assert_eq!(Instruction::unpack(&[0xff, 1]), Err(MultisigError::UnknownInstruction));
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(Instruction::unpack(&[]), Err(MultisigError::InvalidInstructionData));
        assert_eq!(Instruction::unpack(&[0]), Err(MultisigError::InvalidInstructionData));
        assert_eq!(Instruction::unpack(&[0, 1, 1]), Err(MultisigError::InvalidInstructionData));
        assert_eq!(Instruction::unpack(&[1, 0, 0]), Err(MultisigError::InvalidInstructionData));
        assert_eq!(Instruction::unpack(&[2, 0]), Err(MultisigError::InvalidInstructionData));
    }
}
