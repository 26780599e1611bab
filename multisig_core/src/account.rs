// account.rs — ledger account model seen by the program and its clients.

use serde::{Deserialize, Serialize};

use crate::Pubkey;

/// Stored ledger account: owning program, native balance and raw data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub owner: Pubkey,
    pub balance: u64,
    pub data: Vec<u8>,
}

impl Account {
    /// A zero-filled account of `space` bytes.
    pub fn new(owner: Pubkey, balance: u64, space: usize) -> Self {
        Self {
            owner,
            balance,
            data: vec![0u8; space],
        }
    }
}

/// Account reference inside an instruction, with the roles the caller claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// Pre-state of one account as handed to the program by the ledger.
///
/// `is_signer` is only set when the ledger has verified a signature for
/// `account_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountWithMetadata {
    pub account_id: Pubkey,
    pub account: Account,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Signer/writable requirements for one account slot of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRole {
    pub signer: bool,
    pub writable: bool,
}

impl AccountRole {
    pub const READONLY: Self = Self { signer: false, writable: false };
    pub const WRITABLE: Self = Self { signer: false, writable: true };
    pub const SIGNER: Self = Self { signer: true, writable: false };

    /// True when `account` carries at least the privileges this role needs.
    pub fn is_satisfied_by(&self, account: &AccountWithMetadata) -> bool {
        (!self.signer || account.is_signer) && (!self.writable || account.is_writable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(is_signer: bool, is_writable: bool) -> AccountWithMetadata {
        AccountWithMetadata {
            account_id: Pubkey::new([1u8; 32]),
            account: Account::default(),
            is_signer,
            is_writable,
        }
    }

    #[test]
    fn test_role_allows_extra_privileges() {
        assert!(AccountRole::READONLY.is_satisfied_by(&meta(true, true)));
        assert!(AccountRole::WRITABLE.is_satisfied_by(&meta(true, true)));
        assert!(AccountRole::SIGNER.is_satisfied_by(&meta(true, false)));
    }

    #[test]
    fn test_role_rejects_missing_privileges() {
        assert!(!AccountRole::WRITABLE.is_satisfied_by(&meta(true, false)));
        assert!(!AccountRole::SIGNER.is_satisfied_by(&meta(false, true)));
    }

    #[test]
    fn test_new_account_is_zero_filled() {
        let account = Account::new(Pubkey::new([2u8; 32]), 10, 4);
        assert_eq!(account.data, vec![0u8; 4]);
        assert_eq!(account.balance, 10);
    }
}
