// state.rs — persisted Wallet and Request records.
//
// Both records have a fixed little-endian layout. Borsh encodes u8, u64 and
// [u8; 32] with no framing, so the derived encoding is exactly that layout.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{MultisigError, MultisigResult, Pubkey};

pub const SIGNER_COUNT: usize = 3;
pub const MIN_THRESHOLD: u8 = 1;
pub const MAX_THRESHOLD: u8 = SIGNER_COUNT as u8;

fn flag(value: u8) -> bool {
    value != 0
}

fn check_len(data: &[u8], len: usize) -> MultisigResult<()> {
    if data.len() != len {
        return Err(MultisigError::LayoutMismatch);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// Multisig wallet: threshold plus three designated signers.
///
/// Layout: `[m][is_initialized][signer1:32][signer2:32][signer3:32]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Wallet {
    pub m: u8,
    pub is_initialized: u8,
    pub signer1: Pubkey,
    pub signer2: Pubkey,
    pub signer3: Pubkey,
}

impl Wallet {
    pub const LEN: usize = 1 + 1 + 32 * SIGNER_COUNT;

    pub fn unpack(data: &[u8]) -> MultisigResult<Self> {
        check_len(data, Self::LEN)?;
        borsh::from_slice(data).map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn pack(&self) -> MultisigResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn pack_into(&self, dst: &mut [u8]) -> MultisigResult<()> {
        check_len(dst, Self::LEN)?;
        self.serialize(&mut &mut dst[..])
            .map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn is_initialized(&self) -> bool {
        flag(self.is_initialized)
    }

    pub fn signers(&self) -> [Pubkey; SIGNER_COUNT] {
        [self.signer1, self.signer2, self.signer3]
    }

    /// Index (0..3) of `key` among the designated signers.
    pub fn signer_slot(&self, key: &Pubkey) -> Option<usize> {
        self.signers().iter().position(|s| s == key)
    }

    /// Set threshold and signers. Only valid once.
    pub fn initialize(&mut self, m: u8, signers: [Pubkey; SIGNER_COUNT]) -> MultisigResult<()> {
        if self.is_initialized() {
            return Err(MultisigError::AlreadyInitialized);
        }
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&m) {
            return Err(MultisigError::InvalidThreshold);
        }
        let [a, b, c] = signers;
        if a == b || a == c || b == c {
            return Err(MultisigError::DuplicateSigner);
        }

        self.m = m;
        self.signer1 = a;
        self.signer2 = b;
        self.signer3 = c;
        self.is_initialized = 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Uninitialized,
    /// Accepting approvals
    Pending,
    /// Threshold reached and the transfer has been performed
    Executed,
}

/// A single withdrawal proposal against one wallet.
///
/// Layout:
/// `[is_initialized][is_finished][amount:u64][wallet:32][receiver:32][s1][s2][s3]`.
///
/// `is_finished` is set by the approval that reaches the threshold, in the
/// same instruction that performs the transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Request {
    pub is_initialized: u8,
    pub is_finished: u8,
    pub amount: u64,
    pub wallet: Pubkey,
    pub receiver: Pubkey,
    pub is_signed1: u8,
    pub is_signed2: u8,
    pub is_signed3: u8,
}

impl Request {
    pub const LEN: usize = 1 + 1 + 8 + 32 + 32 + SIGNER_COUNT;

    pub fn unpack(data: &[u8]) -> MultisigResult<Self> {
        check_len(data, Self::LEN)?;
        borsh::from_slice(data).map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn pack(&self) -> MultisigResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn pack_into(&self, dst: &mut [u8]) -> MultisigResult<()> {
        check_len(dst, Self::LEN)?;
        self.serialize(&mut &mut dst[..])
            .map_err(|_| MultisigError::LayoutMismatch)
    }

    pub fn is_initialized(&self) -> bool {
        flag(self.is_initialized)
    }

    pub fn is_finished(&self) -> bool {
        flag(self.is_finished)
    }

    pub fn approvals(&self) -> [bool; SIGNER_COUNT] {
        [flag(self.is_signed1), flag(self.is_signed2), flag(self.is_signed3)]
    }

    pub fn approval_count(&self) -> u8 {
        self.approvals().iter().filter(|a| **a).count() as u8
    }

    pub fn has_threshold(&self, threshold: u8) -> bool {
        self.approval_count() >= threshold
    }

    pub fn status(&self) -> RequestStatus {
        if !self.is_initialized() {
            RequestStatus::Uninitialized
        } else if self.is_finished() {
            RequestStatus::Executed
        } else {
            RequestStatus::Pending
        }
    }

    /// Bind the request to `wallet_id` with all approvals cleared.
    pub fn initialize(
        &mut self,
        wallet_id: Pubkey,
        wallet: &Wallet,
        amount: u64,
        receiver: Pubkey,
    ) -> MultisigResult<()> {
        if self.is_initialized() {
            return Err(MultisigError::AlreadyInitialized);
        }
        if !wallet.is_initialized() {
            return Err(MultisigError::WalletNotInitialized);
        }
        if amount == 0 {
            return Err(MultisigError::InvalidAmount);
        }

        *self = Self {
            is_initialized: 1,
            is_finished: 0,
            amount,
            wallet: wallet_id,
            receiver,
            is_signed1: 0,
            is_signed2: 0,
            is_signed3: 0,
        };
        Ok(())
    }

    /// Slot of `signer` if it may approve now.
    fn approval_slot(&self, wallet: &Wallet, signer: &Pubkey) -> MultisigResult<usize> {
        if !wallet.is_initialized() {
            return Err(MultisigError::WalletNotInitialized);
        }
        if self.status() != RequestStatus::Pending {
            return Err(MultisigError::NotPending);
        }
        let slot = wallet.signer_slot(signer).ok_or(MultisigError::UnknownSigner)?;
        if self.approvals()[slot] {
            return Err(MultisigError::AlreadyApproved);
        }
        Ok(slot)
    }

    /// Record `signer`'s approval. Returns true if the threshold is now met,
    /// in which case the request is marked finished and the caller must
    /// perform the transfer in the same instruction.
    pub fn approve(&mut self, wallet: &Wallet, signer: &Pubkey) -> MultisigResult<bool> {
        let slot = self.approval_slot(wallet, signer)?;
        match slot {
            0 => self.is_signed1 = 1,
            1 => self.is_signed2 = 1,
            _ => self.is_signed3 = 1,
        }
        let threshold_met = self.has_threshold(wallet.m);
        if threshold_met {
            self.is_finished = 1;
        }
        Ok(threshold_met)
    }
}
