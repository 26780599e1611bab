// error.rs — error taxonomy shared by the program and its clients.

use thiserror::Error;

/// Every way an instruction can be rejected.
///
/// All variants are fatal to the instruction in progress. The numeric
/// [`code`](MultisigError::code) is the discriminant and is stable across
/// releases, so new variants go at the end.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MultisigError {
    #[error("account data length does not match the record layout")]
    LayoutMismatch = 0,
    #[error("account is already initialized")]
    AlreadyInitialized = 1,
    #[error("threshold must be between 1 and 3")]
    InvalidThreshold = 2,
    #[error("signer keys must be pairwise distinct")]
    DuplicateSigner = 3,
    #[error("multisig wallet account not initialized")]
    WalletNotInitialized = 4,
    #[error("request amount must be greater than zero")]
    InvalidAmount = 5,
    #[error("key is not one of the wallet's designated signers")]
    UnknownSigner = 6,
    #[error("signer has already approved this request")]
    AlreadyApproved = 7,
    #[error("request is not pending")]
    NotPending = 8,
    #[error("request does not have enough approvals")]
    ThresholdNotMet = 9,
    #[error("wallet balance is lower than the requested amount")]
    InsufficientWalletBalance = 10,
    #[error("unknown instruction")]
    UnknownInstruction = 11,
    #[error("account is missing a required signer or writable role")]
    InvalidAccountRole = 12,
    #[error("malformed instruction data")]
    InvalidInstructionData = 13,
    #[error("not enough accounts supplied for the instruction")]
    NotEnoughAccountKeys = 14,
    #[error("account is not owned by the multisig program")]
    IncorrectProgramId = 15,
    #[error("request belongs to a different wallet")]
    WalletMismatch = 16,
    #[error("receiver account does not match the request")]
    ReceiverMismatch = 17,
    #[error("balance arithmetic overflowed")]
    ArithmeticOverflow = 18,
}

impl MultisigError {
    /// Stable numeric code, suitable for a runtime's custom error slot.
    pub fn code(self) -> u32 {
        self as u32
    }
}

pub type MultisigResult<T> = Result<T, MultisigError>;
