//! Error taxonomy shared by the fund, the oracle and the host
//!
//! Every variant carries a short stable code so automation can tell
//! "nothing to do" (`IF_RWNN`, `IF_NSP`) apart from "misconfigured".

use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[repr(u32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackstopError {
    // Safety gate
    #[error("IF_NI: insurance fund is not initialized")]
    NotInitialized = 0,
    #[error("IF_AI: insurance fund is already initialized")]
    AlreadyInitialized = 1,
    #[error("PS_P: paused")]
    Paused = 2,
    #[error("PS_NP: not paused")]
    NotPaused = 3,
    #[error("RG_RC: reentrant call")]
    ReentrantCall = 4,

    // Authorization
    #[error("SO_CNO: caller is not the owner")]
    CallerNotOwner = 10,
    #[error("SO_NW0: new owner is the zero address")]
    NewOwnerZero = 11,
    #[error("SO_SAO: new owner is the current owner")]
    SameAsOwner = 12,
    #[error("SO_SAC: new owner is already the candidate")]
    SameAsCandidate = 13,
    #[error("SO_C0: no ownership candidate")]
    CandidateZero = 14,
    #[error("SO_CNC: caller is not the ownership candidate")]
    CallerNotCandidate = 15,

    // Configuration
    #[error("IF_TNC: token is not a contract")]
    TokenNotContract = 20,
    #[error("IF_BNC: borrower is not a contract")]
    BorrowerNotContract = 21,
    #[error("IF_SNC: surplus beneficiary is not a contract")]
    BeneficiaryNotContract = 22,
    #[error("IF_TNM: surplus beneficiary token does not match fund token")]
    TokenMismatch = 23,
    #[error("BT_ID: invalid decimals")]
    InvalidDecimals = 25,

    // Preconditions
    #[error("IF_RWNN: repay when settlement value is non-negative")]
    RepayWhenNonNegative = 30,
    #[error("IF_SBAZ: surplus beneficiary is the zero address")]
    SurplusBeneficiaryZero = 31,
    #[error("IF_DTEZ: distribution threshold is zero")]
    ThresholdZero = 32,
    #[error("IF_NSP: no surplus")]
    NoSurplus = 33,
    #[error("IF_BNS: borrower is not set")]
    BorrowerNotSet = 34,

    // Collaborator failures
    #[error("TK_IB: insufficient balance")]
    InsufficientBalance = 40,
    #[error("TK_IA: insufficient allowance")]
    InsufficientAllowance = 41,
    #[error("V_NEFC: not enough free collateral")]
    InsufficientFreeCollateral = 42,
    #[error("H_UC: unknown contract")]
    UnknownContract = 43,
    #[error("V_TNS: token not supported")]
    UnsupportedToken = 44,
    #[error("PF_PU: price unavailable")]
    PriceUnavailable = 45,
    #[error("MATH_OF: arithmetic overflow")]
    Overflow = 46,
    #[error("PF_IT: observation timestamp goes backwards")]
    InvalidTimestamp = 47,
}

impl BackstopError {
    /// Stable short code, the prefix of the display string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "IF_NI",
            Self::AlreadyInitialized => "IF_AI",
            Self::Paused => "PS_P",
            Self::NotPaused => "PS_NP",
            Self::ReentrantCall => "RG_RC",
            Self::CallerNotOwner => "SO_CNO",
            Self::NewOwnerZero => "SO_NW0",
            Self::SameAsOwner => "SO_SAO",
            Self::SameAsCandidate => "SO_SAC",
            Self::CandidateZero => "SO_C0",
            Self::CallerNotCandidate => "SO_CNC",
            Self::TokenNotContract => "IF_TNC",
            Self::BorrowerNotContract => "IF_BNC",
            Self::BeneficiaryNotContract => "IF_SNC",
            Self::TokenMismatch => "IF_TNM",
            Self::InvalidDecimals => "BT_ID",
            Self::RepayWhenNonNegative => "IF_RWNN",
            Self::SurplusBeneficiaryZero => "IF_SBAZ",
            Self::ThresholdZero => "IF_DTEZ",
            Self::NoSurplus => "IF_NSP",
            Self::BorrowerNotSet => "IF_BNS",
            Self::InsufficientBalance => "TK_IB",
            Self::InsufficientAllowance => "TK_IA",
            Self::InsufficientFreeCollateral => "V_NEFC",
            Self::UnknownContract => "H_UC",
            Self::UnsupportedToken => "V_TNS",
            Self::PriceUnavailable => "PF_PU",
            Self::Overflow => "MATH_OF",
            Self::InvalidTimestamp => "PF_IT",
        }
    }

    /// True for "nothing to do right now" rejections that a keeper may
    /// simply retry on a later tick
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(self, Self::RepayWhenNonNegative | Self::NoSurplus)
    }
}

impl From<BackstopError> for ProgramError {
    fn from(e: BackstopError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

pub type BackstopResult<T> = Result<T, BackstopError>;
