use core::fmt;

use crate::roles::Role;

pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a ledger message is rejected. A rejected message leaves storage untouched.
#[derive(scale::Encode, scale::Decode, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Credit to the zero account.
    InvalidRecipient,
    /// Debit from the zero account.
    InvalidSender,
    /// Allowance granted to the zero account.
    InvalidSpender,
    InsufficientBalance,
    InsufficientAllowance,
    AllowanceUnderflow,
    /// Caller is not a member of the named role.
    Unauthorized(Role),
    /// Zero account cannot be made a role member.
    InvalidMember,
    /// Renouncing would leave the role with no members.
    LastMemberError,
    ContractPaused,
    InvalidPauseTransition,
    Overflow,
    /// Recovery was requested for a token other than this ledger.
    UnsupportedToken,
}

impl Error {
    /// Stable revert reason, suitable for matching by off-chain tooling.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidRecipient => "ERC20: transfer to the zero address",
            Error::InvalidSender => "ERC20: transfer from the zero address",
            Error::InvalidSpender => "ERC20: approve to the zero address",
            // one variant covers both transfer and burn debits
            Error::InsufficientBalance => "ERC20: amount exceeds balance",
            Error::InsufficientAllowance => "ERC20: amount exceeds allowance",
            Error::AllowanceUnderflow => "ERC20: decreased allowance below zero",
            Error::Unauthorized(Role::Pauser) => {
                "PauserRole: caller does not have the Pauser role"
            }
            Error::Unauthorized(Role::Recoverer) => {
                "RecovererRole: caller does not have the Recoverer role"
            }
            Error::InvalidMember => "Roles: account is the zero address",
            Error::LastMemberError => {
                "Roles: there must be at least one account assigned to this role"
            }
            Error::ContractPaused => "Pausable.whenNotPaused: paused",
            Error::InvalidPauseTransition => "Pausable: already in requested state",
            Error::Overflow => "ERC20: arithmetic overflow",
            Error::UnsupportedToken => "Recoverable: only this token can be recovered",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
