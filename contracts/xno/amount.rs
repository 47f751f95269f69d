use core::cmp::Ordering;
use primitive_types::U256;

use crate::constants::DECIMALS;

/// Unsigned 256-bit token quantity.
///
/// Kept as little-endian `u64` limbs, the same layout `U256` uses, so the
/// value can sit directly in contract storage. All arithmetic goes through
/// `U256` and is checked; nothing saturates or wraps.
#[derive(scale::Encode, scale::Decode, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Amount([u64; 4]);

impl Amount {
    pub const ZERO: Amount = Amount([0; 4]);
    pub const MAX: Amount = Amount([u64::MAX; 4]);

    pub const fn from_u128(value: u128) -> Self {
        Amount([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// `whole` tokens expressed in base units (`whole * 10^DECIMALS`).
    pub fn tokens(whole: u128) -> Option<Self> {
        U256::from(whole)
            .checked_mul(U256::exp10(DECIMALS as usize))
            .map(Self::from)
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.as_u256().checked_add(rhs.as_u256()).map(Self::from)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.as_u256().checked_sub(rhs.as_u256()).map(Self::from)
    }

    pub fn as_u256(&self) -> U256 {
        U256(self.0)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value.0)
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u256().cmp(&other.as_u256())
    }
}
