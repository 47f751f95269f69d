use ink::prelude::{vec, vec::Vec};
use ink::primitives::AccountId;

use crate::constants::zero_acc;
use crate::errors::{Error, Result};

/// Capability a [`RoleRegistry`] grants.
#[derive(scale::Encode, scale::Decode, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum Role {
    Pauser,
    Recoverer,
}

/// Set of accounts holding one role. Never empty once constructed.
///
/// Role sets are small administrative lists, so members are kept packed in a
/// `Vec` next to the rest of the root storage cell. Each instance owns its
/// own list; a Pauser registry and a Recoverer registry never share state.
#[derive(scale::Encode, scale::Decode, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct RoleRegistry {
    role: Role,
    members: Vec<AccountId>,
}

impl RoleRegistry {
    pub fn new(role: Role, founder_acc: AccountId) -> Self {
        Self {
            role,
            members: vec![founder_acc],
        }
    }

    pub fn contains(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn ensure_member(&self, account: &AccountId) -> Result<()> {
        if !self.contains(account) {
            return Err(Error::Unauthorized(self.role))
        }
        Ok(())
    }

    /// Adds `account`; returns `false` when it was already a member.
    pub fn add(&mut self, account: AccountId) -> Result<bool> {
        if account == zero_acc() {
            return Err(Error::InvalidMember)
        }
        if self.contains(&account) {
            return Ok(false)
        }
        self.members.push(account);
        Ok(true)
    }

    /// Removes `account`, refusing to leave the role without members.
    pub fn renounce(&mut self, account: &AccountId) -> Result<()> {
        let idx = self
            .members
            .iter()
            .position(|member| member == account)
            .ok_or(Error::Unauthorized(self.role))?;
        if self.member_count() == 1 {
            return Err(Error::LastMemberError)
        }
        self.members.swap_remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(byte: u8) -> AccountId {
        AccountId::from([byte; 32])
    }

    #[test]
    fn founder_is_only_member() {
        let registry = RoleRegistry::new(Role::Pauser, acc(1));
        assert!(registry.contains(&acc(1)));
        assert!(!registry.contains(&acc(2)));
        assert_eq!(registry.member_count(), 1);
    }

    #[test]
    fn add_is_idempotent() {
        let mut registry = RoleRegistry::new(Role::Recoverer, acc(1));
        assert_eq!(registry.add(acc(2)), Ok(true));
        assert_eq!(registry.add(acc(2)), Ok(false));
        assert_eq!(registry.member_count(), 2);
    }

    #[test]
    fn zero_account_cannot_join() {
        let mut registry = RoleRegistry::new(Role::Pauser, acc(1));
        assert_eq!(registry.add(acc(0)), Err(Error::InvalidMember));
        assert_eq!(registry.member_count(), 1);
    }

    #[test]
    fn last_member_cannot_renounce() {
        let mut registry = RoleRegistry::new(Role::Pauser, acc(1));
        assert_eq!(registry.renounce(&acc(1)), Err(Error::LastMemberError));
        assert!(registry.contains(&acc(1)));

        registry.add(acc(2)).unwrap();
        assert_eq!(registry.renounce(&acc(1)), Ok(()));
        assert!(!registry.contains(&acc(1)));
        assert_eq!(registry.renounce(&acc(2)), Err(Error::LastMemberError));
    }

    #[test]
    fn non_member_renounce_is_unauthorized() {
        let mut registry = RoleRegistry::new(Role::Recoverer, acc(1));
        registry.add(acc(2)).unwrap();
        assert_eq!(
            registry.renounce(&acc(3)),
            Err(Error::Unauthorized(Role::Recoverer))
        );
        assert_eq!(registry.member_count(), 2);
    }

    #[test]
    fn ensure_member_rejects_outsiders() {
        let registry = RoleRegistry::new(Role::Pauser, acc(1));
        assert_eq!(registry.ensure_member(&acc(1)), Ok(()));
        assert_eq!(
            registry.ensure_member(&acc(9)),
            Err(Error::Unauthorized(Role::Pauser))
        );
    }
}
