#![cfg_attr(not(feature = "std"), no_std, no_main)]

mod amount;
mod errors;
mod roles;

pub use self::amount::Amount;
pub use self::errors::{Error, Result};
pub use self::roles::{Role, RoleRegistry};
pub use self::xno::{XnoToken, XnoTokenRef};

pub mod constants {
    use crate::amount::Amount;
    use ink::primitives::AccountId;

    pub const TOKEN_NAME: &str = "XNO Token";
    pub const TOKEN_SYMBOL: &str = "XNO";
    pub const DECIMALS: u8 = 18;
    pub const SCALING_FACTOR: u128 = 1_000_000_000_000_000_000;

    /// 2.1 billion whole tokens, minted once to the deployer.
    pub const INITIAL_SUPPLY: Amount = Amount::from_u128(2_100_000_000 * SCALING_FACTOR);

    /// Reserved burn sink. Never a valid recipient, spender, debit source or role member.
    pub fn zero_acc() -> AccountId {
        AccountId::from([0u8; 32])
    }
}

#[ink::contract]
pub mod xno {
    use crate::constants::*;
    use crate::{Amount, Error, Result, Role, RoleRegistry};
    use ink::prelude::string::{String, ToString};
    use ink::storage::Mapping;

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        to: AccountId,
        value: Amount,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Amount,
    }

    #[ink(event)]
    pub struct PauserAdded {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct PauserRemoved {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct RecovererAdded {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct RecovererRemoved {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct Paused {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct Unpaused {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(storage)]
    pub struct XnoToken {
        // access control
        pausers: RoleRegistry,
        recoverers: RoleRegistry,
        paused_flag: bool,

        // token state
        total_supply: Amount,
        balances: Mapping<AccountId, Amount>,
        allowances: Mapping<(AccountId, AccountId), Amount>,

        // versioning (future migrations)
        storage_ver_u32: u32,
    }

    impl XnoToken {
        // -------- constructors --------

        /// Mints the whole supply to the deployer, who also becomes the first
        /// Pauser and the first Recoverer.
        #[ink(constructor)]
        pub fn new() -> Self {
            let deployer_acc = Self::env().caller();
            let mut balances = Mapping::default();
            balances.insert(deployer_acc, &INITIAL_SUPPLY);

            Self::env().emit_event(PauserAdded { account: deployer_acc });
            Self::env().emit_event(RecovererAdded { account: deployer_acc });
            Self::env().emit_event(Transfer {
                from: zero_acc(),
                to: deployer_acc,
                value: INITIAL_SUPPLY,
            });

            Self {
                pausers: RoleRegistry::new(Role::Pauser, deployer_acc),
                recoverers: RoleRegistry::new(Role::Recoverer, deployer_acc),
                paused_flag: false,
                total_supply: INITIAL_SUPPLY,
                balances,
                allowances: Mapping::default(),
                storage_ver_u32: 1,
            }
        }

        /// Same as [`XnoToken::new`], additionally enrolling one backup Pauser
        /// and one backup Recoverer so neither role hinges on a single key.
        #[ink(constructor)]
        pub fn new_with_backups(
            backup_pauser_acc: AccountId,
            backup_recoverer_acc: AccountId,
        ) -> core::result::Result<Self, Error> {
            let mut instance = Self::new();
            instance.grant_role(Role::Pauser, backup_pauser_acc)?;
            instance.grant_role(Role::Recoverer, backup_recoverer_acc)?;
            Ok(instance)
        }

        // -------- modifiers (helpers) --------

        fn when_not_paused(&self) -> Result<()> {
            if self.paused_flag {
                return Err(Error::ContractPaused)
            }
            Ok(())
        }

        fn registry(&self, role: Role) -> &RoleRegistry {
            match role {
                Role::Pauser => &self.pausers,
                Role::Recoverer => &self.recoverers,
            }
        }

        fn registry_mut(&mut self, role: Role) -> &mut RoleRegistry {
            match role {
                Role::Pauser => &mut self.pausers,
                Role::Recoverer => &mut self.recoverers,
            }
        }

        fn only_role(&self, role: Role) -> Result<AccountId> {
            let caller_acc = self.env().caller();
            self.registry(role).ensure_member(&caller_acc)?;
            Ok(caller_acc)
        }

        // -------- read API --------

        #[ink(message)]
        pub fn token_name(&self) -> String {
            TOKEN_NAME.to_string()
        }

        #[ink(message)]
        pub fn token_symbol(&self) -> String {
            TOKEN_SYMBOL.to_string()
        }

        #[ink(message)]
        pub fn token_decimals(&self) -> u8 {
            DECIMALS
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Amount {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Amount {
            self.balances.get(owner_acc).unwrap_or_default()
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Amount {
            self.allowances
                .get((owner_acc, spender_acc))
                .unwrap_or_default()
        }

        #[ink(message)]
        pub fn paused(&self) -> bool {
            self.paused_flag
        }

        #[ink(message)]
        pub fn is_pauser(&self, account: AccountId) -> bool {
            self.pausers.contains(&account)
        }

        #[ink(message)]
        pub fn is_recoverer(&self, account: AccountId) -> bool {
            self.recoverers.contains(&account)
        }

        // -------- write API: balances --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let from_acc = self.env().caller();
            let moved = self.checked_move(from_acc, to_acc, amount_val)?;
            self.commit_move(from_acc, to_acc, amount_val, moved);
            Ok(())
        }

        /// Moves `amount_val` out of `from_acc` on behalf of the caller, consuming
        /// the caller's allowance. Balance is checked before allowance.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Amount,
        ) -> Result<()> {
            self.when_not_paused()?;
            let spender_acc = self.env().caller();
            let moved = self.checked_move(from_acc, to_acc, amount_val)?;
            let new_allow = self
                .allowance(from_acc, spender_acc)
                .checked_sub(amount_val)
                .ok_or(Error::InsufficientAllowance)?;

            self.commit_move(from_acc, to_acc, amount_val, moved);
            self.allowances.insert((from_acc, spender_acc), &new_allow);
            Ok(())
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let holder_acc = self.env().caller();
            let burned = self.checked_burn(holder_acc, amount_val)?;
            self.commit_burn(holder_acc, amount_val, burned);
            Ok(())
        }

        /// Destroys `amount_val` of `owner_acc`'s tokens, consuming the caller's allowance.
        #[ink(message)]
        pub fn burn_from(&mut self, owner_acc: AccountId, amount_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let spender_acc = self.env().caller();
            let burned = self.checked_burn(owner_acc, amount_val)?;
            let new_allow = self
                .allowance(owner_acc, spender_acc)
                .checked_sub(amount_val)
                .ok_or(Error::InsufficientAllowance)?;

            self.allowances.insert((owner_acc, spender_acc), &new_allow);
            self.commit_burn(owner_acc, amount_val, burned);
            Ok(())
        }

        /// Returns tokens stranded at the contract's own address to the calling
        /// Recoverer. Only this ledger's own token can be recovered. Stays
        /// available while paused.
        #[ink(message)]
        pub fn recover_erc20(&mut self, token_acc: AccountId, amount_val: Amount) -> Result<()> {
            let caller_acc = self.only_role(Role::Recoverer)?;
            let contract_acc = self.env().account_id();
            if token_acc != contract_acc {
                return Err(Error::UnsupportedToken)
            }
            let moved = self.checked_move(contract_acc, caller_acc, amount_val)?;
            self.commit_move(contract_acc, caller_acc, amount_val, moved);
            ink::env::debug_println!("xno: recovered {:?} to {:?}", amount_val, caller_acc);
            Ok(())
        }

        // -------- write API: allowances --------

        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let owner_acc = self.env().caller();
            self.set_allowance(owner_acc, spender_acc, amount_val)
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, add_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let owner_acc = self.env().caller();
            if spender_acc == zero_acc() {
                return Err(Error::InvalidSpender)
            }
            let new_val = self
                .allowance(owner_acc, spender_acc)
                .checked_add(add_val)
                .ok_or(Error::Overflow)?;
            self.set_allowance(owner_acc, spender_acc, new_val)
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, sub_val: Amount) -> Result<()> {
            self.when_not_paused()?;
            let owner_acc = self.env().caller();
            if spender_acc == zero_acc() {
                return Err(Error::InvalidSpender)
            }
            let new_val = self
                .allowance(owner_acc, spender_acc)
                .checked_sub(sub_val)
                .ok_or(Error::AllowanceUnderflow)?;
            self.set_allowance(owner_acc, spender_acc, new_val)
        }

        // -------- admin / roles --------

        #[ink(message)]
        pub fn add_pauser(&mut self, account: AccountId) -> Result<()> {
            self.only_role(Role::Pauser)?;
            self.grant_role(Role::Pauser, account)
        }

        #[ink(message)]
        pub fn renounce_pauser(&mut self) -> Result<()> {
            self.revoke_own_role(Role::Pauser)
        }

        #[ink(message)]
        pub fn add_recoverer(&mut self, account: AccountId) -> Result<()> {
            self.only_role(Role::Recoverer)?;
            self.grant_role(Role::Recoverer, account)
        }

        #[ink(message)]
        pub fn renounce_recoverer(&mut self) -> Result<()> {
            self.revoke_own_role(Role::Recoverer)
        }

        #[ink(message)]
        pub fn pause(&mut self) -> Result<()> {
            let caller_acc = self.only_role(Role::Pauser)?;
            if self.paused_flag {
                return Err(Error::InvalidPauseTransition)
            }
            self.paused_flag = true;
            ink::env::debug_println!("xno: paused by {:?}", caller_acc);
            self.env().emit_event(Paused { account: caller_acc });
            Ok(())
        }

        #[ink(message)]
        pub fn unpause(&mut self) -> Result<()> {
            let caller_acc = self.only_role(Role::Pauser)?;
            if !self.paused_flag {
                return Err(Error::InvalidPauseTransition)
            }
            self.paused_flag = false;
            ink::env::debug_println!("xno: unpaused by {:?}", caller_acc);
            self.env().emit_event(Unpaused { account: caller_acc });
            Ok(())
        }

        // ---- internals ----

        /// Re-adding an existing member is a silent no-op: no event is emitted.
        fn grant_role(&mut self, role: Role, account: AccountId) -> Result<()> {
            if !self.registry_mut(role).add(account)? {
                return Ok(())
            }
            ink::env::debug_println!("xno: {:?} role granted to {:?}", role, account);
            match role {
                Role::Pauser => self.env().emit_event(PauserAdded { account }),
                Role::Recoverer => self.env().emit_event(RecovererAdded { account }),
            }
            Ok(())
        }

        fn revoke_own_role(&mut self, role: Role) -> Result<()> {
            let account = self.env().caller();
            self.registry_mut(role).renounce(&account)?;
            ink::env::debug_println!("xno: {:?} role renounced by {:?}", role, account);
            match role {
                Role::Pauser => self.env().emit_event(PauserRemoved { account }),
                Role::Recoverer => self.env().emit_event(RecovererRemoved { account }),
            }
            Ok(())
        }

        fn set_allowance(
            &mut self,
            owner_acc: AccountId,
            spender_acc: AccountId,
            amount_val: Amount,
        ) -> Result<()> {
            if spender_acc == zero_acc() {
                return Err(Error::InvalidSpender)
            }
            self.allowances.insert((owner_acc, spender_acc), &amount_val);
            self.env().emit_event(Approval {
                owner: owner_acc,
                spender: spender_acc,
                value: amount_val,
            });
            Ok(())
        }

        /// Validates a move and returns the post-move `(from, to)` balances
        /// without writing anything.
        fn checked_move(
            &self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Amount,
        ) -> Result<(Amount, Amount)> {
            if to_acc == zero_acc() {
                return Err(Error::InvalidRecipient)
            }
            if from_acc == zero_acc() {
                return Err(Error::InvalidSender)
            }
            let from_bal = self.balance_of(from_acc);
            let new_from = from_bal
                .checked_sub(amount_val)
                .ok_or(Error::InsufficientBalance)?;
            if from_acc == to_acc {
                return Ok((from_bal, from_bal))
            }
            let new_to = self
                .balance_of(to_acc)
                .checked_add(amount_val)
                .ok_or(Error::Overflow)?;
            Ok((new_from, new_to))
        }

        fn commit_move(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Amount,
            (new_from, new_to): (Amount, Amount),
        ) {
            self.balances.insert(from_acc, &new_from);
            self.balances.insert(to_acc, &new_to);
            self.env().emit_event(Transfer {
                from: from_acc,
                to: to_acc,
                value: amount_val,
            });
        }

        /// Validates a burn and returns the post-burn `(holder balance, total supply)`.
        fn checked_burn(&self, holder_acc: AccountId, amount_val: Amount) -> Result<(Amount, Amount)> {
            if holder_acc == zero_acc() {
                return Err(Error::InvalidSender)
            }
            let new_bal = self
                .balance_of(holder_acc)
                .checked_sub(amount_val)
                .ok_or(Error::InsufficientBalance)?;
            let new_supply = self
                .total_supply
                .checked_sub(amount_val)
                .ok_or(Error::Overflow)?;
            Ok((new_bal, new_supply))
        }

        fn commit_burn(
            &mut self,
            holder_acc: AccountId,
            amount_val: Amount,
            (new_bal, new_supply): (Amount, Amount),
        ) {
            self.balances.insert(holder_acc, &new_bal);
            self.total_supply = new_supply;
            self.env().emit_event(Transfer {
                from: holder_acc,
                to: zero_acc(),
                value: amount_val,
            });
        }
    }

}
