use std::collections::HashMap;

use crate::common::{account::Account, Word};

/// The world state: a live map from address to account, shared by reference
/// across every frame of one top-level call. Writes land immediately; there
/// is no journal, so a failed sub-frame leaves its writes behind.
#[derive(Debug, Default)]
pub struct Ext {
    pub state: HashMap<Word, Account>,
}

impl Ext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: Word, account: Account) -> Self {
        self.state.insert(address, account);
        self
    }

    /// Storage read; unset keys read as zero.
    pub fn get(&self, address: &Word, key: &Word) -> Word {
        let val = self
            .state
            .get(address)
            .and_then(|account| account.storage.get(key))
            .copied()
            .unwrap_or_default();
        tracing::debug!("GET: {address:#x}[{key:#x}]={val:#x}");
        val
    }

    pub fn put(&mut self, address: &Word, key: Word, val: Word) {
        tracing::debug!("PUT: {address:#x}[{key:#x}]={val:#x}");
        self.account_mut(address).storage.insert(key, val);
    }

    pub fn code(&self, address: &Word) -> &[u8] {
        self.state
            .get(address)
            .map(Account::code)
            .unwrap_or_default()
    }

    pub fn balance(&self, address: &Word) -> Word {
        self.state
            .get(address)
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    pub fn account_mut(&mut self, address: &Word) -> &mut Account {
        self.state.entry(*address).or_default()
    }

    /// Move `value` between balances, creating the target account if absent.
    /// Returns false (and leaves both untouched) when the source is short.
    pub fn transfer(&mut self, from: &Word, to: &Word, value: Word) -> bool {
        if value.is_zero() {
            return true;
        }
        if self.balance(from) < value {
            tracing::debug!("TRANSFER: {from:#x} -> {to:#x} {value:#x} [insufficient]");
            return false;
        }
        self.account_mut(from).balance -= value;
        self.account_mut(to).balance += value;
        tracing::debug!("TRANSFER: {from:#x} -> {to:#x} {value:#x}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_storage_reads_zero() {
        let ext = Ext::new();
        assert_eq!(ext.get(&Word::from(7), &Word::from(1)), Word::zero());
    }

    #[test]
    fn test_put_then_get() {
        let mut ext = Ext::new();
        let addr = Word::from(7);
        ext.put(&addr, Word::one(), Word::from(42));
        assert_eq!(ext.get(&addr, &Word::one()), Word::from(42));
    }

    #[test]
    fn test_transfer_checks_balance() {
        let mut ext = Ext::new().with_account(Word::one(), Account::with_balance(Word::from(10)));
        assert!(!ext.transfer(&Word::one(), &Word::from(2), Word::from(11)));
        assert!(ext.transfer(&Word::one(), &Word::from(2), Word::from(10)));
        assert_eq!(ext.balance(&Word::one()), Word::zero());
        assert_eq!(ext.balance(&Word::from(2)), Word::from(10));
    }
}
