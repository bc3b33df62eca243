use std::collections::HashMap;

use crate::common::Word;

/// One world-state entry: balance, nonce, optional immutable code, and the
/// key/value storage written by SSTORE.
#[derive(Clone, Debug, Default)]
pub struct Account {
    pub balance: Word,
    pub nonce: Word,
    pub code: Option<Vec<u8>>,
    pub storage: HashMap<Word, Word>,
}

impl Account {
    pub fn with_code(code: Vec<u8>) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn with_balance(balance: Word) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    pub fn code(&self) -> &[u8] {
        self.code.as_deref().unwrap_or_default()
    }
}
