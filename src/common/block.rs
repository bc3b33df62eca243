use serde::{Deserialize, Serialize};

use crate::common::Word;

/// The block header projected onto the stack by the 0x40s opcodes.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub basefee: Word,
    #[serde(default)]
    pub coinbase: Word,
    #[serde(default)]
    pub timestamp: Word,
    #[serde(default)]
    pub number: Word,
    #[serde(default)]
    pub difficulty: Word,
    #[serde(default, rename = "gasLimit")]
    pub gas_limit: Word,
    #[serde(default, rename = "chainId")]
    pub chain_id: Word,
}
