pub mod common;
pub mod context;
pub mod executor;
pub mod ext;
pub mod instructions;
pub mod interpreter;
pub mod memory;
pub mod opcodes;
pub mod stack;
pub mod tracer;
pub mod valids;

pub use common::account::Account;
pub use common::block::Header;
pub use common::{word, Word};
pub use context::Context;
pub use executor::{execute, Outcome};
pub use ext::Ext;
pub use interpreter::{Log, VmError};
