use crate::common::{block::Header, Word};

/// Gas budget used when the caller does not provide one.
pub const DEFAULT_GAS: u64 = 10_000_000;

/// Frames at this depth fail their sub-calls instead of recursing further.
pub const CALL_DEPTH_LIMIT: usize = 1024;

/// The execution environment of one frame. Immutable while the frame runs;
/// sub-calls derive a fresh `Context` from their parent's.
#[derive(Clone, Debug)]
pub struct Context {
    pub address: Word,
    pub caller: Word,
    pub origin: Word,
    pub gas_price: Word,
    pub gas_left: u64,
    pub is_static: bool,
    pub call_value: Word,
    pub call_data: Vec<u8>,
    pub bytecode: Vec<u8>,
    pub block: Header,
    pub depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            address: Word::zero(),
            caller: Word::zero(),
            origin: Word::zero(),
            gas_price: Word::zero(),
            gas_left: DEFAULT_GAS,
            is_static: false,
            call_value: Word::zero(),
            call_data: Vec::new(),
            bytecode: Vec::new(),
            block: Header::default(),
            depth: 0,
        }
    }
}

impl Context {
    pub fn new(bytecode: Vec<u8>) -> Self {
        Self {
            bytecode,
            ..Default::default()
        }
    }

    pub fn with_address(mut self, address: Word) -> Self {
        self.address = address;
        self
    }

    pub fn with_caller(mut self, caller: Word) -> Self {
        self.caller = caller;
        self.origin = caller;
        self
    }

    pub fn with_origin(mut self, origin: Word) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_value(mut self, value: Word) -> Self {
        self.call_value = value;
        self
    }

    pub fn with_call_data(mut self, data: Vec<u8>) -> Self {
        self.call_data = data;
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas_left = gas;
        self
    }

    pub fn with_gas_price(mut self, price: Word) -> Self {
        self.gas_price = price;
        self
    }

    pub fn with_block(mut self, block: Header) -> Self {
        self.block = block;
        self
    }
}
