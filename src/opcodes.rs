use once_cell::sync::Lazy;

use crate::instructions::{
    arithmetic, bitwise, environment, flow, logging, memory, stack, storage, system, Handler,
};

/// One table entry: the mnemonic (with `_` standing in for the family width),
/// the family parameter `n`, the minimum gas, and the handler. Dynamic gas is
/// reported by the handler through its delta.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub code: u8,
    pub name: &'static str,
    pub n: u8,
    pub gas: u64,
    pub handler: Handler,
}

impl Opcode {
    fn new(code: u8, name: &'static str, n: u8, gas: u64, handler: Handler) -> Self {
        Self {
            code,
            name,
            n,
            gas,
            handler,
        }
    }

    pub fn name(&self) -> String {
        self.name.replace('_', &self.n.to_string())
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}:{}", self.code, self.name())
    }
}

static OPCODES: Lazy<[Option<Opcode>; 256]> = Lazy::new(|| {
    let mut table = [None; 256];
    let mut set = |code: u8, name: &'static str, n: u8, gas: u64, handler: Handler| {
        table[code as usize] = Some(Opcode::new(code, name, n, gas, handler));
    };

    // 0x00s: Stop and Arithmetic Operations
    set(0x00, "STOP", 0, 0, flow::stop);
    set(0x01, "ADD", 0, 3, arithmetic::add);
    set(0x02, "MUL", 0, 5, arithmetic::mul);
    set(0x03, "SUB", 0, 3, arithmetic::sub);
    set(0x04, "DIV", 0, 5, arithmetic::div);
    set(0x05, "SDIV", 0, 5, arithmetic::sdiv);
    set(0x06, "MOD", 0, 5, arithmetic::rem);
    set(0x07, "SMOD", 0, 5, arithmetic::smod);
    set(0x08, "ADDMOD", 0, 8, arithmetic::addmod);
    set(0x09, "MULMOD", 0, 8, arithmetic::mulmod);
    set(0x0a, "EXP", 0, 10, arithmetic::exp);
    set(0x0b, "SIGNEXTEND", 0, 5, arithmetic::signextend);

    // 0x10s: Comparison & Bitwise Logic Operations
    set(0x10, "LT", 0, 3, bitwise::lt);
    set(0x11, "GT", 0, 3, bitwise::gt);
    set(0x12, "SLT", 0, 3, bitwise::slt);
    set(0x13, "SGT", 0, 3, bitwise::sgt);
    set(0x14, "EQ", 0, 3, bitwise::eq);
    set(0x15, "ISZERO", 0, 3, bitwise::iszero);
    set(0x16, "AND", 0, 3, bitwise::and);
    set(0x17, "OR", 0, 3, bitwise::or);
    set(0x18, "XOR", 0, 3, bitwise::xor);
    set(0x19, "NOT", 0, 3, bitwise::not);
    set(0x1a, "BYTE", 0, 3, bitwise::byte);
    set(0x1b, "SHL", 0, 3, bitwise::shl);
    set(0x1c, "SHR", 0, 3, bitwise::shr);
    set(0x1d, "SAR", 0, 3, bitwise::sar);

    // 0x20: SHA3
    set(0x20, "SHA3", 0, 30, memory::sha3);

    // 0x30s: Environmental Information
    set(0x30, "ADDRESS", 0, 2, environment::address);
    set(0x31, "BALANCE", 0, 100, environment::balance);
    set(0x32, "ORIGIN", 0, 2, environment::origin);
    set(0x33, "CALLER", 0, 2, environment::caller);
    set(0x34, "CALLVALUE", 0, 2, environment::callvalue);
    set(0x35, "CALLDATALOAD", 0, 3, environment::calldataload);
    set(0x36, "CALLDATASIZE", 0, 2, environment::calldatasize);
    set(0x37, "CALLDATACOPY", 0, 3, environment::calldatacopy);
    set(0x38, "CODESIZE", 0, 2, environment::codesize);
    set(0x39, "CODECOPY", 0, 3, environment::codecopy);
    set(0x3a, "GASPRICE", 0, 2, environment::gasprice);
    set(0x3b, "EXTCODESIZE", 0, 100, environment::extcodesize);
    set(0x3c, "EXTCODECOPY", 0, 100, environment::extcodecopy);
    set(0x3d, "RETURNDATASIZE", 0, 2, environment::returndatasize);
    set(0x3e, "RETURNDATACOPY", 0, 3, environment::returndatacopy);
    set(0x3f, "EXTCODEHASH", 0, 100, environment::extcodehash);

    // 0x40s: Block Information
    set(0x40, "BLOCKHASH", 0, 20, environment::blockhash);
    set(0x41, "COINBASE", 0, 2, environment::coinbase);
    set(0x42, "TIMESTAMP", 0, 2, environment::timestamp);
    set(0x43, "NUMBER", 0, 2, environment::number);
    set(0x44, "DIFFICULTY", 0, 2, environment::difficulty);
    set(0x45, "GASLIMIT", 0, 2, environment::gaslimit);
    set(0x46, "CHAINID", 0, 2, environment::chainid);
    set(0x47, "SELFBALANCE", 0, 5, environment::selfbalance);
    set(0x48, "BASEFEE", 0, 2, environment::basefee);

    // 0x50s: Stack, Memory, Storage and Flow Operations
    set(0x50, "POP", 0, 2, stack::pop);
    set(0x51, "MLOAD", 0, 3, memory::mload);
    set(0x52, "MSTORE", 0, 3, memory::mstore);
    set(0x53, "MSTORE8", 0, 3, memory::mstore8);
    set(0x54, "SLOAD", 0, 100, storage::sload);
    set(0x55, "SSTORE", 0, 100, storage::sstore);
    set(0x56, "JUMP", 0, 8, flow::jump);
    set(0x57, "JUMPI", 0, 10, flow::jumpi);
    set(0x58, "PC", 0, 2, flow::pc);
    set(0x59, "MSIZE", 0, 2, memory::msize);
    set(0x5a, "GAS", 0, 2, flow::gas);
    set(0x5b, "JUMPDEST", 0, 1, flow::jumpdest);
    set(0x5f, "PUSH0", 0, 2, stack::push0);

    // PUSH{1..32}
    for i in 0..32u8 {
        set(0x60 + i, "PUSH_", i + 1, 3, stack::push);
    }

    // DUP{1..16}
    for i in 0..16u8 {
        set(0x80 + i, "DUP_", i + 1, 3, stack::dup);
    }

    // SWAP{1..16}
    for i in 0..16u8 {
        set(0x90 + i, "SWAP_", i + 1, 3, stack::swap);
    }

    // LOG{0..4}: 375 base plus 375 per topic
    for i in 0..5u8 {
        set(0xa0 + i, "LOG_", i, 375 * (i as u64 + 1), logging::log);
    }

    // System operations
    set(0xf1, "CALL", 0, 100, system::call);
    set(0xf3, "RETURN", 0, 0, system::ret);
    set(0xf4, "DELEGATECALL", 0, 100, system::delegatecall);
    set(0xfa, "STATICCALL", 0, 100, system::staticcall);
    set(0xfd, "REVERT", 0, 0, system::revert);
    set(0xfe, "INVALID", 0, 0, system::invalid);

    table
});

pub fn get_opcode(value: u8) -> Option<&'static Opcode> {
    OPCODES[value as usize].as_ref()
}
