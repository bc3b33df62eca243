//! Human-oriented execution trace, gated by verbosity:
//! 0 silent, 1 opcode/pc, 2 adds stack/memory/gas, 3 adds
//! state/calldata/logs/returndata. Nested frames indent by call depth.

use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::opcodes::Opcode;

#[derive(Clone, Copy, Debug)]
pub struct Tracer {
    verbosity: u8,
    depth: usize,
}

impl Tracer {
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            depth: 0,
        }
    }

    /// The tracer of a sub-frame: one level deeper, same verbosity.
    pub fn child(&self) -> Self {
        Self {
            verbosity: self.verbosity,
            depth: self.depth + 1,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    pub fn opcode(&self, state: &RunState, opcode: &Opcode) {
        let indent = self.indent();
        match self.verbosity {
            0 => {}
            1 => println!("{indent}{:#06x}: {}", state.pc, opcode.name()),
            _ => println!(
                "\n{indent}{:#06x}: {} [gas {}]",
                state.pc,
                opcode.name(),
                state.gas_left
            ),
        }
    }

    pub fn after(&self, state: &RunState, ext: &Ext) {
        if self.verbosity < 2 {
            return;
        }
        let indent = self.indent();

        println!(
            "{indent}STACK:{}",
            if state.stack.is_empty() { " []" } else { "" }
        );
        for (i, word) in state.stack.to_top_first().iter().enumerate() {
            println!("{indent}{:>4}: {word:#x}", i + 1);
        }

        println!(
            "{indent}MEMORY:{}",
            if state.memory.is_empty() { " []" } else { "" }
        );
        for (index, chunk) in state.memory.as_slice().chunks(32).enumerate() {
            println!("{indent}{:#06x}: {}", index << 5, hex::encode(chunk));
        }

        if self.verbosity < 3 {
            return;
        }
        println!("{indent}CALLDATA: 0x{}", hex::encode(&state.ctx.call_data));
        println!("{indent}RETURNDATA: 0x{}", hex::encode(&state.returndata));
        println!(
            "{indent}LOGS:{}",
            if state.logs.is_empty() { " []" } else { "" }
        );
        for log in &state.logs {
            let topics = log
                .topics
                .iter()
                .map(|t| format!("{t:#x}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "{indent}  {:#x} [{topics}] 0x{}",
                log.address,
                hex::encode(&log.data)
            );
        }
        println!(
            "{indent}STATE:{}",
            if ext.state.is_empty() { " []" } else { "" }
        );
        for (address, account) in &ext.state {
            println!(
                "{indent}  {address:#x}: balance={:#x} nonce={:#x} code={}B",
                account.balance,
                account.nonce,
                account.code().len()
            );
            for (key, val) in &account.storage {
                println!("{indent}    {key:#x}: {val:#x}");
            }
        }
    }

    pub fn error(&self, error: &VmError) {
        if self.verbosity == 0 {
            return;
        }
        eprintln!("{}\x1b[31m{error}\x1b[0m", self.indent());
    }

    pub fn revert(&self, state: &RunState) {
        if self.verbosity == 0 {
            return;
        }
        println!(
            "{}\x1b[31mrevert: 0x{}\x1b[0m",
            self.indent(),
            hex::encode(&state.returndata)
        );
    }
}
