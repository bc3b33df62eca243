use thiserror::Error;

use crate::common::Word;
use crate::context::Context;
use crate::ext::Ext;
use crate::memory::Memory;
use crate::opcodes::get_opcode;
use crate::stack::Stack;
use crate::tracer::Tracer;
use crate::valids::Valids;

/// Frame-fatal failures. None are recoverable within the frame; all of them
/// consume the frame's remaining gas. An explicit REVERT is not an error
/// here: it travels through the delta and keeps its unspent gas.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    #[error("stack underflow")]
    StackUnderflow,
    #[error("stack overflow")]
    StackOverflow,
    #[error("out of gas")]
    OutOfGas,
    #[error("invalid jump")]
    InvalidJump,
    #[error("invalid opcode {0:#04x}")]
    InvalidOpcode(u8),
    #[error("state write in static context")]
    StaticViolation,
    #[error("missing data")]
    MissingData,
}

/// One emitted log: the emitting address, the payload, and 0-4 topics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Log {
    pub address: Word,
    pub data: Vec<u8>,
    pub topics: Vec<Word>,
}

/// The mutable machine state of one frame. Created when the frame starts,
/// mutated only by merging instruction deltas, discarded when it ends.
pub struct RunState<'a> {
    pub ctx: &'a Context,
    pub valids: Valids,
    pub pc: usize,
    pub stack: Stack,
    pub memory: Memory,
    pub returndata: Vec<u8>,
    pub logs: Vec<Log>,
    pub gas_left: u64,
}

impl<'a> RunState<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            valids: Valids::new(&ctx.bytecode),
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            returndata: Vec::new(),
            logs: Vec::new(),
            gas_left: ctx.gas_left,
        }
    }

    /// The opcode byte under the program counter. Only meaningful while the
    /// executor is dispatching, which guarantees pc is in bounds.
    pub fn current_opcode(&self) -> u8 {
        self.ctx.bytecode[self.pc]
    }
}

/// How a frame ended. `error: None` with `success: false` is an explicit
/// REVERT; anything in `error` also zeroed the frame's gas.
#[derive(Debug)]
pub struct FrameOutcome {
    pub success: bool,
    pub error: Option<VmError>,
}

impl FrameOutcome {
    fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn revert() -> Self {
        Self {
            success: false,
            error: None,
        }
    }

    fn fatal(error: VmError) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }
}

/// The fetch-decode-dispatch loop. Each iteration fetches the opcode under
/// the program counter, invokes its handler on a read-only view of the
/// state, charges `minimum + additional` gas, then merges the delta.
/// Running past the end of the bytecode terminates like STOP.
pub fn run(state: &mut RunState, ext: &mut Ext, tracer: &Tracer) -> FrameOutcome {
    loop {
        if state.pc >= state.ctx.bytecode.len() {
            return FrameOutcome::success();
        }
        let byte = state.current_opcode();
        let Some(opcode) = get_opcode(byte) else {
            state.gas_left = 0;
            let error = VmError::InvalidOpcode(byte);
            tracer.error(&error);
            return FrameOutcome::fatal(error);
        };
        tracer.opcode(state, opcode);

        let delta = match (opcode.handler)(state, ext, tracer) {
            Ok(delta) => delta,
            Err(error) => {
                state.gas_left = 0;
                tracer.error(&error);
                return FrameOutcome::fatal(error);
            }
        };

        // Charge before merging: an unaffordable delta is discarded whole.
        let cost = opcode.gas + delta.gas;
        if cost > state.gas_left {
            state.gas_left = 0;
            tracer.error(&VmError::OutOfGas);
            return FrameOutcome::fatal(VmError::OutOfGas);
        }
        state.gas_left -= cost;

        state.stack = delta.stack;
        state.pc = delta.pc;
        if let Some(memory) = delta.memory {
            state.memory = memory;
        }
        if let Some(returndata) = delta.returndata {
            state.returndata = returndata;
        }
        state.logs.extend(delta.logs);
        tracer.after(state, ext);

        if !delta.resume {
            return if delta.revert {
                tracer.revert(state);
                FrameOutcome::revert()
            } else {
                FrameOutcome::success()
            };
        }
    }
}
