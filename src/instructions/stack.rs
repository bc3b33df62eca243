//! POP and the three parameterized families: PUSH0-32, DUP1-16, SWAP1-16.
//! The family handlers recover their width from the opcode byte itself, so a
//! single function serves the whole range.

use crate::common::Word;
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::{copy_padded, Delta};

pub fn pop(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.pop()?;
    Ok(Delta::next(state, stack))
}

pub fn push0(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::zero())?;
    Ok(Delta::next(state, stack))
}

/// PUSHn: the n bytes after the opcode, big-endian, zero-padded when the
/// bytecode ends early. The counter skips the immediate.
pub fn push(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let n = (state.current_opcode() - 0x60) as usize + 1;
    let immediate = copy_padded(&state.ctx.bytecode, state.pc + 1, n);
    let mut stack = state.stack.clone();
    stack.push(Word::from_big_endian(&immediate))?;
    Ok(Delta::jump(stack, state.pc + 1 + n))
}

pub fn dup(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let n = (state.current_opcode() - 0x80) as usize + 1;
    let mut stack = state.stack.clone();
    stack.dup(n)?;
    Ok(Delta::next(state, stack))
}

pub fn swap(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let n = (state.current_opcode() - 0x90) as usize + 1;
    let mut stack = state.stack.clone();
    stack.swap(n)?;
    Ok(Delta::next(state, stack))
}
