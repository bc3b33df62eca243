//! MLOAD/MSTORE/MSTORE8/MSIZE, plus SHA3 which hashes a memory slice.

use crate::common::{hash::keccak256, Word};
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::{to_offset, Delta};

pub fn mload(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let mut memory = state.memory.clone();
    let (bytes, expansion) = memory.read(offset, 32)?;
    stack.push(Word::from_big_endian(&bytes))?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(expansion))
}

pub fn mstore(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let value = stack.pop()?;
    let mut memory = state.memory.clone();
    let expansion = memory.write(offset, &value.to_big_endian())?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(expansion))
}

/// Only the low byte of the value lands in memory.
pub fn mstore8(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let value = stack.pop()?;
    let mut memory = state.memory.clone();
    let expansion = memory.write_byte(offset, value.byte(0))?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(expansion))
}

pub fn msize(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.memory.len()))?;
    Ok(Delta::next(state, stack))
}

/// Keccak-256 of memory[offset..offset+size]; 6 gas per hashed word.
pub fn sha3(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let size = to_offset(stack.pop()?)?;
    let mut memory = state.memory.clone();
    let (bytes, expansion) = memory.read(offset, size)?;
    stack.push(Word::from_big_endian(&keccak256(&bytes)))?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(6 * size.div_ceil(32) as u64 + expansion))
}
