//! Context, environment and block queries: the 0x30s and 0x40s.

use crate::common::{hash::keccak256, Word};
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::{copy_gas, copy_padded, to_offset, Delta};

pub fn address(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.address)?;
    Ok(Delta::next(state, stack))
}

pub fn balance(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let address = stack.pop()?;
    stack.push(ext.balance(&address))?;
    Ok(Delta::next(state, stack))
}

pub fn origin(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.origin)?;
    Ok(Delta::next(state, stack))
}

pub fn caller(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.caller)?;
    Ok(Delta::next(state, stack))
}

pub fn callvalue(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.call_value)?;
    Ok(Delta::next(state, stack))
}

pub fn calldataload(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    // An offset past the addressable range still reads: all zeros.
    let offset = to_offset(stack.pop()?).unwrap_or(usize::MAX);
    let bytes = copy_padded(&state.ctx.call_data, offset, 32);
    stack.push(Word::from_big_endian(&bytes))?;
    Ok(Delta::next(state, stack))
}

pub fn calldatasize(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.ctx.call_data.len()))?;
    Ok(Delta::next(state, stack))
}

pub fn calldatacopy(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    copy_into_memory(state, &state.ctx.call_data)
}

pub fn codesize(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.ctx.bytecode.len()))?;
    Ok(Delta::next(state, stack))
}

pub fn codecopy(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    copy_into_memory(state, &state.ctx.bytecode)
}

pub fn gasprice(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.gas_price)?;
    Ok(Delta::next(state, stack))
}

pub fn extcodesize(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let address = stack.pop()?;
    stack.push(Word::from(ext.code(&address).len()))?;
    Ok(Delta::next(state, stack))
}

pub fn extcodecopy(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let address = stack.pop()?;
    let dest = to_offset(stack.pop()?)?;
    let offset = to_offset(stack.pop()?).unwrap_or(usize::MAX);
    let size = to_offset(stack.pop()?)?;
    let bytes = copy_padded(ext.code(&address), offset, size);
    let mut memory = state.memory.clone();
    let expansion = memory.write(dest, &bytes)?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(copy_gas(size) + expansion))
}

pub fn returndatasize(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.returndata.len()))?;
    Ok(Delta::next(state, stack))
}

/// Unlike the other copies, reading past the end of returndata is fatal.
pub fn returndatacopy(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let dest = to_offset(stack.pop()?)?;
    let offset = to_offset(stack.pop()?)?;
    let size = to_offset(stack.pop()?)?;
    let end = offset.checked_add(size).ok_or(VmError::MissingData)?;
    if end > state.returndata.len() {
        return Err(VmError::MissingData);
    }
    let mut memory = state.memory.clone();
    let expansion = memory.write(dest, &state.returndata[offset..end])?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(copy_gas(size) + expansion))
}

pub fn extcodehash(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let address = stack.pop()?;
    let hash = match ext.state.get(&address) {
        None => Word::zero(),
        Some(account) => Word::from_big_endian(&keccak256(account.code())),
    };
    stack.push(hash)?;
    Ok(Delta::next(state, stack))
}

/// No history is kept; every block hash reads as zero.
pub fn blockhash(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.pop()?;
    stack.push(Word::zero())?;
    Ok(Delta::next(state, stack))
}

pub fn coinbase(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.coinbase)?;
    Ok(Delta::next(state, stack))
}

pub fn timestamp(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.timestamp)?;
    Ok(Delta::next(state, stack))
}

pub fn number(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.number)?;
    Ok(Delta::next(state, stack))
}

pub fn difficulty(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.difficulty)?;
    Ok(Delta::next(state, stack))
}

pub fn gaslimit(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.gas_limit)?;
    Ok(Delta::next(state, stack))
}

pub fn chainid(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.chain_id)?;
    Ok(Delta::next(state, stack))
}

pub fn selfbalance(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(ext.balance(&state.ctx.address))?;
    Ok(Delta::next(state, stack))
}

pub fn basefee(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(state.ctx.block.basefee)?;
    Ok(Delta::next(state, stack))
}

/// Shared body of CALLDATACOPY and CODECOPY: (dest, offset, size) with
/// zero-fill past the source and 3 gas per copied word.
fn copy_into_memory(state: &RunState, source: &[u8]) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let dest = to_offset(stack.pop()?)?;
    let offset = to_offset(stack.pop()?).unwrap_or(usize::MAX);
    let size = to_offset(stack.pop()?)?;
    let bytes = copy_padded(source, offset, size);
    let mut memory = state.memory.clone();
    let expansion = memory.write(dest, &bytes)?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_gas(copy_gas(size) + expansion))
}
