//! Control flow: STOP, JUMP/JUMPI/JUMPDEST, PC, GAS.

use crate::common::Word;
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::{to_offset, Delta};

pub fn stop(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    Ok(Delta::halt(state, state.stack.clone(), false).with_returndata(Vec::new()))
}

pub fn jump(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let dest = jump_target(state, stack.pop()?)?;
    Ok(Delta::jump(stack, dest))
}

pub fn jumpi(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let dest = stack.pop()?;
    let condition = stack.pop()?;
    if condition.is_zero() {
        Ok(Delta::next(state, stack))
    } else {
        let dest = jump_target(state, dest)?;
        Ok(Delta::jump(stack, dest))
    }
}

/// A destination is only good if the jumpdest scan marked it: a 0x5b byte
/// outside every PUSH immediate span.
fn jump_target(state: &RunState, dest: Word) -> Result<usize, VmError> {
    match to_offset(dest) {
        Ok(dest) if state.valids.is_valid(dest) => Ok(dest),
        _ => Err(VmError::InvalidJump),
    }
}

pub fn pc(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.pc))?;
    Ok(Delta::next(state, stack))
}

/// Pushes the budget as it stands after this instruction's own charge. The
/// executor charges after the handler runs, so the handler deducts its own
/// table minimum here.
pub fn gas(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    stack.push(Word::from(state.gas_left.saturating_sub(2)))?;
    Ok(Delta::next(state, stack))
}

pub fn jumpdest(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    Ok(Delta::next(state, state.stack.clone()))
}
