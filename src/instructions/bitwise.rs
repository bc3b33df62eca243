use crate::common::word::{self, bool_word};
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::Delta;

pub fn lt(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a < b))?;
    Ok(Delta::next(state, stack))
}

pub fn gt(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a > b))?;
    Ok(Delta::next(state, stack))
}

pub fn slt(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::slt(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn sgt(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::sgt(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn eq(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a == b))?;
    Ok(Delta::next(state, stack))
}

pub fn iszero(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    stack.push(bool_word(a.is_zero()))?;
    Ok(Delta::next(state, stack))
}

pub fn and(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a & b)?;
    Ok(Delta::next(state, stack))
}

pub fn or(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a | b)?;
    Ok(Delta::next(state, stack))
}

pub fn xor(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a ^ b)?;
    Ok(Delta::next(state, stack))
}

pub fn not(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    stack.push(!a)?;
    Ok(Delta::next(state, stack))
}

pub fn byte(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let i = stack.pop()?;
    let x = stack.pop()?;
    stack.push(word::byte(i, x))?;
    Ok(Delta::next(state, stack))
}

pub fn shl(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::shl(shift, value))?;
    Ok(Delta::next(state, stack))
}

pub fn shr(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::shr(shift, value))?;
    Ok(Delta::next(state, stack))
}

pub fn sar(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::sar(shift, value))?;
    Ok(Delta::next(state, stack))
}
