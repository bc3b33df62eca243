use crate::common::word;
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::Delta;

pub fn add(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::add(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn mul(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::mul(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn sub(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::sub(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn div(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::div(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn sdiv(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::sdiv(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn rem(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::rem(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn smod(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::smod(a, b))?;
    Ok(Delta::next(state, stack))
}

pub fn addmod(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let n = stack.pop()?;
    stack.push(word::addmod(a, b, n))?;
    Ok(Delta::next(state, stack))
}

pub fn mulmod(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let n = stack.pop()?;
    stack.push(word::mulmod(a, b, n))?;
    Ok(Delta::next(state, stack))
}

/// Dynamic charge: 50 gas per byte of the exponent.
pub fn exp(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let base = stack.pop()?;
    let exponent = stack.pop()?;
    stack.push(word::exp(base, exponent))?;
    Ok(Delta::next(state, stack).with_gas(50 * word::exp_byte_len(exponent)))
}

pub fn signextend(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let b = stack.pop()?;
    let x = stack.pop()?;
    stack.push(word::signextend(b, x))?;
    Ok(Delta::next(state, stack))
}
