//! Frame boundaries: CALL/DELEGATECALL/STATICCALL recurse into the call
//! dispatcher with a derived context; RETURN/REVERT terminate the frame with
//! a memory slice as returndata.

use crate::common::{word::bool_word, Word};
use crate::context::{Context, CALL_DEPTH_LIMIT};
use crate::executor::call_frame;
use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::memory::Memory;
use crate::stack::Stack;
use crate::tracer::Tracer;

use super::{to_offset, Delta};

#[derive(Clone, Copy, Debug)]
enum CallKind {
    Call,
    Delegate,
    Static,
}

pub fn call(state: &RunState, ext: &mut Ext, tracer: &Tracer) -> Result<Delta, VmError> {
    call_common(state, ext, tracer, CallKind::Call)
}

pub fn delegatecall(state: &RunState, ext: &mut Ext, tracer: &Tracer) -> Result<Delta, VmError> {
    call_common(state, ext, tracer, CallKind::Delegate)
}

pub fn staticcall(state: &RunState, ext: &mut Ext, tracer: &Tracer) -> Result<Delta, VmError> {
    call_common(state, ext, tracer, CallKind::Static)
}

fn call_common(
    state: &RunState,
    ext: &mut Ext,
    tracer: &Tracer,
    kind: CallKind,
) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let gas_requested = stack.pop()?;
    let to = stack.pop()?;
    let value = match kind {
        // Only CALL carries an explicit value; DELEGATECALL keeps running on
        // the caller's, STATICCALL on zero.
        CallKind::Call => stack.pop()?,
        CallKind::Delegate => state.ctx.call_value,
        CallKind::Static => Word::zero(),
    };
    let args_offset = to_offset(stack.pop()?)?;
    let args_size = to_offset(stack.pop()?)?;
    let ret_offset = to_offset(stack.pop()?)?;
    let ret_size = to_offset(stack.pop()?)?;

    if matches!(kind, CallKind::Call) && !value.is_zero() && state.ctx.is_static {
        return Err(VmError::StaticViolation);
    }

    let mut memory = state.memory.clone();
    let (call_data, mut gas) = memory.read(args_offset, args_size)?;

    // All but one 64th of what remains after the 100 base charge.
    let available = state.gas_left.saturating_sub(100);
    let cap = available - available / 64;
    let forwarded = if gas_requested > Word::from(cap) {
        cap
    } else {
        gas_requested.as_u64()
    };

    if state.ctx.depth >= CALL_DEPTH_LIMIT {
        return failed_call(state, stack, memory, gas);
    }

    if matches!(kind, CallKind::Call)
        && !value.is_zero()
        && !ext.transfer(&state.ctx.address, &to, value)
    {
        return failed_call(state, stack, memory, gas);
    }

    let code = ext.code(&to).to_vec();
    if code.is_empty() {
        // An account with no code succeeds as a no-op; the value above has
        // already moved.
        stack.push(Word::one())?;
        return Ok(Delta::next(state, stack)
            .with_memory(memory)
            .with_returndata(Vec::new())
            .with_gas(gas));
    }

    let sub_ctx = Context {
        address: match kind {
            // DELEGATECALL keeps executing "as" the caller: its storage, its
            // address on the stack.
            CallKind::Delegate => state.ctx.address,
            _ => to,
        },
        caller: match kind {
            CallKind::Delegate => state.ctx.caller,
            _ => state.ctx.address,
        },
        origin: state.ctx.origin,
        gas_price: state.ctx.gas_price,
        gas_left: forwarded,
        is_static: state.ctx.is_static || matches!(kind, CallKind::Static),
        call_value: value,
        call_data,
        bytecode: code,
        block: state.ctx.block.clone(),
        depth: state.ctx.depth + 1,
    };

    let outcome = call_frame(&sub_ctx, ext, tracer);
    gas += forwarded - outcome.gas_left;

    let copy = outcome.returndata.len().min(ret_size);
    if copy > 0 {
        gas += memory.write(ret_offset, &outcome.returndata[..copy])?;
    }

    stack.push(bool_word(outcome.success))?;
    let mut delta = Delta::next(state, stack)
        .with_memory(memory)
        .with_returndata(outcome.returndata)
        .with_gas(gas);
    delta.logs = outcome.logs;
    Ok(delta)
}

/// A call that never ran: push 0, clear returndata, charge only what the
/// argument read cost.
fn failed_call(
    state: &RunState,
    mut stack: Stack,
    memory: Memory,
    gas: u64,
) -> Result<Delta, VmError> {
    stack.push(Word::zero())?;
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_returndata(Vec::new())
        .with_gas(gas))
}

pub fn ret(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    terminate(state, false)
}

pub fn revert(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    terminate(state, true)
}

fn terminate(state: &RunState, revert: bool) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let size = to_offset(stack.pop()?)?;
    let mut memory = state.memory.clone();
    let (data, expansion) = memory.read(offset, size)?;
    Ok(Delta::halt(state, stack, revert)
        .with_memory(memory)
        .with_returndata(data)
        .with_gas(expansion))
}

pub fn invalid(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    Err(VmError::InvalidOpcode(state.current_opcode()))
}
