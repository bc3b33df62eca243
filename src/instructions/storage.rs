use crate::ext::Ext;
use crate::interpreter::{RunState, VmError};
use crate::tracer::Tracer;

use super::Delta;

pub fn sload(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    let mut stack = state.stack.clone();
    let key = stack.pop()?;
    stack.push(ext.get(&state.ctx.address, &key))?;
    Ok(Delta::next(state, stack))
}

/// Writes go straight to the shared world-state map.
pub fn sstore(state: &RunState, ext: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    if state.ctx.is_static {
        return Err(VmError::StaticViolation);
    }
    let mut stack = state.stack.clone();
    let key = stack.pop()?;
    let value = stack.pop()?;
    ext.put(&state.ctx.address, key, value);
    Ok(Delta::next(state, stack))
}
