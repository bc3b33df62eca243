use crate::ext::Ext;
use crate::interpreter::{Log, RunState, VmError};
use crate::tracer::Tracer;

use super::{to_offset, Delta};

/// LOG0-LOG4: n topics off the stack, payload from memory. The 375 + 375n
/// base lives in the opcode table; the per-byte and expansion charges are
/// reported here.
pub fn log(state: &RunState, _: &mut Ext, _: &Tracer) -> Result<Delta, VmError> {
    if state.ctx.is_static {
        return Err(VmError::StaticViolation);
    }
    let n = (state.current_opcode() - 0xa0) as usize;
    let mut stack = state.stack.clone();
    let offset = to_offset(stack.pop()?)?;
    let size = to_offset(stack.pop()?)?;
    let mut topics = Vec::with_capacity(n);
    for _ in 0..n {
        topics.push(stack.pop()?);
    }
    let mut memory = state.memory.clone();
    let (data, expansion) = memory.read(offset, size)?;
    let entry = Log {
        address: state.ctx.address,
        data,
        topics,
    };
    Ok(Delta::next(state, stack)
        .with_memory(memory)
        .with_log(entry)
        .with_gas(8 * size as u64 + expansion))
}
