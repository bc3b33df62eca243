//! The call dispatcher: the public entry point for a top-level call and the
//! recursion point for CALL/DELEGATECALL/STATICCALL. One frame runs at a
//! time; a sub-call suspends its parent until it completes and threads the
//! same world-state map through.

use crate::common::Word;
use crate::context::Context;
use crate::ext::Ext;
use crate::interpreter::{self, Log, RunState, VmError};
use crate::tracer::Tracer;

/// What one top-level execution produced. The world state itself is mutated
/// in place through the `Ext` handed to [`execute`].
#[derive(Debug)]
pub struct Outcome {
    pub success: bool,
    /// Final stack, top-first.
    pub stack: Vec<Word>,
    pub memory: Vec<u8>,
    pub gas_left: u64,
    pub returndata: Vec<u8>,
    pub logs: Vec<Log>,
    /// Set for every failure except an explicit REVERT.
    pub error: Option<VmError>,
}

/// Run `ctx.bytecode` to completion against `ext`.
pub fn execute(ctx: &Context, ext: &mut Ext, verbosity: u8) -> Outcome {
    let tracer = Tracer::new(verbosity);
    let mut state = RunState::new(ctx);
    let frame = interpreter::run(&mut state, ext, &tracer);
    Outcome {
        success: frame.success,
        stack: state.stack.to_top_first(),
        memory: state.memory.into_bytes(),
        gas_left: state.gas_left,
        returndata: state.returndata,
        logs: state.logs,
        error: frame.error,
    }
}

/// What a sub-frame hands back to the CALL-family handler in its parent.
pub(crate) struct SubOutcome {
    pub success: bool,
    pub gas_left: u64,
    pub returndata: Vec<u8>,
    pub logs: Vec<Log>,
}

/// Run one nested frame. The parent's handler folds the result into its
/// delta: success flag on the stack, returndata copied back, unused gas
/// refunded, logs appended in emission order.
pub(crate) fn call_frame(ctx: &Context, ext: &mut Ext, tracer: &Tracer) -> SubOutcome {
    let child = tracer.child();
    let mut state = RunState::new(ctx);
    let frame = interpreter::run(&mut state, ext, &child);
    SubOutcome {
        success: frame.success,
        gas_left: state.gas_left,
        returndata: state.returndata,
        logs: state.logs,
    }
}
