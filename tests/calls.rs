//! Inter-frame semantics: gas forwarding, static propagation, delegate
//! context inheritance, value transfer, returndata plumbing.

use coil::context::{CALL_DEPTH_LIMIT, DEFAULT_GAS};
use coil::{execute, word, Account, Context, Ext, Outcome, Word};

/// CALL(gas 0xffff, to, value, args 0/0, ret 0/retSize) assembled from the
/// tail of the argument list upward.
fn call_code(to: &str, value: u8, ret_size: u8) -> String {
    format!("60{ret_size:02x}60006000600060{value:02x}61{}61fffff1", &to[2..])
}

/// DELEGATECALL/STATICCALL take no value operand.
fn thin_call_code(opcode: &str, to: &str) -> String {
    format!("600060006000600061{}61ffff{opcode}", &to[2..])
}

fn run(caller_code: &str, ext: &mut Ext, f: impl FnOnce(Context) -> Context) -> Outcome {
    let code = hex::decode(caller_code).expect("caller bytecode");
    let ctx = f(Context::new(code));
    execute(&ctx, ext, 0)
}

fn account_with_code(code: &str) -> Account {
    Account::with_code(hex::decode(code).expect("callee bytecode"))
}

#[test]
fn test_call_copies_returndata_into_memory() {
    // Callee returns one word of 0x2a; caller CALLs then MLOADs it.
    let callee = word("0x00aa");
    let mut ext = Ext::new().with_account(callee, account_with_code("602a60005260206000f3"));
    let code = format!("{}600051", call_code("0x00aa", 0, 0x20));
    let out = run(&code, &mut ext, |ctx| ctx);
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::from(42), Word::one()]);
    assert_eq!(out.returndata.len(), 32);
    assert_eq!(out.returndata[31], 42);
}

#[test]
fn test_call_storage_write_lands_in_callee() {
    let callee = word("0x00aa");
    let mut ext = Ext::new().with_account(callee, account_with_code("6001600055"));
    let out = run(&call_code("0x00aa", 0, 0), &mut ext, |ctx| {
        ctx.with_address(word("0x00ee"))
    });
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::one()]);
    assert_eq!(ext.get(&callee, &Word::zero()), Word::one());
    assert_eq!(ext.get(&word("0x00ee"), &Word::zero()), Word::zero());
}

#[test]
fn test_staticcall_rejects_sstore() {
    let callee = word("0x00aa");
    let mut ext = Ext::new().with_account(callee, account_with_code("6001600055"));
    let out = run(&thin_call_code("fa", "0x00aa"), &mut ext, |ctx| ctx);
    // The violation kills the sub-frame; the caller sees 0 and carries on.
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::zero()]);
    assert_eq!(ext.get(&callee, &Word::zero()), Word::zero());
}

#[test]
fn test_staticcall_allows_reads() {
    let callee = word("0x00aa");
    let mut account = account_with_code("60005460005260206000f3");
    account.storage.insert(Word::zero(), Word::from(7));
    let mut ext = Ext::new().with_account(callee, account);
    let out = run(&thin_call_code("fa", "0x00aa"), &mut ext, |ctx| ctx);
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::one()]);
    assert_eq!(out.returndata[31], 7);
}

#[test]
fn test_static_flag_survives_nested_plain_call() {
    // Static caller -> CALL (value 0) -> callee SSTOREs: still rejected.
    let inner = word("0x00bb");
    let outer = word("0x00aa");
    let mut ext = Ext::new()
        .with_account(inner, account_with_code("6001600055"))
        .with_account(outer, account_with_code(&call_code("0x00bb", 0, 0)));
    let out = run(&thin_call_code("fa", "0x00aa"), &mut ext, |ctx| ctx);
    assert!(out.success);
    // The outer sub-frame itself succeeded, but the inner one pushed 0 onto
    // the outer frame's stack and the write never landed.
    assert_eq!(out.stack, vec![Word::one()]);
    assert_eq!(ext.get(&inner, &Word::zero()), Word::zero());
}

#[test]
fn test_delegatecall_runs_in_caller_context() {
    // Callee stores CALLVALUE at key 0 and CALLER at key 1.
    let library = word("0x00bb");
    let proxy = word("0x00aa");
    let mut ext = Ext::new().with_account(library, account_with_code("3460005533600155"));
    let out = run(&thin_call_code("f4", "0x00bb"), &mut ext, |ctx| {
        ctx.with_address(proxy)
            .with_caller(word("0x00cc"))
            .with_value(Word::from(5))
    });
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::one()]);
    // Both writes landed in the proxy's storage, and the callee observed the
    // proxy's own caller and value.
    assert_eq!(ext.get(&proxy, &Word::zero()), Word::from(5));
    assert_eq!(ext.get(&proxy, &Word::one()), word("0x00cc"));
    assert!(ext.state[&library].storage.is_empty());
}

#[test]
fn test_revert_propagates_returndata() {
    let callee = word("0x00aa");
    let mut ext = Ext::new().with_account(callee, account_with_code("60aa60005260206000fd"));
    // CALL, then RETURNDATASIZE.
    let code = format!("{}3d", call_code("0x00aa", 0, 0));
    let out = run(&code, &mut ext, |ctx| ctx);
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::from(32), Word::zero()]);
    assert_eq!(out.returndata[31], 0xaa);
}

#[test]
fn test_call_to_empty_account_transfers_value() {
    let treasury = word("0x00aa");
    let sink = word("0x00cc");
    let mut ext = Ext::new().with_account(treasury, Account::with_balance(Word::from(10)));
    let out = run(&call_code("0x00cc", 7, 0), &mut ext, |ctx| {
        ctx.with_address(treasury)
    });
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::one()]);
    assert_eq!(ext.balance(&treasury), Word::from(3));
    assert_eq!(ext.balance(&sink), Word::from(7));
}

#[test]
fn test_call_with_insufficient_balance_fails() {
    let treasury = word("0x00aa");
    let mut ext = Ext::new().with_account(treasury, Account::with_balance(Word::from(10)));
    let out = run(&call_code("0x00cc", 20, 0), &mut ext, |ctx| {
        ctx.with_address(treasury)
    });
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::zero()]);
    assert_eq!(ext.balance(&treasury), Word::from(10));
    assert_eq!(ext.balance(&word("0x00cc")), Word::zero());
}

#[test]
fn test_value_bearing_call_from_static_frame_is_fatal() {
    let outer = word("0x00aa");
    let mut ext = Ext::new()
        .with_account(outer, account_with_code(&call_code("0x00cc", 1, 0)))
        .with_account(word("0x00cc"), Account::default());
    ext.account_mut(&outer).balance = Word::from(10);
    let out = run(&thin_call_code("fa", "0x00aa"), &mut ext, |ctx| ctx);
    assert!(out.success);
    // The outer sub-frame died on the violation, so the top frame sees 0.
    assert_eq!(out.stack, vec![Word::zero()]);
    assert_eq!(ext.balance(&outer), Word::from(10));
}

#[test]
fn test_unused_forwarded_gas_is_refunded() {
    // Callee is a lone STOP: everything forwarded comes back, so the caller
    // pays exactly its seven pushes plus the 100 base.
    let mut ext = Ext::new().with_account(word("0x00aa"), account_with_code("00"));
    let out = run(&call_code("0x00aa", 0, 0), &mut ext, |ctx| ctx);
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::one()]);
    assert_eq!(DEFAULT_GAS - out.gas_left, 7 * 3 + 100);
}

#[test]
fn test_forwarding_cap_retains_one_64th() {
    // Callee loops forever and burns everything it was given; the cap must
    // leave the caller its held-back 64th.
    let mut ext = Ext::new().with_account(word("0x00aa"), account_with_code("5b600056"));
    let out = run(&call_code("0x00aa", 0, 0), &mut ext, |ctx| ctx.with_gas(10_000));
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::zero()]);
    // 10000 - 21 pushes = 9979 at CALL; (9979-100) minus its 64th = 9725
    // forwarded and burned; 10000 - 21 - 100 - 9725 = 154.
    assert_eq!(out.gas_left, 154);
}

#[test]
fn test_depth_cap_fails_the_sub_call() {
    let mut ext = Ext::new().with_account(word("0x00aa"), account_with_code("00"));
    let code = hex::decode(call_code("0x00aa", 0, 0)).unwrap();
    let ctx = Context {
        depth: CALL_DEPTH_LIMIT,
        ..Context::new(code)
    };
    let out = execute(&ctx, &mut ext, 0);
    assert!(out.success);
    assert_eq!(out.stack, vec![Word::zero()]);
}

#[test]
fn test_log_ordering_across_frames() {
    let callee = word("0x00aa");
    let caller = word("0x00ee");
    let mut ext = Ext::new().with_account(callee, account_with_code("60006000a0"));
    // LOG0, CALL, LOG0.
    let code = format!("60006000a0{}60006000a0", call_code("0x00aa", 0, 0));
    let out = run(&code, &mut ext, |ctx| ctx.with_address(caller));
    assert!(out.success);
    let addresses: Vec<Word> = out.logs.iter().map(|log| log.address).collect();
    assert_eq!(addresses, vec![caller, callee, caller]);
}
