//! JSON-driven cases: `name`, `code.bin`, optional `tx`/`block`/`state`
//! pre-state, and an `expect` block with the final verdict, the stack as
//! decimal strings, returndata as hex, and logs.

use std::collections::HashMap;

use serde::Deserialize;

use coil::{execute, word, Account, Context, Ext, Header, Word};

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    code: Code,
    #[serde(default)]
    tx: Tx,
    #[serde(default)]
    block: Header,
    #[serde(default)]
    state: HashMap<String, AccountSpec>,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct Code {
    bin: String,
    /// Disassembly for the human reader; never interpreted.
    #[serde(default)]
    #[allow(dead_code)]
    asm: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Tx {
    from: Option<Word>,
    to: Option<Word>,
    value: Option<Word>,
    #[serde(rename = "gasLeft")]
    gas_left: Option<u64>,
    origin: Option<Word>,
    gasprice: Option<Word>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountSpec {
    #[serde(default)]
    balance: Option<Word>,
    #[serde(default)]
    code: Option<Code>,
    #[serde(default)]
    storage: HashMap<String, Word>,
}

#[derive(Debug, Deserialize)]
struct Expect {
    success: bool,
    #[serde(default)]
    stack: Option<Vec<String>>,
    #[serde(rename = "return", default)]
    ret: Option<String>,
    #[serde(default)]
    logs: Option<Vec<LogSpec>>,
}

#[derive(Debug, Deserialize)]
struct LogSpec {
    address: Word,
    #[serde(default)]
    data: String,
    #[serde(default)]
    topics: Vec<Word>,
}

fn check(raw: &str) -> eyre::Result<()> {
    let case: Case = serde_json::from_str(raw)?;
    let name = &case.name;

    let mut ext = Ext::new();
    for (address, spec) in &case.state {
        let mut account = Account::default();
        if let Some(balance) = spec.balance {
            account.balance = balance;
        }
        if let Some(code) = &spec.code {
            account.code = Some(hex::decode(code.bin.trim_start_matches("0x"))?);
        }
        for (key, value) in &spec.storage {
            account.storage.insert(word(key), *value);
        }
        ext.state.insert(word(address), account);
    }

    let code = hex::decode(case.code.bin.trim_start_matches("0x"))?;
    let mut ctx = Context::new(code).with_block(case.block);
    if let Some(from) = case.tx.from {
        ctx = ctx.with_caller(from);
    }
    if let Some(origin) = case.tx.origin {
        ctx = ctx.with_origin(origin);
    }
    if let Some(to) = case.tx.to {
        ctx = ctx.with_address(to);
    }
    if let Some(value) = case.tx.value {
        ctx = ctx.with_value(value);
    }
    if let Some(gas) = case.tx.gas_left {
        ctx = ctx.with_gas(gas);
    }
    if let Some(price) = case.tx.gasprice {
        ctx = ctx.with_gas_price(price);
    }
    if let Some(data) = &case.tx.data {
        ctx = ctx.with_call_data(hex::decode(data.trim_start_matches("0x"))?);
    }

    let out = execute(&ctx, &mut ext, 0);

    assert_eq!(out.success, case.expect.success, "{name}: success");
    if let Some(stack) = &case.expect.stack {
        let want = stack
            .iter()
            .map(|s| Word::from_dec_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(out.stack, want, "{name}: stack");
    }
    if let Some(ret) = &case.expect.ret {
        assert_eq!(
            hex::encode(&out.returndata),
            ret.trim_start_matches("0x"),
            "{name}: returndata"
        );
    }
    if let Some(logs) = &case.expect.logs {
        assert_eq!(out.logs.len(), logs.len(), "{name}: log count");
        for (got, want) in out.logs.iter().zip(logs) {
            assert_eq!(got.address, want.address, "{name}: log address");
            assert_eq!(got.topics, want.topics, "{name}: log topics");
            assert_eq!(
                hex::encode(&got.data),
                want.data.trim_start_matches("0x"),
                "{name}: log data"
            );
        }
    }
    Ok(())
}

macro_rules! case {
    ($test:ident, $file:literal) => {
        #[test]
        fn $test() -> eyre::Result<()> {
            check(include_str!(concat!("cases/", $file)))
        }
    };
}

case!(test_push_add, "push_add.json");
case!(test_add_overflow, "add_overflow.json");
case!(test_div_zero, "div_zero.json");
case!(test_jumpi_taken, "jumpi_taken.json");
case!(test_stack_underflow, "stack_underflow.json");
case!(test_sload_prestate, "sload_prestate.json");
case!(test_call_return, "call_return.json");
case!(test_log_topics, "log_topics.json");
case!(test_static_violation, "static_violation.json");
case!(test_block_projection, "block_projection.json");
