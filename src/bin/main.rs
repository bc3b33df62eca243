use clap::Parser;
use serde::Deserialize;

use coil::{execute, Context, Ext, Word};

#[derive(Debug, Parser)]
#[command(name = "coil", about = "Shanghai-hardfork EVM bytecode interpreter")]
struct Cli {
    /// Hex-encoded bytecode, with or without 0x prefix
    #[arg(short, long)]
    code: String,

    /// Trace verbosity: 0 silent, 1 opcode/pc, 2 adds stack/memory/gas,
    /// 3 adds state/calldata/logs/returndata
    #[arg(short, long, default_value_t = 1)]
    verbose: u8,

    /// Transaction envelope as JSON, e.g. '{"from":"0xae..","value":"0x0"}'
    #[arg(long)]
    tx: Option<String>,
}

/// Optional overrides for the execution context. Word-valued fields are
/// 0x-prefixed hex strings; gasLeft is a plain integer.
#[derive(Debug, Default, Deserialize)]
struct TxEnvelope {
    from: Option<Word>,
    to: Option<Word>,
    value: Option<Word>,
    #[serde(rename = "gasLeft")]
    gas_left: Option<u64>,
    origin: Option<Word>,
    gasprice: Option<Word>,
    data: Option<String>,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let code = hex::decode(cli.code.trim_start_matches("0x"))?;
    let tx: TxEnvelope = match &cli.tx {
        Some(raw) => serde_json::from_str(raw)?,
        None => TxEnvelope::default(),
    };
    let data = match &tx.data {
        Some(raw) => hex::decode(raw.trim_start_matches("0x"))?,
        None => Vec::new(),
    };

    let mut ctx = Context::new(code).with_call_data(data);
    if let Some(from) = tx.from {
        ctx = ctx.with_caller(from);
    }
    if let Some(origin) = tx.origin {
        ctx = ctx.with_origin(origin);
    }
    if let Some(to) = tx.to {
        ctx = ctx.with_address(to);
    }
    if let Some(value) = tx.value {
        ctx = ctx.with_value(value);
    }
    if let Some(gas) = tx.gas_left {
        ctx = ctx.with_gas(gas);
    }
    if let Some(price) = tx.gasprice {
        ctx = ctx.with_gas_price(price);
    }

    let mut ext = Ext::new();
    let result = execute(&ctx, &mut ext, cli.verbose);

    // A program that ran to a verdict is a successful invocation, whatever
    // the verdict; only CLI and parse errors exit non-zero.
    if result.success {
        println!("\nOK: 0x{}", hex::encode(&result.returndata));
    } else if let Some(error) = &result.error {
        println!("\nFAILED: {error}");
    } else {
        println!("\nREVERTED: 0x{}", hex::encode(&result.returndata));
    }
    println!("gas left: {}", result.gas_left);
    println!(
        "STACK:{}",
        if result.stack.is_empty() { " []" } else { "" }
    );
    for (i, word) in result.stack.iter().enumerate() {
        println!("{:>4}: {word:#x}", i + 1);
    }
    Ok(())
}
