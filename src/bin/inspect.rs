//! Event log inspector.
//!
//! Reads a serialized event log (`.json` or `.cbor`) and prints a
//! human-readable provenance timeline plus the derived asset state.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use credibil_cel::{EventEntry, EventKind, EventLog, resolve_state, verify_log, wire};

#[derive(Parser)]
#[command(name = "cel-inspect", about = "Inspect a cryptographic event log", version)]
struct Args {
    /// Path to a `.json` or `.cbor` event log.
    #[arg(long)]
    log: PathBuf,

    /// Verify the log and print the verification report.
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.log)
        .with_context(|| format!("cannot read {}", args.log.display()))?;
    let log = match args.log.extension().and_then(|e| e.to_str()) {
        Some("json") => wire::json::from_str(std::str::from_utf8(&bytes)?)?,
        Some("cbor") => wire::cbor::from_slice(&bytes)?,
        _ => anyhow::bail!("log path must end in .json or .cbor"),
    };
    print_timeline(&log)?;

    if args.verify {
        let report = verify_log(&log);
        println!();
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.verified {
            anyhow::bail!("log failed verification");
        }
    }
    Ok(())
}

fn print_timeline(log: &EventLog) -> anyhow::Result<()> {
    if let Some(previous) = &log.previous_log {
        println!("continues from {previous}");
    }
    for (index, entry) in log.events.iter().enumerate() {
        print_entry(index, entry);
    }

    let state = resolve_state(log)?;
    println!();
    println!("asset: {}", state.did);
    println!("layer: {}", state.layer);
    if let Some(name) = &state.name {
        println!("name: {name}");
    }
    if state.deactivated {
        println!("status: deactivated");
    }
    Ok(())
}

fn print_entry(index: usize, entry: &EventEntry) {
    let timestamp = match entry.kind {
        EventKind::Create => entry.data.get("createdAt"),
        EventKind::Update => entry.data.get("migratedAt").or_else(|| entry.data.get("updatedAt")),
        EventKind::Deactivate => entry.data.get("deactivatedAt"),
    }
    .and_then(|v| v.as_str())
    .unwrap_or("-");

    let witnesses = entry.proof.iter().filter(|p| p.is_witness()).count();
    println!("[{index}] {} at {timestamp} ({witnesses} witness proofs)", entry.kind);

    if let Some(target) = entry.data.get("targetDid").and_then(|v| v.as_str()) {
        let layer = entry.data.get("layer").and_then(|v| v.as_str()).unwrap_or("-");
        println!("    migrated to {target} (layer {layer})");
    }
    if let Some(txid) = entry.data.get("txid").and_then(|v| v.as_str()) {
        println!("    anchored in tx {txid}");
    }
    if let Some(inscription) = entry.data.get("inscriptionId").and_then(|v| v.as_str()) {
        println!("    inscription {inscription}");
    }
    if let Some(height) = entry.data.get("blockHeight").and_then(serde_json::Value::as_u64) {
        println!("    block height {height}");
    }
    if let Some(reason) = entry.data.get("reason").and_then(|v| v.as_str()) {
        println!("    reason: {reason}");
    }
}
