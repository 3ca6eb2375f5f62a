//! Run one chaincode invocation against a ledger snapshot file.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use regnet::domain::ports::CallerIdentity;
use regnet::inbound::ContractNames;
use regnet::outbound::{InMemoryLedgerStore, load_snapshot, save_snapshot};
use regnet::{ChaincodeSettings, Invocation, build_router, telemetry};
use serde_json::Value;
use tokio::runtime::Builder;

/// `regnet-invoke` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "regnet-invoke",
    about = "Invoke a property registration contract function against a local ledger snapshot",
    version
)]
struct CliArgs {
    /// Ledger snapshot file; created on the first successful write.
    #[arg(long, value_name = "path", default_value = "regnet-ledger.json")]
    snapshot: PathBuf,
    /// MSP ID the call is made as.
    #[arg(long, value_name = "msp-id")]
    msp: String,
    /// Contract: `user`, `registrar`, or a fully qualified contract name.
    #[arg(long, value_name = "name", default_value = "user")]
    contract: String,
    /// Function name, e.g. `requestNewUser`.
    function: String,
    /// Positional function arguments.
    args: Vec<String>,
}

fn main() -> io::Result<ExitCode> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<ExitCode> {
    telemetry::init_tracing();
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let settings = ChaincodeSettings::load_from_iter([OsString::from("regnet-invoke")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let config = settings
        .to_config()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let snapshot = load_snapshot(&args.snapshot).map_err(io::Error::other)?;
    let store = Arc::new(InMemoryLedgerStore::from_snapshot(snapshot).map_err(io::Error::other)?);
    let router = build_router(Arc::clone(&store), &config, Arc::new(DefaultClock));

    let contract = resolve_contract(&args.contract, router.names());
    let invocation = Invocation::new(
        contract,
        args.function,
        args.args,
        CallerIdentity::new(args.msp),
    );

    match router.invoke(invocation).await {
        Ok(value) => {
            let snapshot = store.snapshot().map_err(io::Error::other)?;
            save_snapshot(&args.snapshot, &snapshot).map_err(io::Error::other)?;
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let payload = serde_json::to_value(error.to_payload()).map_err(io::Error::other)?;
            print_json(&payload)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn resolve_contract(raw: &str, names: &ContractNames) -> String {
    match raw {
        "user" => names.user().to_owned(),
        "registrar" => names.registrar().to_owned(),
        other => other.to_owned(),
    }
}

fn print_json(value: &Value) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(io::stdout().lock(), "{rendered}")
}
