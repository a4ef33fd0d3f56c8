//! linkup-provider-docstore - JSON document store provider for linkup
//!
//! This binary implements the linkup provider protocol, communicating
//! with linkup via JSON over stdin/stdout.
//!
//! Documents live in a single JSON file named by the `docstore_path`
//! remote parameter, so several devices can share one store by pointing
//! at a synced file.

mod store;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use linkup_core::remote::protocol::{Command, CreateEvent, ListEvents, Request, Response};
use serde::de::DeserializeOwned;

use crate::store::DocStore;

#[tokio::main]
async fn main() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request),
            Err(e) => Response::<()>::error(&format!("Failed to parse request: {e}")),
        };

        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_request(request: Request) -> String {
    match request.command {
        Command::ListEvents => handle_list_events(request.params),
        Command::CreateEvent => handle_create_event(request.params),
    }
}

fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(params).map_err(|e| Response::<()>::error(&format!("Invalid params: {e}")))
}

fn open_store(remote_config: &serde_json::Map<String, serde_json::Value>) -> Result<DocStore> {
    let path = remote_config
        .get("docstore_path")
        .and_then(|v| v.as_str())
        .context("Missing docstore_path in remote config")?;
    Ok(DocStore::new(shellexpand::tilde(path).into_owned()))
}

fn handle_list_events(params: serde_json::Value) -> String {
    let params: ListEvents = match parse_params(params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let result = open_store(&params.remote_config)
        .and_then(|store| store.query(&params.collection, &params.order_by, params.limit));

    match result {
        Ok(documents) => Response::success(documents),
        Err(e) => Response::<()>::error(&format!("{e:#}")),
    }
}

fn handle_create_event(params: serde_json::Value) -> String {
    let params: CreateEvent = match parse_params(params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let result = open_store(&params.remote_config).and_then(|store| {
        let fields = match serde_json::to_value(&params.record)? {
            serde_json::Value::Object(map) => map,
            _ => anyhow::bail!("Event record is not an object"),
        };
        store.insert(&params.collection, fields, chrono::Utc::now())
    });

    match result {
        Ok(id) => Response::success(id),
        Err(e) => Response::<()>::error(&format!("{e:#}")),
    }
}
