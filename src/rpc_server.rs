//! BoardVault RPC Server: JSON-RPC over stdin/stdout for a UI process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"board.set_filter", "params":{"filter":"ideas"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"ready",...} on start, {"event":"snapshot",...} on every push.

use std::io::{self, Write};

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use boardvault::app::App;
use boardvault::logging;
use boardvault::rpc_handler::handle_method;
use boardvault::services::settings_engine::SettingsEngine;

enum Event {
    Line(io::Result<Option<String>>),
    Snapshot(bool),
    Auth,
}

fn emit(value: &Value) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut app = App::new(SettingsEngine::new(None))?;
    app.startup().await;

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let attached = app.board.is_attached();
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line),
            pushed = app.board.wait_for_snapshot(), if attached => Event::Snapshot(pushed),
            Ok(()) = app.auth.changed() => Event::Auth,
        };

        let line = match event {
            Event::Snapshot(true) => {
                emit(&json!({"event": "snapshot", "records": app.board.records().len()}));
                continue;
            }
            Event::Snapshot(false) => {
                warn!("snapshot feed closed");
                app.board.detach();
                continue;
            }
            Event::Auth => {
                app.sync_auth();
                emit(&json!({"event": "auth", "user": app.current_user()}));
                continue;
            }
            Event::Line(Ok(Some(line))) => line,
            Event::Line(Ok(None)) => break,
            Event::Line(Err(e)) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        emit(&response);
    }

    info!("stdin closed, shutting down");
    Ok(())
}
