//! RPC method handler for the BoardVault JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches one call to the board, identity or settings.

use serde_json::{json, Value};

use crate::app::App;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::record::{FilterTag, RecordForm};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn form_param(params: &Value) -> Result<RecordForm, String> {
    let form = params.get("form").cloned().ok_or("missing form")?;
    serde_json::from_value(form).map_err(|e| format!("invalid form: {}", e))
}

/// Everything a client needs to draw the board.
fn board_state(app: &App) -> Value {
    let board = &app.board;
    json!({
        "filter": board.filter().as_str(),
        "search": board.search(),
        "page": board.view(),
        "categories": board.categories(),
        "modal": board.modal(),
        "toast": board.toast(),
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    // Pick up any auth change or snapshot pushed since the last call.
    app.sync_auth();
    app.board.refresh();

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Board view ───
        "board.view" => Ok(board_state(app)),
        "board.categories" => Ok(json!(app.board.categories())),
        "board.set_filter" => {
            let filter = str_param(params, "filter")?;
            app.board.set_filter(FilterTag::parse(filter));
            Ok(board_state(app))
        }
        "board.set_search" => {
            let search = str_param(params, "search")?;
            app.board.set_search(search);
            Ok(board_state(app))
        }
        "board.go_to_page" => {
            let page = params
                .get("page")
                .and_then(|v| v.as_u64())
                .ok_or("missing page")?;
            let page = usize::try_from(page).map_err(|_| "invalid page".to_string())?;
            app.board.go_to_page(page).map_err(|e| e.to_string())?;
            Ok(board_state(app))
        }
        "board.next_page" => {
            let moved = app.board.next_page();
            Ok(json!({"moved": moved, "page": app.board.page()}))
        }
        "board.previous_page" => {
            let moved = app.board.previous_page();
            Ok(json!({"moved": moved, "page": app.board.page()}))
        }
        "board.save" => {
            let form = form_param(params)?;
            let edit_id = params.get("edit_id").and_then(|v| v.as_str());
            let id = app.board.save(&form, edit_id).await.map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }

        // ─── Modal ───
        "modal.open_new" => {
            app.board.open_new();
            Ok(json!(app.board.modal()))
        }
        "modal.open_edit" => {
            let id = str_param(params, "id")?;
            app.board.open_edit(id).map_err(|e| e.to_string())?;
            Ok(json!(app.board.modal()))
        }
        "modal.update_form" => {
            let form = form_param(params)?;
            app.board.update_form(form);
            Ok(json!(app.board.modal()))
        }
        "modal.close" => {
            app.board.close_modal();
            Ok(json!({"ok": true}))
        }
        "modal.submit" => {
            let id = app.board.submit().await.map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }

        // ─── Records ───
        "record.archive" | "record.restore" => {
            let id = str_param(params, "id")?;
            let archived = method == "record.archive";
            app.board.archive(id, archived).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "record.delete" => {
            let id = str_param(params, "id")?;
            let confirmed = params.get("confirm").and_then(|v| v.as_bool()).unwrap_or(false);
            let deleted = app
                .board
                .delete(id, |_prompt| confirmed)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"deleted": deleted}))
        }
        "record.paste_url" => {
            let id = str_param(params, "id")?;
            // The client reads the clipboard and forwards the result.
            match params.get("clipboard_error").and_then(|v| v.as_str()) {
                Some("unsupported") => app.clipboard.set_unsupported(),
                Some(reason) => app.clipboard.deny(reason),
                None => app.clipboard.set_text(
                    params.get("clipboard").and_then(|v| v.as_str()).map(str::to_string),
                ),
            }
            let outcome = app
                .board
                .paste_url_from_clipboard(id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"outcome": outcome, "toast": app.board.toast()}))
        }

        // ─── Toast ───
        "toast.current" => Ok(json!(app.board.toast())),
        "toast.dismiss" => {
            app.board.dismiss_toast();
            Ok(json!({"ok": true}))
        }

        // ─── Identity ───
        "auth.state" => Ok(json!({"user": app.current_user()})),
        "auth.sign_in" => {
            let user = app.sign_in().await.map_err(|e| e.to_string())?;
            Ok(json!({"user": user}))
        }
        "auth.sign_out" => {
            app.sign_out();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => serde_json::to_value(app.settings()).map_err(|e| e.to_string()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "applies": "next start"}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
