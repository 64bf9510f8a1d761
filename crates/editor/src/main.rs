//! Line-oriented JSON command shell.
//!
//! Reads one command (or an array of commands) per line from stdin and writes
//! one JSON response per line to stdout.

use std::io::{self, BufRead, Write};

use scene_editor_lib::command::{execute_json, execute_json_batch};
use scene_editor_lib::state::{EditorSettings, EditorState};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_editor=info,scene_editor_lib=info".into()),
        )
        .init();

    // Parse --settings <path> argument
    let settings = parse_settings_arg().unwrap_or_default();
    let mut state = EditorState::with_settings(settings);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = if trimmed.starts_with('[') {
            execute_json_batch(&mut state, trimmed).and_then(|r| Ok(serde_json::to_string(&r)?))
        } else {
            execute_json(&mut state, trimmed).and_then(|r| Ok(serde_json::to_string(&r)?))
        };
        let out = match reply {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("{e}");
                serde_json::json!({ "success": false, "error": e.to_string() }).to_string()
            }
        };

        if writeln!(stdout, "{out}").and_then(|_| stdout.flush()).is_err() {
            break;
        }
    }
}

fn parse_settings_arg() -> Option<EditorSettings> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--settings" && i + 1 < args.len() {
            let path = &args[i + 1];
            match EditorSettings::from_json_file(path) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {path}");
                    return Some(settings);
                }
                Err(e) => {
                    tracing::error!("Failed to load settings from {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
