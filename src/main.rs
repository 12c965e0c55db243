use std::path::PathBuf;
use std::sync::Arc;

use codeforge_lib::commands::providers;
use codeforge_lib::db::Database;
use codeforge_lib::{init_tracing, max_concurrency_from_env, stable_db_path, AppState};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Providers,
    Models(String),
    Thinking(String),
    All,
}

#[tokio::main]
async fn main() {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("codeforge: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let mut command: Option<Command> = None;
    let mut db_path: Option<PathBuf> = None;
    let mut ephemeral = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            print_help();
            return Ok(());
        }
        if arg == "--ephemeral" {
            ephemeral = true;
            continue;
        }
        if let Some(value) = arg.strip_prefix("--db=") {
            db_path = Some(PathBuf::from(value));
            continue;
        }
        if arg == "--db" {
            let value = args.next().ok_or_else(|| "--db requires a value".to_string())?;
            db_path = Some(PathBuf::from(value));
            continue;
        }
        if command.is_some() {
            return Err(format!("unexpected argument '{arg}'"));
        }
        command = Some(match arg.as_str() {
            "providers" => Command::Providers,
            "all" => Command::All,
            "models" => {
                let provider_id = args
                    .next()
                    .ok_or_else(|| "models requires a provider id".to_string())?;
                Command::Models(provider_id)
            }
            "thinking" => {
                let provider_id = args
                    .next()
                    .ok_or_else(|| "thinking requires a provider id".to_string())?;
                Command::Thinking(provider_id)
            }
            other => {
                return Err(format!(
                    "unknown command '{other}'. Use providers, models, thinking or all"
                ))
            }
        });
    }

    let command = command.unwrap_or(Command::Providers);

    let opened = if ephemeral {
        Database::open_in_memory()
    } else {
        let path = match db_path {
            Some(path) => path,
            None => stable_db_path().map_err(|e| e.to_string())?,
        };
        tracing::debug!("opening catalog store at {}", path.display());
        Database::open(&path)
    };
    let db = opened.map_err(|e| format!("failed to open database: {e}"))?;

    let state = AppState::new(Arc::new(db), max_concurrency_from_env());

    let output = match command {
        Command::Providers => to_json(&providers::get_language_model_providers(&state).await),
        Command::Models(provider_id) => {
            to_json(&providers::get_language_models(&state, provider_id).await)
        }
        Command::Thinking(provider_id) => {
            to_json(&Ok(providers::provider_supports_thinking(provider_id)))
        }
        Command::All => to_json(&providers::get_language_models_by_providers(&state).await),
    }?;

    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(
    result: &Result<T, codeforge_lib::AppError>,
) -> Result<String, String> {
    match result {
        Ok(value) => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn print_help() {
    println!(
        "Usage: codeforge [--db <path> | --ephemeral] [providers | models <provider-id> | thinking <provider-id> | all]\n\n\
         Prints the resolved language model catalog as JSON.\n\n\
         Environment:\n  \
         CODEFORGE_DATA_DIR          directory holding codeforge.db\n  \
         CODEFORGE_MAX_CONCURRENCY   cap on concurrent provider lookups for `all`\n  \
         RUST_LOG                    log filter (default codeforge=debug,info)"
    );
}
