use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use data_binding_engine::{checks, evaluate_checks, resolve_string_or, Scope};

/// Resolve an interpolatable template, or run validation rules, against a
/// JSON data model.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON data model (string). Pipe a file via shell quoting.
    model: String,
    /// Template text, e.g. "Hello, ${/user/name}!"
    #[arg(required_unless_present = "checks")]
    template: Option<String>,
    /// Base path for relative references (optional)
    #[arg(long)]
    scope: Option<String>,
    /// Default JSON value for a bare expression that resolves to nothing
    #[arg(long)]
    default: Option<String>,
    /// Run the validation rules in this JSON file instead of a template
    #[arg(long)]
    checks: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let model: Value = match serde_json::from_str(&args.model) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid JSON model: {e}");
            std::process::exit(1);
        }
    };

    let scope = args
        .scope
        .as_deref()
        .map(Scope::at)
        .unwrap_or_else(Scope::root);

    if let Some(path) = args.checks.as_ref() {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Cannot read {}: {e}", path.display());
                std::process::exit(1);
            }
        };
        let rules = match checks::parse_rules(&raw) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let result = evaluate_checks(&rules, &model, &scope);
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        return;
    }

    let default = args
        .default
        .as_deref()
        .map(|d| serde_json::from_str(d).unwrap_or_else(|_| Value::String(d.to_string())))
        .unwrap_or(Value::Null);

    let template = args.template.unwrap_or_default();
    let out = resolve_string_or(&template, &model, &scope, default);
    println!("{}", serde_json::to_string_pretty(&out).unwrap());
}
