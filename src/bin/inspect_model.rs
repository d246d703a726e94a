use std::path::PathBuf;
use std::process::ExitCode;

use car_price_lib::domain::features::FEATURE_COUNT;
use car_price_lib::infrastructure::price_models::{read_artifact, summarize};

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt().with_env_filter("warn").try_init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("car_price_model.json"));

    let (artifact, fingerprint) = match read_artifact(&path) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Error inspecting model {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let summary = summarize(&artifact, fingerprint);

    println!("Model type: {}", summary.kind);
    match &summary.feature_names {
        Some(names) => {
            println!("The model expects these features in this order:");
            for (idx, name) in names.iter().enumerate() {
                println!("  {:>2}. {}", idx, name);
            }
        }
        None => println!(
            "The model expects {} features (names not stored).",
            FEATURE_COUNT
        ),
    }
    if let Some(trees) = summary.tree_count {
        println!("Trees: {}", trees);
    }
    println!("sha256: {}", summary.fingerprint);

    ExitCode::SUCCESS
}
