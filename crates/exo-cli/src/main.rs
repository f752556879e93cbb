// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `exo-triage`: score KOI candidates from JSON on stdin or a file.
//!
//! Results go to stdout as JSON, logs to stderr.
//!
//! ```text
//! exo-triage score --target judge --input candidate.json
//! cat batch.json | exo-triage score --target ensemble --batch
//! exo-triage features
//! exo-triage check --warm-up
//! ```

use clap::{Parser, Subcommand};
use exo_ml::{feature_catalog, Classifier};
use exo_types::config::PipelineConfig;
use exo_types::error::{ExoError, ExoResult};
use exo_types::result::ScoreOutcome;
use exo_types::specialist::Target;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "exo-triage")]
#[command(about = "Hierarchical exoplanet candidate classifier", version)]
struct Cli {
    /// Pipeline configuration JSON; defaults apply when omitted.
    #[arg(long, env = "EXO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Overrides `artifact_dir` from the configuration.
    #[arg(long, env = "EXO_ARTIFACT_DIR", global = true)]
    artifact_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one candidate (or an array of candidates with --batch).
    Score {
        /// fotometria | orbital | estelar | falsos_positivos | ensemble | judge
        #[arg(long, default_value = "judge")]
        target: String,

        /// Candidate JSON file; stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Input is a JSON array scored in parallel.
        #[arg(long)]
        batch: bool,
    },
    /// Print the input contract of every specialist.
    Features,
    /// Report artifact presence and load state.
    Check {
        /// Load every model before reporting.
        #[arg(long)]
        warm_up: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("exo=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            print_json(&error_json(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ExoResult<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.artifact_dir {
        config.artifact_dir = dir;
    }

    match cli.command {
        Command::Features => {
            print_json(&serde_json::to_value(feature_catalog())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { warm_up } => {
            let classifier = Classifier::new(config)?;
            let (report, passed) = check(&classifier, warm_up)?;
            print_json(&report);
            Ok(if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Score {
            target,
            input,
            batch,
        } => {
            let target: Target = target.parse()?;
            let classifier = Classifier::new(config)?;
            let raw = read_input(input.as_ref())?;
            if batch {
                let items = raw.as_array().ok_or_else(|| {
                    ExoError::Structural("--batch expects a JSON array".to_string())
                })?;
                info!(count = items.len(), %target, "scoring batch");
                let results: Vec<Value> = classifier
                    .score_batch(items, target)
                    .into_iter()
                    .map(outcome_json)
                    .collect();
                print_json(&Value::Array(results));
                Ok(ExitCode::SUCCESS)
            } else {
                let outcome = classifier.score(&raw, target)?;
                print_json(&serde_json::to_value(outcome)?);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Health report plus pass/fail. Missing artifacts always fail; with
/// `warm_up` any component that did not load fails too.
fn check(classifier: &Classifier, warm_up: bool) -> ExoResult<(Value, bool)> {
    let warm_up_error = if warm_up {
        classifier.warm_up().err()
    } else {
        None
    };
    let health = classifier.health();
    let mut report = serde_json::to_value(&health)?;
    if let Some(e) = &warm_up_error {
        error!("warm-up failed: {e}");
        report["warm_up_error"] = error_json(e);
    }
    let passed = health.missing_artifacts.is_empty()
        && !(warm_up && (warm_up_error.is_some() || !health.ready));
    Ok((report, passed))
}

fn read_input(path: Option<&PathBuf>) -> ExoResult<Value> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&text)
        .map_err(|e| ExoError::Structural(format!("input is not valid JSON: {e}")))
}

/// One batch entry: the outcome, or the error object in its place.
fn outcome_json(result: ExoResult<ScoreOutcome>) -> Value {
    result
        .and_then(|outcome| serde_json::to_value(outcome).map_err(ExoError::from))
        .unwrap_or_else(|e| error_json(&e))
}

fn error_json(e: &ExoError) -> Value {
    json!({
        "error": e.kind(),
        "message": e.to_string(),
        "issues": e.issues(),
    })
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => error!("failed to encode output: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_types::result::SpecialistResult;
    use exo_types::specialist::Specialist;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn garbage_artifact_dir() -> PathBuf {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("exo_cli_{}_{}", std::process::id(), epoch_ns));
        std::fs::create_dir_all(&dir).unwrap();
        let paths = PipelineConfig::with_artifact_dir(&dir).artifact_paths();
        for path in paths.all() {
            std::fs::write(path, "garbage").unwrap();
        }
        dir
    }

    #[test]
    fn test_unreadable_artifacts_fail_warm_up_check() {
        let dir = garbage_artifact_dir();
        let classifier = Classifier::new(PipelineConfig::with_artifact_dir(&dir)).unwrap();

        let (report, passed) = check(&classifier, true).unwrap();
        assert!(!passed);
        assert_eq!(report["ready"], false);
        assert_eq!(report["missing_artifacts"], serde_json::json!([]));
        assert_eq!(report["warm_up_error"]["error"], "load");

        // Without warm-up only presence is checked.
        let (report, passed) = check(&classifier, false).unwrap();
        assert!(passed);
        assert!(report.get("warm_up_error").is_none());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_batch_entry_encoding() {
        let ok = outcome_json(Ok(ScoreOutcome::Specialist(SpecialistResult::from_score(
            Specialist::Orbital,
            0.75,
        ))));
        assert_eq!(ok["model_name"], "orbital");
        assert_eq!(ok["label"], "CONFIRMED");

        let err = outcome_json(Err(ExoError::Structural("not an object".to_string())));
        assert_eq!(err["error"], "structural");
        assert!(err["message"].as_str().unwrap().contains("not an object"));
    }

    #[test]
    fn test_missing_artifacts_fail_check() {
        let classifier =
            Classifier::new(PipelineConfig::with_artifact_dir("/nonexistent/exo")).unwrap();
        let (report, passed) = check(&classifier, false).unwrap();
        assert!(!passed);
        assert_eq!(report["missing_artifacts"].as_array().unwrap().len(), 7);
    }
}
