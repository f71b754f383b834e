//! Command dispatch for the `enrolment_cli` binary.

use std::{env, fs, path::Path};

use tracing::info;

use crate::cli::interaction::DialoguerInteraction;
use crate::cli::output;
use crate::cli::session::{print_step_errors, run_session, SessionResult};
use crate::config::{Config, ConfigManager};
use crate::errors::{EnrolmentError, Result};
use crate::form::{check_step, Document, FormStore, Step, StepOutcome, Wizard};
use crate::submission::HttpTransport;

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let mut args = args.iter().map(String::as_str);
    match args.next() {
        None | Some("fill") => fill(),
        Some("template") => template(),
        Some("validate") => {
            let path = args.next().ok_or_else(|| missing_argument("validate <file>"))?;
            validate(Path::new(path))
        }
        Some("submit") => {
            let path = args.next().ok_or_else(|| missing_argument("submit <file>"))?;
            submit(Path::new(path))
        }
        Some("config") => match (args.next(), args.next()) {
            (None | Some("show"), _) => show_config(),
            (Some("set-endpoint"), Some(url)) => set_endpoint(url),
            (Some("set-endpoint"), None) => Err(missing_argument("config set-endpoint <url>")),
            (Some(other), _) => Err(EnrolmentError::InvalidInput(format!(
                "unknown config command `{other}`"
            ))),
        },
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(EnrolmentError::InvalidInput(format!("unknown command `{other}`")))
        }
    }
}

fn missing_argument(usage: &str) -> EnrolmentError {
    EnrolmentError::InvalidInput(format!("usage: enrolment_cli {usage}"))
}

fn print_usage() {
    println!("Usage: enrolment_cli <command>");
    println!();
    println!("Commands:");
    println!("  fill                      Fill in the enrolment form interactively");
    println!("  template                  Print a blank enrolment document as JSON");
    println!("  validate <file>           Check a JSON enrolment document step by step");
    println!("  submit <file>             Validate and submit a JSON enrolment document");
    println!("  config [show]             Show the configured endpoint");
    println!("  config set-endpoint <url> Store a new submission endpoint");
}

fn transport() -> Result<HttpTransport> {
    let config = ConfigManager::new()?.load()?;
    let transport = HttpTransport::new(config.resolved_endpoint())?;
    info!(endpoint = %transport.endpoint(), "using submission endpoint");
    Ok(transport)
}

fn load_document(path: &Path) -> Result<Document> {
    let data = fs::read_to_string(path)?;
    Document::from_json(&data)
}

fn fill() -> Result<()> {
    let mut wizard = Wizard::new(FormStore::new(), transport()?);
    let mut interaction = DialoguerInteraction::new();
    match run_session(&mut wizard, &mut interaction) {
        SessionResult::Submitted(_) => Ok(()),
        SessionResult::Cancelled => {
            output::info("Enrolment cancelled. Nothing was submitted.");
            Ok(())
        }
        SessionResult::Failed(message) => Err(EnrolmentError::InvalidInput(message)),
    }
}

fn template() -> Result<()> {
    println!("{}", Document::default().to_json_pretty()?);
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let mut store = FormStore::with_document(load_document(path)?);
    let mut blocked = 0;
    for step in Step::ALL {
        match check_step(&mut store, step) {
            Ok(()) => output::success(step.title()),
            Err(message) => {
                blocked += 1;
                output::warning(format!("{}: {}", step.title(), message));
                print_step_errors(&store, step);
            }
        }
    }

    if blocked == 0 {
        output::success("Document is ready to submit.");
        Ok(())
    } else {
        Err(EnrolmentError::InvalidInput(format!(
            "{blocked} step(s) failed validation"
        )))
    }
}

fn submit(path: &Path) -> Result<()> {
    let store = FormStore::with_document(load_document(path)?);
    let mut wizard = Wizard::new(store, transport()?);
    loop {
        let step = wizard.step();
        match wizard.next() {
            StepOutcome::Advanced(_) => continue,
            StepOutcome::Blocked(message) => {
                output::warning(format!("{}: {}", step.title(), message));
                print_step_errors(wizard.store(), step);
                return Err(EnrolmentError::InvalidInput(message));
            }
            StepOutcome::Submitted(body) => {
                output::success("Student enrollment submitted successfully!");
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }
            StepOutcome::SubmitFailed(message) => {
                return Err(EnrolmentError::InvalidInput(message));
            }
        }
    }
}

fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    output::section("Configuration");
    output::detail(format!("file: {}", manager.path().display()));
    output::detail(format!("endpoint: {}", config.endpoint));
    let resolved = config.resolved_endpoint();
    if resolved != config.endpoint {
        output::detail(format!("effective endpoint: {resolved}"));
    }
    Ok(())
}

fn set_endpoint(url: &str) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = Config {
        endpoint: url.trim().to_string(),
    };
    manager.save(&config)?;
    output::success(format!("Endpoint set to {}", config.endpoint));
    Ok(())
}
