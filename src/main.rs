//! Triplecheck CLI - Staged Value Validation
//!
//! This is a demonstration CLI for the triplecheck library. It validates
//! hosted app names with the same three stages a signup form would use:
//! a minimum-length precheck, a charset check, and a simulated remote
//! uniqueness check ("duplicate" is always taken).

use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use triplecheck::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let json = args.iter().any(|a| a == "--json");
    match args[1].as_str() {
        "check" => {
            let Some(name) = args.get(2).filter(|a| !a.starts_with("--")) else {
                eprintln!("Error: Please specify a name to check");
                return Ok(());
            };
            check_once(name, json)?;
        }
        "watch" => watch(json)?,
        "help" | "--help" | "-h" => print_usage(&args[0]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
        }
    }
    Ok(())
}

fn print_usage(program: &str) {
    println!("triplecheck v{} - staged value validation", triplecheck::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  check <name>   Run all three stages to completion for one value");
    println!("  watch          Re-validate each line read from stdin, as a form would");
    println!("  help           Show this help message");
    println!();
    println!("Options:");
    println!("  --json         Print statuses as JSON instead of text");
}

/// The demo check set: precheck for minimum length, check for the allowed
/// charset, async check simulating a remote uniqueness lookup.
fn app_name_checks() -> CheckSet<String> {
    CheckSet::new()
        .with_precheck(|name: &String| {
            (name.len() < 3).then(|| "Name must be at least 3 characters long".to_string())
        })
        .with_check(|name: &String| {
            if name.is_empty() {
                return None;
            }
            if name.contains(' ') {
                return Some("Name may not contain spaces".to_string());
            }
            if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
                return Some("Name must start with a lowercase letter".to_string());
            }
            if name
                .chars()
                .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
            {
                return Some("Name may only contain letters, numbers and dashes".to_string());
            }
            None
        })
        .with_async_check(|name: &String| {
            // Stand-in for an HTTP round trip.
            thread::sleep(Duration::from_millis(250));
            (name == "duplicate").then(|| "Name already exists".to_string())
        })
        .with_throttle(Duration::from_millis(300))
}

fn check_once(name: &str, json: bool) -> anyhow::Result<()> {
    let validator = StagedValidator::new(app_name_checks());
    let verdict = validator.evaluate(&name.to_string());
    if json {
        println!("{}", serde_json::to_string(&verdict)?);
    } else {
        match &verdict {
            Verdict::Pass => println!("✓ {} is available", name),
            Verdict::Fail { message } => println!("✗ {}", message),
        }
    }
    Ok(())
}

fn watch(json: bool) -> anyhow::Result<()> {
    let mut session = ReactiveValidationSession::new(app_name_checks()).with_listener(
        move |status: ValidationStatus| {
            // Fires from the session's worker when the async check settles.
            if json {
                if let Ok(line) = serde_json::to_string(&status) {
                    println!("{}", line);
                }
            } else {
                println!("  async: {}", render(&status));
            }
            prompt();
        },
    );

    if !json {
        println!("Type a name per line (Ctrl-D to quit). \"duplicate\" is always taken.");
    }
    prompt();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let status = session.evaluate(line.trim().to_string());
        if json {
            println!("{}", serde_json::to_string(&status)?);
        } else {
            println!("  {}", render(&status));
        }
        prompt();
    }
    Ok(())
}

fn render(status: &ValidationStatus) -> String {
    match status {
        ValidationStatus::Ready { .. } => "· ready (keep typing)".to_string(),
        ValidationStatus::Waiting => "⏳ waiting for async check".to_string(),
        ValidationStatus::Pass => "✓ pass".to_string(),
        ValidationStatus::Fail { message } => format!("✗ {}", message),
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
