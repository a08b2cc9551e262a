use anyhow::{Context, Result};
use clap::Parser;
use jvdoc_nav::cli::{Cli, Commands};
use jvdoc_nav::{ArrayMatcher, HostData, Matcher, Outcome, Session, WidgetConfig};
use std::path::Path;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    jvdoc_nav::tracing::init();

    let cli = Cli::parse();
    let config = WidgetConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Resolve {
            docs,
            symbol,
            base_dir,
        } => {
            let outcome = jvdoc_nav::resolve(load_host(&docs, base_dir.as_deref())?, &symbol)?;
            Ok(exit_code(report(&outcome)))
        }
        Commands::Suggest { docs, token, limit } => {
            let host = load_host(&docs, None)?;
            let (index, _) = host.into_parts()?;
            let matcher = ArrayMatcher::new(index.suggestions());
            for row in matcher.matches(&token, limit.unwrap_or(config.max_suggestions)) {
                let path = index.resolve(&row).unwrap_or_default();
                println!("{}\t{}", row, path);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Session { docs, base_dir } => {
            let mut session = Session::new(load_host(&docs, base_dir.as_deref())?, config)?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut unresolved = 0usize;
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                let outcome = session.submit(&line)?;
                if !report(&outcome) {
                    unresolved += 1;
                }
            }
            tracing::info!(
                "Session finished after {} page loads, {} unresolved",
                session.loads(),
                unresolved
            );
            Ok(exit_code(unresolved == 0))
        }
    }
}

fn load_host(docs: &Path, base_dir: Option<&str>) -> Result<HostData> {
    HostData::load(docs, base_dir)
        .with_context(|| format!("Failed to load host data from {}", docs.display()))
}

/// Print an outcome, returning false when the symbol was not found.
fn report(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Navigated(location) => {
            println!("{}", location);
            true
        }
        Outcome::Alerted(message) => {
            println!("{}", message);
            false
        }
        Outcome::Nothing => true,
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
