use clap::Parser;

use jobhuntr_core::errors::{CoreError, FailureKind};
use jobhuntr_db::error::DatabaseError;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("jobhuntr error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = context::load_config(&flags)?;
    init_tracing(&flags, &config.general.log_level)?;

    let ctx = context::AppContext::init(&config).await?;
    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(flags: &cli::GlobalFlags, configured: &str) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JOBHUNTR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// 2 validation, 3 not found, 4 consistency, 1 anything else.
fn exit_code(error: &anyhow::Error) -> i32 {
    let kind = error
        .downcast_ref::<DatabaseError>()
        .map(DatabaseError::kind)
        .or_else(|| error.downcast_ref::<CoreError>().map(CoreError::kind));

    match kind {
        Some(FailureKind::Validation) => 2,
        Some(FailureKind::NotFound) => 3,
        Some(FailureKind::Consistency) => 4,
        Some(FailureKind::Internal) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_kind() {
        let validation = anyhow::Error::from(DatabaseError::from(CoreError::validation("x")));
        let missing = anyhow::Error::from(CoreError::not_found("opportunity", "opp-1"));
        let drift = anyhow::Error::from(DatabaseError::from(CoreError::consistency("x")));
        let other = anyhow::anyhow!("boom");

        assert_eq!(exit_code(&validation), 2);
        assert_eq!(exit_code(&missing), 3);
        assert_eq!(exit_code(&drift), 4);
        assert_eq!(exit_code(&other), 1);
    }

    #[test]
    fn exit_code_survives_context() {
        use anyhow::Context;
        let err: anyhow::Result<()> = Err(DatabaseError::from(CoreError::validation("x")))
            .context("while attaching");
        assert_eq!(exit_code(&err.unwrap_err()), 2);
    }
}
