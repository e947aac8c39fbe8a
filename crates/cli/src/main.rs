mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use hrlens_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = Config::for_profile(&args.profile);
    if let Some(path) = &args.employees {
        config.data.employee_csv = path.clone();
    }
    if let Some(path) = &args.performance {
        config.data.performance_csv = path.clone();
    }
    if let Some(path) = &args.rules {
        config.rules.rules_path = Some(path.clone());
    }
    config.log_summary();

    if let Command::ValidateRules { path } = &args.command {
        let target = path.as_deref().or(config.rules.rules_path.as_deref());
        return commands::validate_rules(target);
    }

    let engine = commands::load_engine(&config)?;
    match &args.command {
        Command::Demographics(f) => commands::demographics(&engine, f),
        Command::Promotions(f) => commands::promotions(&engine, f),
        Command::Attrition(f) => commands::attrition(&engine, f),
        Command::Train(m) => commands::train(&engine, &config.model, m),
        Command::Predict(p) => commands::predict(&engine, &config.model, p),
        Command::ValidateRules { .. } => Ok(()),
    }
}
