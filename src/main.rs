//! PriceCalc command line
//!
//! Usage: pricecalc [calculate|sample|normalize|reset] [key=value ...]
//!
//! Starts from the last saved inputs (or the configured defaults), applies
//! `key=value` overrides such as `cogs=120 paymentMode=mix`, prints the
//! price breakdown and saves the inputs.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pricecalc::calculator::{Calculator, CalculatorInputs};
use pricecalc::config::{AppConfig, LoggingConfig};
use pricecalc::persistence::{InputStore, JsonFileStore, MemoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Calculate,
    Sample,
    Normalize,
    Reset,
}

impl Command {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "calculate" | "calc" => Some(Command::Calculate),
            "sample" => Some(Command::Sample),
            "normalize" => Some(Command::Normalize),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }
}

fn init_logging(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);
    info!("💰 PriceCalc {} ({})", env!("CARGO_PKG_VERSION"), config);

    let store: Box<dyn InputStore> = if config.persistence.enabled {
        Box::new(JsonFileStore::new(
            &config.persistence.data_dir,
            &config.persistence.file_name,
        ))
    } else {
        Box::new(MemoryStore::new())
    };
    let calculator = Calculator::new(store, CalculatorInputs::from_config(&config.defaults));

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = args.first().map(|a| Command::from_str(a));
    let command = match parsed {
        Some(Some(command)) => {
            args.remove(0);
            command
        }
        Some(None) if !args[0].contains('=') => bail!("unknown command '{}'", args[0]),
        _ => Command::Calculate,
    };

    let mut inputs = match command {
        Command::Reset => calculator.reset().context("Failed to clear saved inputs")?,
        _ => calculator.load(),
    };
    if command == Command::Sample {
        inputs = inputs.with_sample(&config.sample);
    }
    for arg in &args {
        inputs
            .apply_override(arg)
            .with_context(|| format!("Invalid argument '{}'", arg))?;
    }
    let breakdown = if command == Command::Normalize {
        match calculator.normalize_and_calculate(&inputs) {
            Ok((_, breakdown)) => breakdown,
            Err(e) => {
                warn!("⚠️ {}", e);
                return Ok(());
            }
        }
    } else {
        if let Some(warning) = calculator.share_warning(&inputs) {
            warn!("{}", warning);
        }
        calculator.calculate(&inputs)
    };
    println!("{}", breakdown);

    Ok(())
}
