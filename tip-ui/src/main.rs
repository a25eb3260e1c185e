use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tip_core::TipCalculator;
use tip_ui::{BellAudioService, CalculatorScreen, UiConfig, commands::USAGE, logging};
use tokio::io::BufReader;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Terminal tip calculator.
///
/// Reads one command per line from stdin and prints the per-person share,
/// total bill and total tip after every change.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet period for bill text, in milliseconds.
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Log filter (e.g. `debug` or `tip_core=trace`). `RUST_LOG` wins.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Sound asset played on reset.
    #[arg(long)]
    sound: Option<PathBuf>,

    /// Currency symbol shown before amounts.
    #[arg(long)]
    currency: Option<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<UiConfig> {
        let mut config = match &self.config {
            Some(path) => UiConfig::load(path)?,
            None => UiConfig::default(),
        };

        if let Some(debounce_ms) = self.debounce_ms {
            config.calculator.debounce_ms = debounce_ms;
        }
        if let Some(level) = self.log_level {
            config.logging.level = Some(level);
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        if let Some(sound) = self.sound {
            config.audio.sound_path = sound;
        }
        if let Some(currency) = self.currency {
            config.display.currency_symbol = currency;
        }
        Ok(config)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    logging::init_default_logging(config.logging.level.as_deref());
    if let Some(file) = &config.logging.file {
        logging::enable_file_logging(file)?;
    }
    debug!(?config, "configuration loaded");

    let audio = Arc::new(BellAudioService::new(config.audio.sound_path.clone()));
    let calculator = TipCalculator::with_config(audio, config.calculator_config());
    let screen = CalculatorScreen::bind(
        &calculator,
        config.display.currency_symbol.clone(),
        std::io::stdout(),
    );

    println!("{USAGE}");
    screen.run(BufReader::new(tokio::io::stdin())).await?;

    info!("bye");
    logging::disable_file_logging();
    Ok(())
}
