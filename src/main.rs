use anyhow::Context;
use arcseek::config;
use arcseek::events::SeekBarEvent;
use arcseek::script;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcseek", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file and print its path
    Init,
    /// Print the seek bar as configured
    Show,
    /// Replay a gesture script and print every event it produced
    Replay {
        /// TOML file with [[samples]] entries
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Show => {
            let engine = config::load_or_default(cli.config.as_deref()).build_engine();
            print!("{}", engine.frame());
            Ok(())
        }
        Commands::Replay { script } => replay(cli.config, script),
    }
}

fn replay(config_path: Option<PathBuf>, script_path: PathBuf) -> anyhow::Result<()> {
    let mut engine = config::load_config(config_path.as_deref())?.build_engine();
    let script = script::load_script(&script_path)
        .with_context(|| format!("Could not read gesture script {}", script_path.display()))?;

    let outcomes = script::replay(&mut engine, &script)?;
    log::info!("Replayed {} samples", outcomes.len());

    for (sample, outcome) in script.samples.iter().zip(&outcomes) {
        let consumed = if outcome.consumed { "" } else { " (not consumed)" };
        println!("{}{}", sample.action, consumed);
        for event in &outcome.events {
            println!("  {}", describe(event));
        }
    }
    print!("{}", engine.frame());
    Ok(())
}

fn describe(event: &SeekBarEvent) -> String {
    match *event {
        SeekBarEvent::StartTracking { pointer } => format!("start tracking pointer {}", pointer),
        SeekBarEvent::ProgressChanged {
            pointer,
            progress,
            relative,
            from_user,
        } => format!(
            "pointer {} -> {} (+{}){}",
            pointer,
            progress,
            relative,
            if from_user { "" } else { " [programmatic]" }
        ),
        SeekBarEvent::StopTracking { pointer } => format!("stop tracking pointer {}", pointer),
    }
}
