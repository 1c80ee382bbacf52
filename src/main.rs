use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cosmo::content::{Curriculum, outline};
use cosmo::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Width used when printing the outline
const OUTLINE_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "cosmo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run without spoken narration
    #[arg(long)]
    no_narration: bool,

    /// Do not offer the camera
    #[arg(long)]
    no_camera: bool,

    /// Video device to open when the camera is enabled
    #[arg(long, value_name = "PATH")]
    camera_device: Option<PathBuf>,

    /// Speech program to narrate with (espeak-ng, espeak, say, ...)
    #[arg(long, value_name = "PROGRAM")]
    speech_program: Option<String>,

    /// Lesson file to use instead of the built-in satellite lesson
    #[arg(long, value_name = "FILE")]
    curriculum: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lesson steps and quiz questions
    Outline,
    /// Validate a curriculum file
    Check {
        /// Path to the curriculum JSON file
        path: PathBuf,
    },
    /// Print the path of the config file
    ConfigPath,
}

impl Cli {
    /// Apply command line overrides to the loaded config
    fn apply(&self, config: &mut Config) {
        if self.no_narration {
            config.narration.enabled = false;
        }
        if self.no_camera {
            config.camera.enabled = false;
        }
        if let Some(device) = &self.camera_device {
            config.camera.device = device.clone();
        }
        if let Some(program) = &self.speech_program {
            config.narration.program = Some(program.clone());
        }
        if let Some(path) = &self.curriculum {
            config.curriculum = Some(path.clone());
        }
    }
}

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmo=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn load_curriculum(config: &Config) -> Result<Curriculum> {
    match &config.curriculum {
        Some(path) => Curriculum::load(path).context("Failed to load curriculum"),
        None => Ok(Curriculum::satellites()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    match &cli.command {
        Some(Commands::Outline) => {
            let mut config = Config::load()?;
            cli.apply(&mut config);
            let curriculum = load_curriculum(&config)?;
            print!("{}", outline::render(&curriculum, OUTLINE_WIDTH));
        }
        Some(Commands::Check { path }) => {
            let curriculum = Curriculum::load(path)?;
            println!(
                "{}: {} steps, {} questions, {}s",
                path.display(),
                curriculum.step_count(),
                curriculum.question_count(),
                curriculum.total_duration().as_secs()
            );
        }
        Some(Commands::ConfigPath) => {
            println!("{}", Config::config_path()?.display());
        }
        None => {
            // Launch TUI
            let mut config = Config::load()?;
            cli.apply(&mut config);
            let curriculum = load_curriculum(&config)?;
            let mut app = App::new(config, curriculum)?;
            app.run().await?;
        }
    }

    Ok(())
}
