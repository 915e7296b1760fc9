use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sprite2h::config::{Config, default_config_path};
use sprite2h::{PipelineKind, Rgb, run_batch};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Converts `Name_<frame>.png` animation frames using the animation mapping
    Mapped(RunArgs),
    /// Converts every PNG, naming the header after the file
    Generic(RunArgs),
    /// Writes the default config file
    InitConfig {
        /// Where to write it. Defaults to the per-user config location
        path: Option<PathBuf>,
        /// Overwrites an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Folder with the source PNGs
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Folder the headers are written to
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Transparency key as 6 hex digits, e.g. ff00ff
    #[arg(long)]
    key_color: Option<Rgb>,
    /// Pixels with alpha below this become the key color
    #[arg(long)]
    alpha_threshold: Option<u8>,
    /// Extension of the generated headers
    #[arg(long)]
    extension: Option<String>,
}

impl RunArgs {
    fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(key_color) = self.key_color {
            config.key_color = key_color;
        }
        if let Some(alpha_threshold) = self.alpha_threshold {
            config.alpha_threshold = alpha_threshold;
        }
        if let Some(extension) = self.extension {
            config.header_extension = extension;
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("A critical error occurred: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (kind, args) = match cli.command {
        Commands::Mapped(args) => (PipelineKind::Mapped, args),
        Commands::Generic(args) => (PipelineKind::Generic, args),
        Commands::InitConfig { path, force } => {
            return init_config(path.or(cli.config), force);
        }
    };

    let mut config = Config::load(cli.config.as_deref())?;
    args.apply(&mut config);

    run_batch(kind, &config, |msg| println!("{}", msg))?;
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path
        .or_else(default_config_path)
        .ok_or_else(|| anyhow!("Could not determine the config directory"))?;

    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }

    Config::default().save_to_file(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
