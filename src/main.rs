use clap::{Parser, Subcommand};
use lora_prep::captioner::HttpCaptioner;
use lora_prep::{archive, config, output, pipeline, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lora-prep")]
#[command(about = "Batch captioning and cropping for LoRA training datasets")]
#[command(long_about = "\
Batch captioning and cropping for LoRA training datasets

Point lora-prep at a directory of photographs and it emits a single ZIP
archive of numbered training pairs:

  dataset.zip
  ├── influencer_0001.jpg      # cropped to the target ratio, resized exactly
  ├── influencer_0001.txt      # composed caption (template + trigger word)
  ├── influencer_0002.jpg
  ├── influencer_0002.txt
  └── captions.csv             # dst_name,caption summary in batch order

Captions come from a remote vision model (bearer token in config.toml); a
missing token or a failed call resolves to an empty caption, never an abort.
Inputs that fail to decode are skipped and leave a gap in the numbering.

Run 'lora-prep gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory of photographs
    #[arg(long, default_value = "photos", global = true)]
    source: PathBuf,

    /// Path to config.toml (defaults apply if absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline and write the dataset archive
    Build {
        /// Output archive path
        #[arg(long, default_value = "dataset.zip")]
        archive: PathBuf,
    },
    /// List the inputs a build would process, without processing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn load_config(path: &Option<PathBuf>) -> Result<config::RunConfig, config::ConfigError> {
    match path {
        Some(path) => config::RunConfig::load(path),
        None => {
            let default_path = PathBuf::from("config.toml");
            if default_path.exists() {
                config::RunConfig::load(&default_path)
            } else {
                Ok(config::RunConfig::default())
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { archive: archive_path } => {
            let config = load_config(&cli.config)?;

            println!("==> Scanning {}", cli.source.display());
            let inputs = scan::collect_inputs(&cli.source)?;
            println!("{} images found", inputs.len());

            println!("==> Processing batch");
            let captioner = HttpCaptioner::new(&config.api_token, &config.model);
            let batch = pipeline::run(&inputs, &captioner, &config);

            println!("==> Packaging {}", archive_path.display());
            let bytes = archive::package(&batch)?;
            std::fs::write(&archive_path, &bytes)?;

            output::print_run_output(&batch);
            println!("==> Wrote {}", archive_path.display());
        }
        Command::Check => {
            let config = load_config(&cli.config)?;
            // Resolve the ratio now so a bad string warns at check time too
            let _ = config.ratio();
            println!("==> Checking {}", cli.source.display());
            let inputs = scan::collect_inputs(&cli.source)?;
            output::print_check_output(&inputs);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
