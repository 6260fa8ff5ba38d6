mod convert;
mod error;
mod organize;
mod report;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use convert::render::Template;
use settings::Settings;

#[derive(Parser)]
#[command(name = "mdpages", about = "Markdown articles to HTML pages, plus a dated file organizer")]
struct Cli {
    /// Settings file (default: mdpages.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert, print the report date, then organize (each step independent)
    Run,
    /// Convert every markdown article into an HTML page
    Convert {
        #[arg(long)]
        md_folder: Option<PathBuf>,
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show what the extractor finds in one markdown file
    Extract {
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the modification date of a file
    Date {
        /// Defaults to the configured report file
        file: Option<PathBuf>,
    },
    /// Copy files into YYYY/MM-Month folders with an hour prefix
    Organize {
        #[arg(short, long)]
        source: Option<PathBuf>,
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    info!(settings = ?settings, "Starting mdpages");

    match cli.command {
        Commands::Run => {
            let outcome = run_steps(&settings);
            if let Err(e) = &outcome.convert {
                error!(error = %e, "Conversion pass failed");
            }
            if let Err(e) = &outcome.date {
                error!(error = %e, "Date report failed");
            }
            if let Err(e) = &outcome.organize {
                error!(error = %e, "Error organizing files");
            }
        }
        Commands::Convert {
            md_folder,
            template,
            output,
        } => {
            if let Some(p) = md_folder {
                settings.md_folder = p;
            }
            if let Some(p) = template {
                settings.template_path = p;
            }
            if let Some(p) = output {
                settings.output_folder = p;
            }
            if let Err(e) = convert_step(&settings) {
                error!(error = %e, "Conversion pass failed");
            }
        }
        Commands::Extract { file, json } => {
            let doc = convert::extract::extract(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                for h in &doc.headlines {
                    println!("{:>2} | {}", h.level, h.content);
                }
                println!("Text:  {}", doc.text);
                println!("Image: {}", doc.image);
            }
        }
        Commands::Date { file } => {
            let file = file.unwrap_or_else(|| settings.report_file.clone());
            if let Err(e) = date_step(&file) {
                error!(error = %e, "Date report failed");
            }
        }
        Commands::Organize { source, dest } => {
            if let Some(p) = source {
                settings.organizer_source = p;
            }
            if let Some(p) = dest {
                settings.organizer_destination = p;
            }
            if let Err(e) = organize_step(&settings) {
                error!(error = %e, "Error organizing files");
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

/// Result of each step of a full run.
struct RunOutcome {
    convert: error::Result<()>,
    date: error::Result<()>,
    organize: error::Result<()>,
}

/// Every step is attempted, whatever happened to the ones before it.
fn run_steps(settings: &Settings) -> RunOutcome {
    let convert = convert_step(settings);
    let date = date_step(&settings.report_file);
    let organize = organize_step(settings);
    RunOutcome {
        convert,
        date,
        organize,
    }
}

fn convert_step(settings: &Settings) -> error::Result<()> {
    let template = Template::load(&settings.template_path)?
        .with_image_placeholder(settings.image_placeholder.clone());
    let stats = convert::convert_folder(&settings.md_folder, &template, &settings.output_folder)?;
    println!(
        "Converted {} articles into {} ({} failed).",
        stats.converted,
        settings.output_folder.display(),
        stats.failed
    );
    Ok(())
}

fn date_step(file: &Path) -> error::Result<()> {
    let date = report::file_date(file)?;
    println!("File creation date: {}", date);
    Ok(())
}

fn organize_step(settings: &Settings) -> error::Result<()> {
    let copied = organize::organize(&settings.organizer_source, &settings.organizer_destination)?;
    println!(
        "Organized {} files into {}.",
        copied,
        settings.organizer_destination.display()
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
