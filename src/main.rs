mod extract;
mod fetch;
mod output;

use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

const ITEMS_FILE: &str = "mhfu_items.json";
const MAPS_FILE: &str = "mhfu_resource_maps.json";
const SKILLS_FILE: &str = "skills.json";
const DECORATIONS_FILE: &str = "cleaned_output.json";

#[derive(Parser)]
#[command(name = "mhfu_extract", about = "MHFU game-reference data extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract item tables from an HTML page or URL
    Items {
        /// Path to an HTML file, or an http(s) URL
        source: String,
    },
    /// Extract resource-map tables from an HTML page or URL
    Maps {
        /// Path to an HTML file, or an http(s) URL
        source: String,
    },
    /// Extract skill tables from an HTML page or URL
    Skills {
        /// Path to an HTML file, or an http(s) URL
        source: String,
    },
    /// Resolve decoration skill groups from the hand-maintained JSON
    Decorations {
        /// Path to the decoration JSON file
        #[arg(default_value = "decoration.json")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Items { source } => {
            let html = fetch::load_document(&source).await?;
            let items = extract::items::extract(&html);
            output::write_json(ITEMS_FILE, &items)?;
            println!("Exported {} items -> {}", items.len(), ITEMS_FILE);
        }
        Commands::Maps { source } => {
            let html = fetch::load_document(&source).await?;
            let maps = extract::maps::extract(&html);
            output::write_json(MAPS_FILE, &maps)?;
            println!("Exported {} maps -> {}", maps.len(), MAPS_FILE);
        }
        Commands::Skills { source } => {
            let html = fetch::load_document(&source).await?;
            let skills = extract::skills::extract(&html);
            output::write_json(SKILLS_FILE, &skills)?;
            println!("Exported {} skills -> {}", skills.len(), SKILLS_FILE);
        }
        Commands::Decorations { input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input))?;
            let file: extract::decorations::DecorationFile = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", input))?;
            let cleaned = extract::decorations::resolve(file)?;
            output::write_json(DECORATIONS_FILE, &cleaned)?;
            println!(
                "Exported {} decorations -> {}",
                cleaned.decorations.len(),
                DECORATIONS_FILE
            );
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
