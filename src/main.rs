// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! vizgallery: bilingual chart image gallery
//!
//! Serves a directory of chart images sorted into categories by file name,
//! and offers the same catalog and routing from the command line.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use vizgallery::classifier::{classify_stem, file_stem, normalize_name};
use vizgallery::config::AppConfig;
use vizgallery::i18n::Language;
use vizgallery::Gallery;

/// vizgallery CLI - chart image gallery
#[derive(Parser, Debug)]
#[command(name = "vizgallery")]
#[command(version)]
#[command(about = "Bilingual gallery of chart images, categorized by file name", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the gallery over HTTP
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Images directory (overrides config)
        #[arg(long)]
        images: Option<PathBuf>,

        /// Script overrides directory (overrides config)
        #[arg(long)]
        scripts: Option<PathBuf>,
    },

    /// List the catalog: every image with its category
    Scan {
        /// Images directory (overrides config)
        #[arg(long)]
        images: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show the category each file name would land in
    Classify {
        /// File names or paths
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the page descriptor for a path as JSON
    Route {
        /// Navigation path, e.g. /category/bar
        path: String,

        /// Display language (zh or en)
        #[arg(short, long, default_value = "zh")]
        lang: Language,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Initialize a new gallery directory
    Init {
        /// Directory to initialize (default: current)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    match cli.command {
        Some(Commands::Serve { host, port, images, scripts }) => {
            let config = apply_overrides(config, host, port, images, scripts);
            run_serve(config).await
        }
        Some(Commands::Scan { images, format }) => {
            let config = apply_overrides(config, None, None, images, None);
            run_scan(&config, &format)
        }
        Some(Commands::Classify { names }) => run_classify(&config, &names),
        Some(Commands::Route { path, lang }) => run_route(&config, &path, lang),
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        Some(Commands::Init { dir, force }) => run_init(dir, force),
        None => run_serve(config).await,
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    images: Option<PathBuf>,
    scripts: Option<PathBuf>,
) -> AppConfig {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    if let Some(images) = images {
        config.gallery.images_dir = images.to_string_lossy().to_string();
    }
    if let Some(scripts) = scripts {
        config.gallery.scripts_dir = scripts.to_string_lossy().to_string();
    }
    config
}

fn load_gallery(config: &AppConfig) -> anyhow::Result<Gallery> {
    Gallery::load(config)
        .with_context(|| format!("Failed to load gallery from {:?}", config.gallery.images_dir))
}

/// Build the catalog and serve it until the process is stopped
async fn run_serve(config: AppConfig) -> anyhow::Result<()> {
    let gallery = load_gallery(&config)?;
    for (key, count) in gallery.catalog().counts(gallery.categories()) {
        info!("  {}: {} images", key, count);
    }

    vizgallery::web::start_server(config, gallery)
        .await
        .context("Web server failed")
}

fn run_scan(config: &AppConfig, format: &str) -> anyhow::Result<()> {
    let gallery = load_gallery(config)?;
    let catalog = gallery.catalog();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        return Ok(());
    }

    for entry in catalog.entries() {
        println!("{:<10} {}", entry.category, entry.image.path.display());
    }
    println!("\nFound {} images", catalog.len());
    for (key, count) in catalog.counts(gallery.categories()) {
        println!("  {:<10} {}", key, count);
    }

    Ok(())
}

fn run_classify(config: &AppConfig, names: &[String]) -> anyhow::Result<()> {
    let categories = config.category_set()?;
    for name in names {
        let stem = file_stem(Path::new(name));
        let category = classify_stem(&categories, &stem);
        println!("{}\t{}\t({})", name, category.key, normalize_name(&stem));
    }
    Ok(())
}

fn run_route(config: &AppConfig, path: &str, lang: Language) -> anyhow::Result<()> {
    let gallery = load_gallery(config)?;
    let page = gallery
        .interpret(path, lang)
        .with_context(|| format!("Failed to interpret {:?}", path))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

/// Run config commands
fn run_config_command(
    config: AppConfig,
    action: ConfigCommands,
    config_path: &Path,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default()
                .save(&output)
                .with_context(|| format!("Failed to write {:?}", output))?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Images: {}", config.gallery.images_dir);
            println!("  Scripts: {}", config.gallery.scripts_dir);
            let keys: Vec<&str> = config.categories.iter().map(|c| c.key.as_str()).collect();
            println!("  Categories: {}", keys.join(", "));
        }
    }

    Ok(())
}

/// Initialize a new gallery directory
fn run_init(dir: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let target = dir.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target.join("config.json");

    if config_path.exists() && !force {
        bail!("{:?} already exists. Use --force to overwrite", config_path);
    }

    let mut config = AppConfig::default();
    let images_dir = target.join(&config.gallery.images_dir);
    let scripts_dir = target.join(&config.gallery.scripts_dir);
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("Failed to create {:?}", images_dir))?;
    std::fs::create_dir_all(&scripts_dir)
        .with_context(|| format!("Failed to create {:?}", scripts_dir))?;

    config.gallery.images_dir = images_dir.to_string_lossy().to_string();
    config.gallery.scripts_dir = scripts_dir.to_string_lossy().to_string();
    config.save(&config_path)?;

    println!("vizgallery initialized in {:?}", target);
    println!("\nCreated:");
    println!("  - config.json");
    println!("  - {}", images_dir.display());
    println!("  - {}", scripts_dir.display());
    println!("\nNext steps:");
    println!("  1. Drop chart images into the images directory");
    println!("  2. Start the gallery: vizgallery serve");

    Ok(())
}
