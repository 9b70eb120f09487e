//! svctree - Service catalog organized as a category tree
//!
//! Everything lives in memory for the duration of one invocation;
//! use `svctree shell` to edit the catalog interactively.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod shell;

#[derive(Parser)]
#[command(name = "svctree")]
#[command(about = "Service catalog organized as a category tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/svctree/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start without the seed catalog
    #[arg(long, global = true)]
    empty: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the category tree with its services
    Tree {
        /// Start below this category instead of the top level
        #[arg(long)]
        root: Option<String>,
    },

    /// List child categories (root categories when no ID is given)
    Children {
        /// Parent category ID
        id: Option<String>,
    },

    /// List every category as an indented outline
    Categories,

    /// List services
    Services {
        /// Only services in this category
        #[arg(short, long, conflicts_with = "uncategorized")]
        category: Option<String>,

        /// Only services without a category
        #[arg(short, long)]
        uncategorized: bool,
    },

    /// Edit the catalog interactively
    Shell,

    /// Show or create the configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "warn,svctree_core=debug,svctree=debug".to_string()
        } else {
            "warn".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // must work before any config file exists
    if let Commands::Config {
        command: Some(ConfigCommands::Init { force }),
    } = cli.command
    {
        return commands::config_init(cli.config.as_deref(), force);
    }

    let mut config = commands::load_config(cli.config.as_deref())?;
    if cli.empty {
        config.seed = false;
    }
    let mut ctx = commands::Context::new(config, cli.json);

    match cli.command {
        Commands::Tree { root } => commands::tree(&ctx, root.as_deref()),
        Commands::Children { id } => commands::children(&ctx, id.as_deref()),
        Commands::Services {
            category,
            uncategorized,
        } => commands::services(&ctx, category.as_deref(), uncategorized),
        Commands::Shell => shell::run(&mut ctx, std::io::stdin().lock()),
        Commands::Categories => commands::categories(&ctx),
        Commands::Config { .. } => commands::config_show(&ctx),
    }
}
