//! CLI command implementations

use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;
use svctree_core::{Catalog, CatalogTree, Category, CategoryId, Config, Service, TreeItem};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::debug;

/// One session: the catalog plus how to present it
pub struct Context {
    pub catalog: Catalog,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn new(config: Config, json: bool) -> Self {
        if !config.display.colors {
            colored::control::set_override(false);
        }
        let catalog = Catalog::from_config(&config);
        Self {
            catalog,
            config,
            json,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => Config::default_path()?,
    };
    debug!(path = %path.display(), "loading config");
    Ok(Config::load(&path)?)
}

/// Resolve a category argument, warning on stderr when it names nothing.
/// Unknown IDs are still used as given.
pub fn category_arg(ctx: &Context, id: &str) -> CategoryId {
    let id = CategoryId::from(id);
    if ctx.catalog.category(&id).is_none() {
        eprintln!("{} Unknown category {}", "!".yellow(), id);
    }
    id
}

pub fn tree(ctx: &Context, root: Option<&str>) -> Result<()> {
    let root = root.map(|id| category_arg(ctx, id));
    let tree = CatalogTree::build(&ctx.catalog, root.as_ref());

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let outline = tree.outline();
    if outline.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }

    let show_descriptions = ctx.config.display.show_descriptions;
    for entry in outline {
        let pad = " ".repeat(entry.depth * ctx.config.display.indent);
        match entry.item {
            TreeItem::Category(category) => {
                println!("{}{}", pad, format_category(&category));
                if show_descriptions && !category.description.is_empty() {
                    println!("{}  {}", pad, category.description.dimmed());
                }
            }
            TreeItem::Service(service) => {
                println!("{}{}", pad, format_service(&service));
                if show_descriptions && !service.description.is_empty() {
                    println!("{}  {}", pad, service.description.dimmed());
                }
            }
        }
    }

    Ok(())
}

pub fn children(ctx: &Context, id: Option<&str>) -> Result<()> {
    let parent = id.map(|id| category_arg(ctx, id));
    let children = ctx.catalog.children_of(parent.as_ref());

    if ctx.json {
        println!("{}", serde_json::to_string(&children)?);
    } else if children.is_empty() {
        println!("No categories found");
    } else {
        for category in &children {
            println!("{}", format_category(category));
        }
    }

    Ok(())
}

/// Full category outline, the same view a membership picker shows
pub fn categories(ctx: &Context) -> Result<()> {
    let outline = CatalogTree::categories_only(&ctx.catalog, None);

    if ctx.json {
        let categories: Vec<&Category> = outline.iter().map(|(_, c)| c).collect();
        println!("{}", serde_json::to_string(&categories)?);
    } else if outline.is_empty() {
        println!("No categories found");
    } else {
        for (depth, category) in &outline {
            let pad = " ".repeat(depth * ctx.config.display.indent);
            println!("{}{}", pad, format_category(category));
        }
    }

    Ok(())
}

pub fn services(ctx: &Context, category: Option<&str>, uncategorized: bool) -> Result<()> {
    let services: Vec<Service> = if uncategorized {
        ctx.catalog.uncategorized_services()
    } else if let Some(id) = category {
        ctx.catalog.services_of(&category_arg(ctx, id))
    } else {
        ctx.catalog.services().iter().cloned().collect()
    };

    print_services(ctx, &services)
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Categories")]
    categories: String,
}

pub fn print_services(ctx: &Context, services: &[Service]) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string(services)?);
        return Ok(());
    }
    if services.is_empty() {
        println!("No services found");
        return Ok(());
    }

    let rows = services.iter().map(|s| ServiceRow {
        id: s.id.to_string(),
        name: s.name.clone(),
        categories: category_names(&ctx.catalog, s),
    });
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

/// Human-readable membership list, falling back to raw IDs for orphans
fn category_names(catalog: &Catalog, service: &Service) -> String {
    if service.is_unassigned() {
        return "-".to_string();
    }
    service
        .category_ids
        .iter()
        .map(|id| match catalog.category(id) {
            Some(category) => category.name.clone(),
            None => format!("{} (missing)", id),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_category(category: &Category) -> String {
    format!("{} {}", category.name.bold(), category.id.as_str().cyan())
}

pub fn format_service(service: &Service) -> String {
    format!("{} {}", service.name, service.id.as_str().dimmed())
}

/// Write a commented default config file
pub fn config_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::write_default(&path)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}

/// Show the effective configuration
pub fn config_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        println!("{}", "Current configuration:".bold());
        println!();
        println!("seed = {}", config.seed);
        println!("category_prefix = \"{}\"", config.category_prefix);
        println!("service_prefix = \"{}\"", config.service_prefix);
        println!();
        println!("[display]");
        println!("colors = {}", config.display.colors);
        println!("show_descriptions = {}", config.display.show_descriptions);
        println!("indent = {}", config.display.indent);
    }

    Ok(())
}
