//! Interactive line shell over one in-memory catalog
//!
//! Each line is split shell-style and parsed with clap, so quoting works
//! for names with spaces: `add-category "Nail Care" --parent cat1`.

use crate::commands::{self, Context};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{BufRead, Write};
use svctree_core::{CategoryId, ServiceId, UNCATEGORIZED};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
    /// Add a category
    #[command(alias = "ac")]
    AddCategory {
        /// Category name
        name: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Parent category ID (root category when omitted)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Add a service
    #[command(alias = "as")]
    AddService {
        /// Service name
        name: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Category ID (repeatable)
        #[arg(short = 'c', long = "category")]
        categories: Vec<String>,
    },

    /// Replace a service's categories (no -c leaves it uncategorized)
    Assign {
        /// Service ID
        service: String,

        /// Category ID (repeatable)
        #[arg(short = 'c', long = "category")]
        categories: Vec<String>,
    },

    /// Show the category tree
    Tree {
        #[arg(long)]
        root: Option<String>,
    },

    /// List child categories
    Children { id: Option<String> },

    /// List every category as an outline
    Categories,

    /// List services
    Services {
        #[arg(short, long, conflicts_with = "uncategorized")]
        category: Option<String>,

        #[arg(short, long)]
        uncategorized: bool,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(ctx: &mut Context, input: impl BufRead) -> Result<()> {
    println!(
        "{} Type {} for commands, {} to leave",
        "svctree".bold(),
        "help".cyan(),
        "quit".cyan()
    );
    prompt()?;

    for line in input.lines() {
        let line = line?;
        if execute(ctx, &line)? == Flow::Quit {
            return Ok(());
        }
        prompt()?;
    }

    println!();
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn execute(ctx: &mut Context, line: &str) -> Result<Flow> {
    let args = match split_args(line) {
        Ok(args) if args.is_empty() => return Ok(Flow::Continue),
        Ok(args) => args,
        Err(msg) => {
            println!("{} {}", "!".yellow(), msg);
            return Ok(Flow::Continue);
        }
    };

    let command = match ShellLine::try_parse_from(args) {
        Ok(parsed) => parsed.command,
        Err(err) => {
            // also covers `help`, which clap reports as an "error"
            err.print()?;
            return Ok(Flow::Continue);
        }
    };

    // a failed command should not end the session
    match dispatch(ctx, command) {
        Ok(flow) => Ok(flow),
        Err(err) => {
            println!("{} {}", "!".yellow(), err);
            Ok(Flow::Continue)
        }
    }
}

fn dispatch(ctx: &mut Context, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::AddCategory {
            name,
            description,
            parent,
        } => {
            if parent.as_deref() == Some(UNCATEGORIZED) {
                println!(
                    "{} Categories cannot be added under {}",
                    "!".yellow(),
                    UNCATEGORIZED
                );
                return Ok(Flow::Continue);
            }
            let parent = parent.map(|id| commands::category_arg(ctx, &id));
            match ctx.catalog.add_category(&name, &description, parent) {
                Some(category) if ctx.json => println!("{}", serde_json::to_string(&category)?),
                Some(category) => println!(
                    "{} Created category: {}",
                    "✓".green(),
                    commands::format_category(&category)
                ),
                None => println!("{} Nothing added: name is blank", "!".yellow()),
            }
        }
        ShellCommand::AddService {
            name,
            description,
            categories,
        } => {
            let categories = category_args(ctx, &categories);
            match ctx.catalog.add_service(&name, &description, categories) {
                Some(service) if ctx.json => println!("{}", serde_json::to_string(&service)?),
                Some(service) => println!(
                    "{} Created service: {}",
                    "✓".green(),
                    commands::format_service(&service)
                ),
                None => println!("{} Nothing added: name is blank", "!".yellow()),
            }
        }
        ShellCommand::Assign {
            service,
            categories,
        } => {
            let id = ServiceId::from(service);
            let categories = category_args(ctx, &categories);
            if ctx.catalog.replace_categories(&id, categories) {
                match ctx.catalog.service(&id) {
                    Some(updated) if ctx.json => println!("{}", serde_json::to_string(updated)?),
                    _ => println!("{} Updated categories of {}", "✓".green(), id),
                }
            } else {
                println!("{} No service {}", "!".yellow(), id);
            }
        }
        ShellCommand::Tree { root } => commands::tree(ctx, root.as_deref())?,
        ShellCommand::Children { id } => commands::children(ctx, id.as_deref())?,
        ShellCommand::Categories => commands::categories(ctx)?,
        ShellCommand::Services {
            category,
            uncategorized,
        } => commands::services(ctx, category.as_deref(), uncategorized)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn category_args(ctx: &Context, ids: &[String]) -> Vec<CategoryId> {
    ids.iter().map(|id| commands::category_arg(ctx, id)).collect()
}

/// Split a line into words, honoring single and double quotes
///
/// Backslash escapes the next character except inside single quotes.
fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => return Err("Trailing backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svctree_core::Config;

    fn context() -> Context {
        let mut config = Config::default();
        config.display.colors = false;
        Context::new(config, false)
    }

    fn parse(line: &str) -> ShellCommand {
        ShellLine::try_parse_from(split_args(line).unwrap())
            .unwrap()
            .command
    }

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args(r#"add-category "Nail Care" -d 'Hands & feet'"#).unwrap(),
            ["add-category", "Nail Care", "-d", "Hands & feet"]
        );
        assert_eq!(split_args("  tree   ").unwrap(), ["tree"]);
        assert_eq!(split_args(r"a\ b").unwrap(), ["a b"]);
        assert_eq!(split_args(r#"x "" y"#).unwrap(), ["x", "", "y"]);
        assert!(split_args("").unwrap().is_empty());
    }

    #[test]
    fn test_split_args_errors() {
        assert!(split_args(r#"add-service "Manicure"#).is_err());
        assert!(split_args("tree \\").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("add-service Manicure -c cat1 --category cat2"),
            ShellCommand::AddService {
                name: "Manicure".into(),
                description: String::new(),
                categories: vec!["cat1".into(), "cat2".into()],
            }
        );
        assert_eq!(
            parse("ac Nails --parent cat1"),
            ShellCommand::AddCategory {
                name: "Nails".into(),
                description: String::new(),
                parent: Some("cat1".into()),
            }
        );
        assert_eq!(parse("exit"), ShellCommand::Quit);
    }

    #[test]
    fn test_session_edits_catalog() {
        let mut ctx = context();

        execute(&mut ctx, "add-category Nails --parent cat1").unwrap();
        let nails = ctx
            .catalog
            .children_of(Some(&"cat1".into()))
            .pop()
            .unwrap();
        assert_eq!(nails.name, "Nails");

        execute(&mut ctx, &format!("add-service Manicure -c {}", nails.id)).unwrap();
        let listed = ctx.catalog.services_of(&nails.id);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Manicure");

        execute(&mut ctx, "assign svc1 -c cat3").unwrap();
        let svc1 = ctx.catalog.service(&"svc1".into()).unwrap();
        assert_eq!(svc1.category_ids, vec![CategoryId::from("cat3")]);
    }

    #[test]
    fn test_session_refusals_leave_catalog_unchanged() {
        let mut ctx = context();

        execute(&mut ctx, "add-category Sub --parent uncategorized").unwrap();
        execute(&mut ctx, r#"add-category "   ""#).unwrap();
        execute(&mut ctx, "add-service ''").unwrap();
        execute(&mut ctx, "assign svc-nope -c cat1").unwrap();
        execute(&mut ctx, "no-such-command").unwrap();

        assert_eq!(ctx.catalog.categories().len(), 11);
        assert_eq!(ctx.catalog.services().len(), 16);
    }

    #[test]
    fn test_quit() {
        let mut ctx = context();
        assert_eq!(execute(&mut ctx, "quit").unwrap(), Flow::Quit);
        assert_eq!(execute(&mut ctx, "   ").unwrap(), Flow::Continue);
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut ctx = context();
        let input = "add-service Walk-in\nquit\nadd-service Ignored\n";
        run(&mut ctx, input.as_bytes()).unwrap();

        assert_eq!(ctx.catalog.services().len(), 17);
        assert!(ctx.catalog.services().iter().any(|s| s.name == "Walk-in"));
    }
}
