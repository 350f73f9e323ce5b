//! Storedesk CLI application entry point
//!
//! Runs the back-office transforms over JSON dumps of store API responses.
//!
//! # Usage
//!
//! ```bash
//! # Print the category tree
//! storedesk tree categories.json
//!
//! # Second page of active customers in India, sorted by name
//! storedesk list customers.json -k customers -f status=active -f country=India \
//!     --sort name_asc -p 2
//!
//! # Suggest tags for a product
//! storedesk tags -t "Winter Party Kurta" -c "Ethnic Wear" -e festive
//!
//! # Export orders for a spreadsheet application
//! storedesk export orders.json --format spreadsheet -o exports/
//!
//! # Quiet mode (only output results)
//! storedesk -q tags --from draft.json
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/storedesk/config.toml` on Linux) and created with defaults on
//! first run. Logging is controlled through `RUST_LOG`.

use colored::Colorize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storedesk::{
    StoredeskError,
    catalog::{CategoryRecord, build_forest},
    cli::{Cli, Commands, ConfigCommands, ListArgs, RecordKind, TagArgs},
    config::StoredeskConfig,
    export::{ExportFormat, ExportOptions, export_rows, order_columns},
    listing::ListView,
    output,
    read_json,
    records::{Blog, Coupon, Customer, Entity, KeyAliases, Order, Product, Record, extract_items},
    tags::{Suggestion, TagGenerator},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, StoredeskError>;

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<StoredeskConfig> {
    let config = match path {
        Some(path) => StoredeskConfig::load_from(path)?,
        None => StoredeskConfig::load()?,
    };
    Ok(config)
}

/// Handle the tree command - print the category forest
fn handle_tree_command(file: &Path, quiet: bool) -> Result<()> {
    let body = read_json(file)?;
    let records: Vec<CategoryRecord> = extract_items(&body, "categories");
    let forest = build_forest(&records);

    for line in output::tree_lines(&forest, quiet) {
        println!("{line}");
    }

    if !quiet {
        for warning in output::forest_warnings(&forest) {
            eprintln!("{warning}");
        }
        println!("\n{} categories, {} top level", forest.node_count(), forest.roots.len());
    }

    Ok(())
}

fn list_records<T: Record + DeserializeOwned + KeyAliases>(
    body: &serde_json::Value,
    args: &ListArgs,
    page_size: usize,
    quiet: bool,
) -> Result<()> {
    let items: Vec<T> = extract_items(body, args.kind.key());
    let query = args.to_query().map_err(StoredeskError::InvalidInput)?;

    let search_fields: Vec<&str> = args.search_fields.iter().map(String::as_str).collect();
    let show_fields: Vec<&str> = if args.show_fields.is_empty() {
        args.kind.display_fields().to_vec()
    } else {
        args.show_fields.iter().map(String::as_str).collect()
    };

    let view = ListView::new(&items, query).search_fields(&search_fields);
    let page = view.page(args.page, args.limit.unwrap_or(page_size));

    for record in &page.items {
        println!("{}", output::record_line(*record, &show_fields, quiet));
    }

    if !quiet {
        println!("\n{}", output::page_footer(&page));
    }

    Ok(())
}

/// Handle the list command - search, filter, sort and page records
fn handle_list_command(args: &ListArgs, config: &StoredeskConfig, quiet: bool) -> Result<()> {
    let body = read_json(&args.file)?;
    let page_size = config.page_size();

    match args.kind {
        RecordKind::Customers => list_records::<Customer>(&body, args, page_size, quiet),
        RecordKind::Blogs => list_records::<Blog>(&body, args, page_size, quiet),
        RecordKind::Orders => list_records::<Order>(&body, args, page_size, quiet),
        RecordKind::Products => list_records::<Product>(&body, args, page_size, quiet),
        RecordKind::Coupons => list_records::<Coupon>(&body, args, page_size, quiet),
        RecordKind::Entities => list_records::<Entity>(&body, args, page_size, quiet),
    }
}

/// Handle the tags command - suggest tags from flags or a JSON draft
fn handle_tags_command(args: &TagArgs, config: &StoredeskConfig, quiet: bool) -> Result<()> {
    let generator = TagGenerator::from_settings(&config.tags);

    let suggestion = if let Some(path) = &args.from {
        generator.suggest_for_draft(&read_json(path)?)
    } else {
        let title = args.title.as_deref().unwrap_or_default();
        let category = args.category.as_deref().unwrap_or_default();
        generator.suggest(title, category, &args.existing)
    };

    match suggestion {
        Suggestion::Ready(tags) => {
            for line in output::tag_lines(&tags, quiet) {
                println!("{line}");
            }
        }
        Suggestion::Waiting(reason) => {
            if !quiet {
                println!("{}", output::waiting(reason));
            }
        }
    }

    Ok(())
}

/// Handle the export command - write orders to a timestamped CSV file
fn handle_export_command(
    file: &Path,
    format: Option<ExportFormat>,
    out: Option<&Path>,
    name: &str,
    config: &StoredeskConfig,
    quiet: bool,
) -> Result<()> {
    let body = read_json(file)?;
    let orders: Vec<Order> = extract_items(&body, "orders");

    let options = ExportOptions::new(format.unwrap_or(config.export.format), name);
    let Some(export) = export_rows(&orders, &order_columns(), &options)? else {
        if !quiet {
            println!("{}", "No orders to export".yellow());
        }
        return Ok(());
    };

    let dir = out
        .map(Path::to_path_buf)
        .or_else(|| config.export.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = export.write_to(&dir)?;

    if quiet {
        println!("{}", path.display());
    } else {
        println!(
            "{} {} orders to {} ({})",
            "Exported".green(),
            orders.len(),
            path.display(),
            export.mime
        );
    }

    Ok(())
}

/// Handle config subcommands
fn handle_config_command(
    command: &ConfigCommands,
    config: &StoredeskConfig,
    explicit: Option<&Path>,
) -> Result<()> {
    match command {
        ConfigCommands::Show => print!("{}", config.to_toml()?),
        ConfigCommands::Path => {
            let path =
                explicit.map_or_else(StoredeskConfig::config_path, |p| Ok(p.to_path_buf()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let quiet = cli.quiet || config.quiet;

    match &cli.command {
        Commands::Tree { file } => handle_tree_command(file, quiet),
        Commands::List(args) => handle_list_command(args, &config, quiet),
        Commands::Tags(args) => handle_tags_command(args, &config, quiet),
        Commands::Export {
            file,
            format,
            out,
            name,
        } => handle_export_command(file, *format, out.as_deref(), name, &config, quiet),
        Commands::Config { command } => {
            handle_config_command(command, &config, cli.config.as_deref())
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
