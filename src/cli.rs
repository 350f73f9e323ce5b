//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for storedesk using the `clap` crate.
//! Every command reads a JSON dump of an API response from disk and runs one
//! transform over it.
//!
//! # Commands
//!
//! - **tree**: Build the category tree from a flat category list
//! - **list**: Search, filter, sort and page a list of records
//! - **tags**: Suggest SEO tags for a product title and category
//! - **export**: Export orders as CSV or a spreadsheet-friendly CSV
//! - **config**: Show the active configuration or its path
//!
//! # Examples
//!
//! ```
//! use storedesk::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from([
//!     "storedesk", "list", "orders.json", "--kind", "orders", "--sort", "date_asc",
//! ]);
//! assert!(matches!(cli.command, Commands::List(_)));
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::listing::{ListQuery, SortKey};

/// Record type held by a list file
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Customers,
    Blogs,
    Orders,
    Products,
    Coupons,
    /// Untyped JSON objects
    Entities,
}

impl RecordKind {
    /// Key the API uses for the item array of this kind
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Blogs => "blogs",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Coupons => "coupons",
            Self::Entities => "entities",
        }
    }

    /// Fields shown per row when none are requested
    #[must_use]
    pub const fn display_fields(self) -> &'static [&'static str] {
        match self {
            Self::Customers => &["name", "email", "status"],
            Self::Blogs => &["title", "category", "status"],
            Self::Orders => &["customer", "total", "status", "created_at"],
            Self::Products => &["name", "category", "price", "stock"],
            Self::Coupons => &["code", "discount", "status"],
            Self::Entities => &["name", "title"],
        }
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the active configuration as TOML
    Show,

    /// Print the path of the default config file
    Path,
}

/// Arguments of the list command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// JSON file with the records (bare array or API response)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Record type held by the file
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: RecordKind,

    /// Free-text search (case-insensitive substring)
    #[arg(short = 's', long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Exact field filter (can specify multiple: -f status=active -f country=India)
    #[arg(short = 'f', long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Sort key: date_desc, date_asc, name_asc, email_asc, title_asc
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<String>,

    /// Field searched by --query (defaults depend on the record kind)
    #[arg(long = "search-in", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Field shown per row (defaults depend on the record kind)
    #[arg(long = "show", value_name = "FIELD")]
    pub show_fields: Vec<String>,

    /// 1-based page number
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: usize,

    /// Page size (overrides config)
    #[arg(short = 'l', long = "limit")]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Build the list query from the arguments
    ///
    /// An unknown sort key falls back to newest first.
    ///
    /// # Errors
    /// Returns an error message if a filter is not of the form `FIELD=VALUE`.
    pub fn to_query(&self) -> Result<ListQuery, String> {
        let mut query = ListQuery::new()
            .with_sort(self.sort.as_deref().map_or_else(SortKey::default, SortKey::parse_lenient));

        if let Some(text) = &self.query {
            query = query.with_query(text.as_str());
        }

        for filter in &self.filters {
            let (field, value) = ListQuery::parse_filter(filter)?;
            query = query.with_filter(field, value);
        }

        Ok(query)
    }
}

/// Arguments of the tags command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TagArgs {
    /// Product or blog title
    #[arg(short = 't', long = "title", conflicts_with = "from")]
    pub title: Option<String>,

    /// Category name
    #[arg(short = 'c', long = "category", conflicts_with = "from")]
    pub category: Option<String>,

    /// Tag already on the draft (can specify multiple)
    #[arg(short = 'e', long = "existing", value_name = "TAG", conflicts_with = "from")]
    pub existing: Vec<String>,

    /// Read title, category and existing tags from a JSON draft
    #[arg(long = "from", value_name = "FILE")]
    pub from: Option<PathBuf>,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "storedesk")]
#[command(about = "Back-office data tools for store admins", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build and print the category tree
    #[command(visible_alias = "t")]
    Tree {
        /// JSON file with the flat category list
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Search, filter, sort and page records
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Suggest SEO tags
    Tags(TagArgs),

    /// Export orders to a file
    #[command(visible_alias = "x")]
    Export {
        /// JSON file with the orders
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (overrides config)
        #[arg(long = "format", value_enum)]
        format: Option<ExportFormat>,

        /// Output directory (overrides config)
        #[arg(short = 'o', long = "out", value_name = "DIR")]
        out: Option<PathBuf>,

        /// Filename stem
        #[arg(short = 'n', long = "name", default_value = "orders")]
        name: String,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
