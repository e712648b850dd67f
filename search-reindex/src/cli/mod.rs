//! Command-line surface.
//!
//! ```text
//! search-reindex index [-all] [-firm] [-person] [-from N] [-to N] [-batch-size N] [-from-date RFC3339]
//! ```
//!
//! Single-dash long flags are accepted for compatibility with existing
//! operator scripts; they are rewritten to their double-dash form before
//! parsing.

use clap::{Args, Parser, Subcommand};
use search_reindex_shared::EntityType;

use crate::errors::ReindexError;
use crate::orchestrator::BatchRequest;

/// Long flags that may be written with a single dash.
const LONG_FLAGS: &[&str] = &[
    "all",
    "firm",
    "person",
    "from",
    "to",
    "batch-size",
    "from-date",
    "help",
];

#[derive(Parser, Debug)]
#[command(name = "search-reindex", version)]
#[command(about = "Reindex firm and person records into the search cluster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index records
    Index(IndexArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IndexArgs {
    /// Index all records for chosen indices
    #[arg(long)]
    pub all: bool,

    /// Index records to the firm index
    #[arg(long)]
    pub firm: bool,

    /// Index records to the person index
    #[arg(long)]
    pub person: bool,

    /// Index an id range starting from (use with --to)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub from: i64,

    /// Index an id range ending before (use with --from)
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub to: i64,

    /// Batch size to read from db
    #[arg(long, default_value_t = 10_000)]
    pub batch_size: usize,

    /// Index records updated from this date (RFC 3339)
    #[arg(long, default_value = "")]
    pub from_date: String,
}

impl IndexArgs {
    /// The entity types explicitly requested; empty means all.
    pub fn requested_entities(&self) -> Vec<EntityType> {
        let mut requested = Vec::new();
        if self.firm {
            requested.push(EntityType::Firm);
        }
        if self.person {
            requested.push(EntityType::Person);
        }
        requested
    }

    /// The batch strategy selected by the flags.
    pub fn batch_request(&self) -> Result<BatchRequest, ReindexError> {
        BatchRequest::from_flags(
            Some(self.from_date.as_str()),
            self.all,
            self.from,
            self.to,
            self.batch_size,
        )
    }
}

impl Cli {
    /// Parse arguments, accepting single-dash long flags.
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Fallible variant of [`Cli::parse_normalized`].
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrite `-flag` and `-flag=value` to `--flag` / `--flag=value` for known
/// long flags. Everything else passes through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
