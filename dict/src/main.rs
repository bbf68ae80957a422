//! `suburb-dict`: load suburb data, dump it, and answer lookups with cost
//! counters.
//!
//! Usage:
//!   `suburb-dict data.csv dump.txt queries.txt`
//!   `suburb-dict data.csv dump.txt < queries.txt`

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use suburb_dict::{CounterMode, Config, KeyField, Paths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "suburb-dict")]
#[command(
    author,
    version,
    about = "Suburb dictionary on a Patricia trie with lookup cost counters"
)]
struct Cli {
    /// CSV file of suburb records; the first row is a header
    data: PathBuf,

    /// File the in-order record dump is written to
    output: PathBuf,

    /// File of query keys, one per line (reads stdin when omitted)
    queries: Option<PathBuf>,

    /// Record field used as the dictionary key
    #[arg(short, long, value_enum, default_value_t = KeyFieldArg::Suburb, env = "SUBURB_DICT_KEY_FIELD")]
    key_field: KeyFieldArg,

    /// Reset the comparison counters before every query
    #[arg(long, env = "SUBURB_DICT_ISOLATED")]
    isolated: bool,

    /// Search for every loaded key before answering queries
    #[arg(long)]
    verify: bool,
}

/// CLI key field option
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeyFieldArg {
    Suburb,
    State,
    Lga,
}

impl From<KeyFieldArg> for KeyField {
    fn from(k: KeyFieldArg) -> Self {
        match k {
            KeyFieldArg::Suburb => KeyField::Suburb,
            KeyFieldArg::State => KeyField::State,
            KeyFieldArg::Lga => KeyField::Lga,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Reports go to stdout, so logs go to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        key_field: cli.key_field.into(),
        counter_mode: if cli.isolated {
            CounterMode::Isolated
        } else {
            CounterMode::Cumulative
        },
        verify: cli.verify,
    };
    let paths = Paths {
        data: cli.data,
        output: cli.output,
        queries: cli.queries,
    };

    suburb_dict::run(&config, &paths, io::stdout().lock())?;
    Ok(())
}
