//! # suburb-dict
//!
//! Loads suburb reference data into a Patricia trie keyed by a text field,
//! dumps the stored records, and answers exact-match queries while reporting
//! how many bit, node and key comparisons each answer cost.
//!
//! ```rust
//! use patricia_dict::Counters;
//! use suburb_dict::{KeyField, SuburbIndex};
//!
//! let data = "header\n1,2,Carlton,2021,2,Victoria,3,Melbourne,-37.8,144.97\n";
//! let (index, _) = SuburbIndex::load(data.as_bytes(), KeyField::Suburb).unwrap();
//!
//! let mut counters = Counters::new();
//! assert!(index.lookup("Carlton", &mut counters).is_some());
//! assert!(index.lookup("Brunswick", &mut counters).is_none());
//! ```

pub mod error;
pub mod index;
pub mod record;
pub mod report;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

pub use error::{DictError, Result};
pub use index::{LoadStats, SuburbIndex};
pub use record::{KeyField, Suburb};
pub use report::{answer_queries, CounterMode, Outcome, QueryStats};

/// Settings for a dictionary run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Field records are indexed under.
    pub key_field: KeyField,
    /// Counter scoping across queries.
    pub counter_mode: CounterMode,
    /// Re-search every stored key after loading.
    pub verify: bool,
}

/// Where a run reads from and writes to.
#[derive(Debug, Clone)]
pub struct Paths {
    /// CSV data file.
    pub data: PathBuf,
    /// Destination of the record dump.
    pub output: PathBuf,
    /// Query file; `None` reads standard input.
    pub queries: Option<PathBuf>,
}

/// Load the data, write the dump, then answer queries to `out`.
pub fn run<W: Write>(config: &Config, paths: &Paths, out: W) -> Result<QueryStats> {
    let (index, _) = SuburbIndex::load(BufReader::new(File::open(&paths.data)?), config.key_field)?;

    if config.verify {
        let (found, _) = index.verify();
        if found != index.len() {
            return Err(DictError::Verify {
                found,
                keys: index.len(),
            });
        }
    }

    index.export(BufWriter::new(File::create(&paths.output)?))?;
    info!(path = %paths.output.display(), "wrote record dump");

    let stats = match &paths.queries {
        Some(path) => answer_queries(
            &index,
            BufReader::new(File::open(path)?),
            out,
            config.counter_mode,
        )?,
        None => answer_queries(&index, io::stdin().lock(), out, config.counter_mode)?,
    };
    info!(queries = stats.queries, found = stats.found, "answered queries");
    Ok(stats)
}
