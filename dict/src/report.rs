//! Query answering and its report lines.

use std::fmt;
use std::io::{BufRead, Write};

use patricia_dict::Counters;

use crate::error::Result;
use crate::index::SuburbIndex;
use crate::record::Suburb;

/// How counters are scoped across a sequence of queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterMode {
    /// One set of counters runs across every query.
    #[default]
    Cumulative,
    /// Counters restart at zero for each query.
    Isolated,
}

/// The answer to one query.
#[derive(Debug, Clone, Copy)]
pub struct Outcome<'a> {
    /// The key as queried.
    pub key: &'a [u8],
    /// The matching record, if any.
    pub record: Option<&'a Suburb>,
    /// Counter values after the search.
    pub counters: Counters,
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = String::from_utf8_lossy(self.key);
        match self.record {
            Some(_) => write!(f, "{key} --> 1 record found - {}", self.counters),
            None => write!(f, "{key} --> NOTFOUND"),
        }
    }
}

/// Totals for a run of queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Queries answered.
    pub queries: usize,
    /// Queries that found a record.
    pub found: usize,
}

/// Answer every line of `queries` against `index`, writing one report line
/// per query to `out`. Trailing line terminators are dropped and blank lines
/// are ignored. Lines are keys as raw bytes and need not be UTF-8.
pub fn answer_queries<R, W>(
    index: &SuburbIndex,
    mut queries: R,
    mut out: W,
    mode: CounterMode,
) -> Result<QueryStats>
where
    R: BufRead,
    W: Write,
{
    let mut counters = Counters::new();
    let mut stats = QueryStats::default();

    let mut line = Vec::new();
    loop {
        line.clear();
        if queries.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let key = line.strip_suffix(b"\n").unwrap_or(line.as_slice());
        let key = key.strip_suffix(b"\r").unwrap_or(key);
        if key.is_empty() {
            continue;
        }

        if mode == CounterMode::Isolated {
            counters.reset();
        }
        let record = index.lookup(key, &mut counters);
        stats.queries += 1;
        if record.is_some() {
            stats.found += 1;
        }
        writeln!(
            out,
            "{}",
            Outcome {
                key,
                record,
                counters,
            }
        )?;
    }

    out.flush()?;
    Ok(stats)
}
