//! The suburb dictionary: records indexed by one of their text fields.

use std::io::{Read, Write};

use csv::StringRecord;
use patricia_dict::{Counters, PatriciaTrie};
use tracing::{debug, info, warn};

use crate::error::{DictError, Result};
use crate::record::{KeyField, Suburb};

/// What happened while loading a data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read, excluding the header.
    pub rows: usize,
    /// Rows whose key field was empty.
    pub skipped: usize,
    /// Rows that replaced an earlier record with the same key.
    pub replaced: usize,
}

/// Suburb records keyed by a chosen field.
#[derive(Debug, Clone)]
pub struct SuburbIndex {
    trie: PatriciaTrie<Suburb>,
    key_field: KeyField,
}

impl SuburbIndex {
    /// Create an empty index keyed by `key_field`.
    pub fn new(key_field: KeyField) -> Self {
        Self {
            trie: PatriciaTrie::new(),
            key_field,
        }
    }

    /// Build an index from CSV data whose first row is a header.
    ///
    /// The key column is indexed byte for byte. Text fields of the stored
    /// record that are not valid UTF-8 are decoded lossily.
    pub fn load<R: Read>(reader: R, key_field: KeyField) -> Result<(Self, LoadStats)> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut index = Self::new(key_field);
        let mut stats = LoadStats::default();
        for (i, row) in csv.byte_records().enumerate() {
            let row = row?;
            let key = row.get(key_field.column()).unwrap_or_default().to_vec();
            let suburb: Suburb = StringRecord::from_byte_record_lossy(row).deserialize(None)?;
            stats.rows += 1;

            if key.is_empty() {
                warn!(row = i + 1, "skipping record with an empty key");
                stats.skipped += 1;
                continue;
            }
            if index.insert_key(&key, suburb, i + 1)?.is_some() {
                stats.replaced += 1;
            }
        }

        info!(
            rows = stats.rows,
            keys = index.len(),
            skipped = stats.skipped,
            replaced = stats.replaced,
            "loaded suburb data"
        );
        Ok((index, stats))
    }

    /// Index `suburb`, returning the record it replaced. `row` is only used
    /// for error reporting.
    pub fn insert(&mut self, suburb: Suburb, row: usize) -> Result<Option<Suburb>> {
        let key = self.key_field.of(&suburb).to_owned();
        self.insert_key(key.as_bytes(), suburb, row)
    }

    /// Index `suburb` under the raw `key`, returning the record it replaced.
    pub fn insert_key(&mut self, key: &[u8], suburb: Suburb, row: usize) -> Result<Option<Suburb>> {
        let replaced = self.trie.insert(key, suburb).map_err(|source| DictError::Key {
            key: String::from_utf8_lossy(key).into_owned(),
            row,
            source,
        })?;
        if replaced.is_some() {
            debug!(row, "record replaced an earlier one with the same key");
        }
        Ok(replaced)
    }

    /// Look `key` up, adding the cost of the search to `counters`.
    ///
    /// Keys the trie could never hold (such as ones containing NUL) are
    /// reported as misses.
    pub fn lookup(&self, key: impl AsRef<[u8]>, counters: &mut Counters) -> Option<&Suburb> {
        match self.trie.search(key.as_ref(), counters) {
            Ok(found) => found,
            Err(err) => {
                warn!(%err, "query cannot match any key");
                None
            }
        }
    }

    /// Write every record in trie order, one block per record.
    pub fn export<W: Write>(&self, mut out: W) -> Result<()> {
        let mut result: std::io::Result<()> = Ok(());
        self.trie.traverse(|_, suburb| {
            if result.is_ok() {
                result = writeln!(out, "{suburb}");
            }
        });
        result?;
        out.flush()?;
        Ok(())
    }

    /// Search for every stored key and count how many are found, returning
    /// the count and the total cost.
    pub fn verify(&self) -> (usize, Counters) {
        let mut counters = Counters::new();
        let found = self
            .trie
            .iter()
            .filter(|(key, _)| matches!(self.trie.search(key, &mut counters), Ok(Some(_))))
            .count();
        info!(found, keys = self.len(), %counters, "verified index");
        (found, counters)
    }

    /// Field the index is keyed by.
    pub fn key_field(&self) -> KeyField {
        self.key_field
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}
