//! WAD3 archive reader.
//!
//! ## Loading
//!
//! An archive is always decoded from a complete in-memory buffer:
//! 1. Validate the 12-byte header (magic first)
//! 2. Decode every 32-byte record of the directory table
//! 3. Slice each record's payload and hand it to the decoder for its type tag
//!
//! Any error aborts the whole load. The one exception is
//! [`LoadOptions::lenient`], which skips records whose type tag has no
//! decoder instead of failing.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, WadError};
use crate::io::{LocalFileReader, ReadAt};

use super::payload::{DecodedEntry, decoder_for};
use super::structures::{ArchiveHeader, DirectoryRecord};

/// Options controlling how strictly an archive is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip records with unknown type tags rather than failing the load.
    pub lenient: bool,
}

/// A decoded WAD3 archive.
///
/// Entries are keyed by their lowercased name. When two records share a
/// name, the later one wins.
#[derive(Debug, Clone)]
pub struct Wad3Archive {
    header: ArchiveHeader,
    directory: Vec<DirectoryRecord>,
    entries: HashMap<String, DecodedEntry>,
}

impl Wad3Archive {
    /// Decode an archive from its complete byte content.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &LoadOptions::default())
    }

    pub fn parse_with(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let header = ArchiveHeader::from_bytes(data)?;
        let table = &data[header.directory_range(data.len())?];

        let directory = table
            .chunks_exact(DirectoryRecord::SIZE)
            .map(DirectoryRecord::from_bytes)
            .collect::<Result<Vec<_>>>()?;

        let mut entries = HashMap::with_capacity(directory.len());
        for record in &directory {
            let Some(decode) = decoder_for(record.type_tag) else {
                if options.lenient {
                    warn!(
                        name = %record.name,
                        type_tag = record.type_tag,
                        "skipping entry with unsupported type"
                    );
                    continue;
                }
                return Err(WadError::UnsupportedType(record.type_tag));
            };

            let payload = &data[record.payload_range(data.len())?];
            let entry = decode(record, payload)?;
            debug!(
                name = %entry.name,
                kind = entry.entry_type().label(),
                width = entry.width,
                height = entry.height,
                disk_size = entry.disk_size,
                "decoded entry"
            );

            entries.insert(entry.name.to_lowercase(), entry);
        }

        info!(
            records = directory.len(),
            entries = entries.len(),
            bytes = data.len(),
            "loaded WAD3 archive"
        );

        Ok(Self {
            header,
            directory,
            entries,
        })
    }

    /// Read the whole source, then decode it.
    pub async fn load<R: ReadAt + ?Sized>(reader: &R, options: &LoadOptions) -> Result<Self> {
        let data = reader.read_all().await?;
        Self::parse_with(&data, options)
    }

    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Directory records in table order, including any skipped in lenient mode.
    pub fn directory(&self) -> &[DirectoryRecord] {
        &self.directory
    }

    pub fn entries(&self) -> &HashMap<String, DecodedEntry> {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn get(&self, name: &str) -> Result<&DecodedEntry> {
        self.entries
            .get(&name.to_lowercase())
            .ok_or_else(|| WadError::NotFound(name.to_string()))
    }

    /// Lowercased names of all entries.
    pub fn names(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Entries sorted by lowercased name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedEntry)> {
        let mut sorted: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        sorted.sort_unstable_by_key(|&(name, _)| name);
        sorted.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load and decode a WAD3 archive from a local path.
pub async fn load(path: impl AsRef<Path>) -> Result<Wad3Archive> {
    load_with(path, &LoadOptions::default()).await
}

pub async fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Wad3Archive> {
    let reader = LocalFileReader::new(path.as_ref())?;
    Wad3Archive::load(&reader, options).await
}
