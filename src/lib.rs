//! # comparewad
//!
//! Read WAD3 texture archives and compare them entry by entry.
//!
//! A WAD3 archive packs mip-mapped textures, spray decals, plain pictures
//! and fonts behind a directory table. This library decodes every entry
//! into its dimensions, pixel data and palette, and fingerprints the
//! decoded content so two archives can be compared without being thrown
//! off by differences in padding or trailing bytes.
//!
//! ## Features
//!
//! - Decode all four WAD3 entry types
//! - Case-insensitive lookup by entry name
//! - Classify names as added, removed, modified or unchanged between two archives
//! - Strict by default: any malformed record fails the whole load
//!
//! ## Example
//!
//! ```no_run
//! use comparewad::{ArchiveDiff, Change};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reference = comparewad::load("halflife.wad").await?;
//!     let compare = comparewad::load("halflife_new.wad").await?;
//!
//!     let diff = ArchiveDiff::compute(&reference, &compare);
//!     for name in diff.names(Change::Modified) {
//!         println!("{name} changed");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod diff;
pub mod error;
pub mod io;
pub mod report;
pub mod wad;

pub use cli::Cli;
pub use diff::{ArchiveDiff, Change};
pub use error::{Result, WadError};
pub use io::{LocalFileReader, MemoryReader, ReadAt};
pub use wad::{DecodedEntry, EntryKind, EntryType, Fingerprint, LoadOptions, Wad3Archive, load, load_with};
