//! Main entry point for the comparewad CLI application.
//!
//! Compares two WAD3 archives and prints which entries were added,
//! removed or modified, or lists the entries of a single archive.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use tracing::{Level, debug};

use comparewad::report::{OutputStyle, render_listing, render_report};
use comparewad::{ArchiveDiff, Cli, LoadOptions, LocalFileReader, ReadAt, Wad3Archive};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let style = OutputStyle::new(cli.use_color());

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli, &style).await {
        eprintln!("{}", style.error(&format!("{err:#}")));
        std::process::exit(1);
    }
}

/// Run the requested mode.
///
/// - List mode (`-l`): Display the entries of the reference archive
/// - Compare mode: Diff the reference archive against the compared one
///
/// # Arguments
///
/// * `cli` - Parsed command-line arguments
/// * `style` - Output style derived from `--color`
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if a file cannot be read or decoded.
async fn run(cli: &Cli, style: &OutputStyle) -> Result<()> {
    let options = LoadOptions {
        lenient: cli.lenient,
    };

    // List mode: show the reference archive and exit
    if cli.list {
        let data = read_source(&cli.reference).await?;
        let archive = decode(&cli.reference, &data, &options)?;
        print!("{}", render_listing(&archive));
        return Ok(());
    }

    let compare_path = cli
        .compare
        .as_deref()
        .context("missing path for WAD to compare against")?;

    // Both files are read fully before anything is decoded
    let (left, right) = tokio::try_join!(
        read_source(&cli.reference),
        read_source(compare_path)
    )?;

    if left == right {
        println!("{}", style.success("The files are identical"));
        return Ok(());
    }

    let reference = decode(&cli.reference, &left, &options)?;
    let compare = decode(compare_path, &right, &options)?;
    let diff = ArchiveDiff::compute(&reference, &compare);
    debug!(names = diff.len(), changed = diff.has_changes(), "compared archives");

    let labels = (display_name(&cli.reference), display_name(compare_path));
    print!(
        "{}",
        render_report(
            &diff,
            &reference,
            &compare,
            (labels.0.as_str(), labels.1.as_str()),
            style,
        )
    );

    Ok(())
}

/// Read a whole archive file into memory.
///
/// # Arguments
///
/// * `path` - Path of the WAD file
///
/// # Returns
///
/// The file's bytes, or an error naming the path if it is missing or unreadable.
async fn read_source(path: &Path) -> Result<Vec<u8>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        bail!("{} was not found", path.display());
    }

    let reader = LocalFileReader::new(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let data = reader
        .read_all()
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(data)
}

/// Decode archive bytes, attaching the source path to any error.
///
/// # Arguments
///
/// * `path` - Path the bytes were read from, used only for error context
/// * `data` - Complete archive content
/// * `options` - Strict or lenient decoding
///
/// # Returns
///
/// The decoded archive.
fn decode(path: &Path, data: &[u8], options: &LoadOptions) -> Result<Wad3Archive> {
    Wad3Archive::parse_with(data, options).with_context(|| format!("{}", path.display()))
}

/// Column label for an archive: its file name, or the full path if it has none.
///
/// # Arguments
///
/// * `path` - Path given on the command line
///
/// # Returns
///
/// The label shown in the report header.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
