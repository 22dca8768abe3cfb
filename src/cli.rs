use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "comparewad")]
#[command(version)]
#[command(about = "Compare the entries of two WAD3 archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  comparewad halflife.wad halflife_new.wad   show added, removed and modified entries\n  \
  comparewad -l decals.wad                   list the entries of decals.wad")]
pub struct Cli {
    /// Path to the WAD file to compare against
    #[arg(value_name = "REFERENCE_WAD")]
    pub reference: PathBuf,

    /// Path to the WAD file to compare with
    #[arg(value_name = "COMPARE_WAD", required_unless_present = "list")]
    pub compare: Option<PathBuf>,

    /// List the entries of REFERENCE_WAD instead of comparing
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Skip entries with unsupported types instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Diagnostic logging level (written to stderr)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl Cli {
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        }
    }
}
