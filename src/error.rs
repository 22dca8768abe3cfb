use thiserror::Error;

/// Errors produced while reading a WAD3 archive.
#[derive(Debug, Error)]
pub enum WadError {
    /// The bytes are not a well-formed WAD3 archive (bad magic, or a read
    /// that runs past the available data).
    #[error("{0}")]
    Format(String),

    /// A directory record carries a type tag none of the payload decoders handle.
    #[error("invalid entry file type: 0x{0:02x}")]
    UnsupportedType(i8),

    /// A lookup asked for a name the archive does not contain.
    #[error("entry not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WadError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        WadError::Format(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WadError>;
