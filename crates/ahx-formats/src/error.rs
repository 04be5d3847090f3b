//! Error type for format parsing and writing.

/// Error type for song, preset and WAV handling.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// Invalid file header or magic bytes
    #[error("invalid file header")]
    InvalidHeader,

    /// Unsupported format version or revision
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    /// Unexpected end of file
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// Instrument number out of range (1-based)
    #[error("no instrument {0} in song")]
    InvalidInstrument(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary layout error: {0}")]
    Binary(#[from] binrw::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
