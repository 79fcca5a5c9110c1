//! Errors reported at the tool boundary.
//!
//! The compiler core has no failure paths (code points a font cannot
//! render are excluded, not reported); everything that can actually fail
//! lives here, at the file and FreeType boundary, and terminates the run
//! without writing partial output.

/// An error that terminates a conversion run.
#[derive(Debug)]
pub enum Error {
    /// A font file could not be read or the output could not be written.
    Io(std::io::Error),
    /// FreeType rejected a font face or size request.
    Font(freetype::Error),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<freetype::Error> for Error {
    fn from(error: freetype::Error) -> Self {
        Error::Font(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(error) => write!(f, "i/o failed: {error}"),
            Error::Font(error) => write!(f, "freetype failed: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::Font(error) => Some(error),
        }
    }
}
