// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the hash file
#[derive(Debug)]
pub enum Error {
    /// I/O error
    ///
    /// Covers every open, seek, read and write failure, including
    /// short reads caused by a continuation pointer past end-of-file.
    Io(std::io::Error),

    /// The requested bucket layout cannot be represented
    InvalidConfig(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "HashFileError(Io: {e})"),
            Self::InvalidConfig(reason) => write!(f, "HashFileError(InvalidConfig: {reason})"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Hash file result
pub type Result<T> = std::result::Result<T, Error>;
