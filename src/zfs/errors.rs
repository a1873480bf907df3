use crate::{parsers::stderr::{self, Failure},
            properties::PropertyError,
            runner::CommandOutput};
use std::io;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// `zfs` not found in the PATH.
        CmdNotFound {
            display("zfs command not found")
        }
        Io(err: std::io::Error) {
            cause(err)
            display("failed to run zfs: {}", err)
        }
        InvalidName(err: ValidationError) {
            cause(err)
            from()
            display("invalid dataset name: {}", err)
        }
        InvalidProperty(err: PropertyError) {
            cause(err)
            from()
            display("invalid property: {}", err)
        }
        InvalidCreateOptions(reason: String) {
            display("invalid create options: {}", reason)
        }
        DatasetNotFound(dataset: String) {
            display("dataset '{}' does not exist", dataset)
        }
        PoolNotFound(pool: String) {
            display("pool '{}' does not exist", pool)
        }
        /// Non-zero exit that doesn't mean anything more specific.
        CommandFailed(code: Option<i32>, stderr: String) {
            display("zfs failed (exit code {:?}): {}", code, stderr)
        }
    }
}

impl From<io::Error> for Error {
    #[allow(clippy::wildcard_enum_match_arm)]
    fn from(err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::NotFound => Error::CmdNotFound,
            _ => Error::Io(err),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CmdNotFound => ErrorKind::CmdNotFound,
            Error::Io(_) => ErrorKind::Io,
            Error::InvalidName(_) => ErrorKind::InvalidName,
            Error::InvalidProperty(_) => ErrorKind::InvalidProperty,
            Error::InvalidCreateOptions(_) => ErrorKind::InvalidCreateOptions,
            Error::DatasetNotFound(_) => ErrorKind::DatasetNotFound,
            Error::PoolNotFound(_) => ErrorKind::PoolNotFound,
            Error::CommandFailed(..) => ErrorKind::CommandFailed,
        }
    }

    /// Either dataset or the pool it lives in is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::DatasetNotFound | ErrorKind::PoolNotFound)
    }

    /// Turn a failed invocation into an error.
    pub(crate) fn from_output(out: &CommandOutput) -> Self {
        let stderr = stderr::clean_up(&out.stderr);
        match stderr::classify(&stderr) {
            Failure::DatasetNotFound(name) => Error::DatasetNotFound(name),
            Failure::PoolNotFound(name) => Error::PoolNotFound(name),
            Failure::Other => Error::CommandFailed(out.code, stderr),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    CmdNotFound,
    Io,
    InvalidName,
    InvalidProperty,
    InvalidCreateOptions,
    DatasetNotFound,
    PoolNotFound,
    CommandFailed,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool { self.kind() == other.kind() }
}

quick_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ValidationError {
        Empty {
            display("name is empty")
        }
        MissingName(name: String) {
            display("'{}' doesn't end with a name", name)
        }
        MissingPool(name: String) {
            display("'{}' doesn't start with a pool", name)
        }
        NameTooLong(name: String) {
            display("last component of '{}' is too long", name)
        }
    }
}

pub type ValidationResult<T = (), E = ValidationError> = std::result::Result<T, E>;
