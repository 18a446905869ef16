use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;

/// Which of the two input tables an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Catalog,
    Vendor,
}

#[derive(Debug)]
pub enum LoadError {
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    Io(io::Error),
    UnknownEncoding(String),
    Decode { encoding: &'static str },
    MissingColumn { column: &'static str },
}

#[derive(Debug)]
pub enum ReportError {
    Io(io::Error),
    Csv(csv::Error),
}

#[derive(Debug)]
pub enum JobError {
    Load { side: Side, source: LoadError },
    Report(ReportError),
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Catalog => write!(f, "catalog"),
            Side::Vendor => write!(f, "vendor"),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Sqlite(err) => write!(f, "error reading from SQLite database: {}", err),
            LoadError::Csv(err) => write!(f, "error reading CSV file: {}", err),
            LoadError::Io(err) => write!(f, "unable to read input: {}", err),
            LoadError::UnknownEncoding(label) => write!(f, "unknown text encoding {:?}", label),
            LoadError::Decode { encoding } => {
                write!(f, "input is not valid {} text", encoding)
            }
            LoadError::MissingColumn { column } => {
                write!(f, "required column {:?} is not present", column)
            }
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Io(err) => write!(f, "failed to write report: {}", err),
            ReportError::Csv(err) => write!(f, "failed to serialize report record: {}", err),
        }
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Load { side, source } => write!(f, "failed to load {} table: {}", side, source),
            JobError::Report(err) => write!(f, "{}", err),
        }
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Sqlite(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Csv(err)
    }
}

impl From<ReportError> for JobError {
    fn from(err: ReportError) -> Self {
        JobError::Report(err)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Sqlite(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Error for ReportError {}

impl Error for JobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JobError::Load { source, .. } => Some(source),
            JobError::Report(err) => Some(err),
        }
    }
}
