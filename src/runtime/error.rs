//! Errors surfaced by generated mappers.

use std::fmt;

#[derive(Debug)]
pub enum MapperError {
    Database(diesel::result::Error),
    Pool(r2d2::Error),
    MissingPrimaryKey(&'static str),
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperError::Database(e) => write!(f, "Database error: {}", e),
            MapperError::Pool(e) => write!(f, "Database pool error: {}", e),
            MapperError::MissingPrimaryKey(table) => {
                write!(f, "Record for table {} has no primary key value", table)
            }
        }
    }
}

impl std::error::Error for MapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapperError::Database(e) => Some(e),
            MapperError::Pool(e) => Some(e),
            MapperError::MissingPrimaryKey(_) => None,
        }
    }
}

impl From<diesel::result::Error> for MapperError {
    fn from(e: diesel::result::Error) -> Self {
        MapperError::Database(e)
    }
}

impl From<r2d2::Error> for MapperError {
    fn from(e: r2d2::Error) -> Self {
        MapperError::Pool(e)
    }
}
