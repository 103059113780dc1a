// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Signature engine error data type.

use crate::{
    db::TransactionRetriableError,
    types::{PageId, RevisionId},
};
use diesel_migrations::RunMigrationsError;
use displaydoc::Display;

/// Signature engine error data type.
#[derive(Debug, Display)]
pub enum Error {
    /// Page not found: {0}
    PageNotFound(PageId),

    /// Revision {0} is no longer current (current revision is {1})
    StaleRevision(RevisionId, RevisionId),

    /// Not authorized
    NotAuthorized,

    /// Revision not found: {0}
    RevisionNotFound(RevisionId),

    /// Revision {0} has no textual content to hash
    UnsupportedContent(RevisionId),

    /// Not found
    NotFound,

    /// Already exists: {0}
    AlreadyExists(String),

    /// Host wiki: {0}
    HostWiki(String),

    /// Diesel: {0}
    Diesel(diesel::result::Error),

    /// Diesel migrations: {0}
    DieselMigrations(RunMigrationsError),

    /// R2d2 pool: {0}
    R2d2Pool(diesel::r2d2::PoolError),
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            err => Self::Diesel(err),
        }
    }
}

impl From<RunMigrationsError> for Error {
    fn from(err: RunMigrationsError) -> Self {
        Self::DieselMigrations(err)
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::R2d2Pool(err)
    }
}

impl TransactionRetriableError for Error {
    fn should_retry(&self) -> bool {
        match self {
            Self::Diesel(diesel::result::Error::DatabaseError(_, info)) => {
                let msg = info.message();
                msg.contains("database is locked") || msg.contains("database table is locked")
            }
            Self::R2d2Pool(_) => true,
            _ => false,
        }
    }
}
