// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Signature database.

#[cfg(test)]
pub mod test_utils;

mod conn;
mod models;
mod transaction;

/// Db schema (made public for anyone wanting to do custom queries).
pub mod schema;

pub use self::{
    conn::{Conn, ConnectionOptions},
    models::SignatureRecord,
    transaction::{transaction, TransactionRetriableError},
};

use crate::{
    hasher::ContentDigest,
    logger::{log, Logger},
    types::{PageId, RevisionId, UserId},
    Error,
};
use diesel::{
    r2d2::{ConnectionManager, Pool},
    SqliteConnection,
};
use std::time::Duration;

embed_migrations!("migrations/");

no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::Integer,
    "Represents the SQLite last_insert_rowid() function"
);

/// The authoritative table of signature records.
///
/// Owns invalidation and insertion, and guarantees that at most one valid
/// signature exists per page: the invalidate-then-insert pair of
/// [SignatureDb::add_signature] runs inside a single SQLite transaction,
/// and a partial unique index on `(page_id) WHERE is_valid` backs the
/// invariant up at the storage layer.
#[derive(Clone)]
pub struct SignatureDb {
    pool: Pool<ConnectionManager<SqliteConnection>>,
    logger: Logger,
}

impl SignatureDb {
    /// Instantiate a new database using an existing connection pool.
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>, logger: Logger) -> Self {
        Self { pool, logger }
    }

    /// Instantiate a new database from a path that points at a database
    /// file, running any pending schema migrations.
    pub fn new_from_path(
        db_file_path: &str,
        db_connections: u32,
        logger: Logger,
    ) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_file_path);
        let pool = Pool::builder()
            .max_size(db_connections)
            .connection_customizer(Box::new(ConnectionOptions {
                enable_wal: true,
                busy_timeout: Some(Duration::from_secs(30)),
            }))
            .test_on_check_out(true)
            .build(manager)?;

        let conn = pool.get()?;
        embedded_migrations::run_with_output(&conn, &mut std::io::stdout())?;

        Ok(Self::new(pool, logger))
    }

    /// Get a connection from the pool.
    pub fn get_conn(&self) -> Result<Conn, Error> {
        Ok(self.pool.get()?)
    }

    /// The unique valid signature matching both the page and the revision,
    /// if one exists. Read-only.
    pub fn get_valid_signature(
        &self,
        page_id: PageId,
        revision_id: RevisionId,
    ) -> Result<Option<SignatureRecord>, Error> {
        let conn = self.get_conn()?;
        let signature = SignatureRecord::get_valid(&conn, page_id, revision_id)?;
        log::debug!(
            self.logger,
            "Valid signature lookup for page {} revision {}: {}",
            page_id,
            revision_id,
            if signature.is_some() { "found" } else { "none" },
        );
        Ok(signature)
    }

    /// Invalidate every currently-valid signature of a page, returning the
    /// number of affected rows. Zero affected rows is a normal outcome, it
    /// means the page had no signature to invalidate.
    pub fn invalidate_all_valid(&self, page_id: PageId) -> Result<usize, Error> {
        let conn = self.get_conn()?;
        let num_rows = SignatureRecord::invalidate_all_for_page(&conn, page_id)?;
        log::info!(
            self.logger,
            "Invalidated {} signature(s) for page {}",
            num_rows,
            page_id
        );
        Ok(num_rows)
    }

    /// Atomically invalidate any prior signatures of a page and insert a
    /// fresh valid record for it.
    ///
    /// Both steps run under one transaction, so no reader ever observes
    /// two simultaneously-valid records for the same page, and a failed
    /// insert rolls the invalidation back.
    pub fn add_signature(
        &self,
        page_id: PageId,
        revision_id: RevisionId,
        signer_id: UserId,
        content_hash: &ContentDigest,
        remarks: Option<&str>,
    ) -> Result<SignatureRecord, Error> {
        let conn = self.get_conn()?;
        transaction(&conn, |conn| {
            let invalidated = SignatureRecord::invalidate_all_for_page(conn, page_id)?;
            log::debug!(
                self.logger,
                "Invalidation before insert affected {} row(s) for page {}",
                invalidated,
                page_id
            );

            let mut record =
                SignatureRecord::new(page_id, revision_id, signer_id, content_hash, remarks);
            record.insert(conn)?;

            log::info!(
                self.logger,
                "Added signature for page {} revision {} by user {}",
                page_id,
                revision_id,
                signer_id
            );
            Ok(record)
        })
    }

    /// The full signing history of a page, oldest first. Invalidated
    /// records are retained indefinitely for audit; there is no deletion
    /// path.
    pub fn signature_history(&self, page_id: PageId) -> Result<Vec<SignatureRecord>, Error> {
        let conn = self.get_conn()?;
        SignatureRecord::history_for_page(&conn, page_id)
    }
}
