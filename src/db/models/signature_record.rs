// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Model file for the `signatures` table.

use crate::{
    db::{last_insert_rowid, schema::signatures, Conn},
    hasher::ContentDigest,
    types::{PageId, RevisionId, UserId},
    Error,
};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Diesel model for the `signatures` table.
/// One row per signing event. Rows are never deleted and, apart from the
/// validity flag being flipped off, never mutated: the table is the full
/// audit history of every signature a page ever carried.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Insertable, PartialEq, Queryable, Serialize)]
#[table_name = "signatures"]
pub struct SignatureRecord {
    /// Auto incrementing primary key.
    id: Option<i32>,

    /// The page this signature is for.
    page_id: i64,

    /// The exact revision that was signed.
    revision_id: i64,

    /// The user that signed.
    signer_id: i64,

    /// When the signature was created.
    timestamp: NaiveDateTime,

    /// Hex digest of the revision text at signing time.
    content_hash: String,

    /// Whether this signature is still authoritative. At most one valid
    /// row exists per page; the schema enforces this with a partial
    /// unique index.
    is_valid: bool,

    /// Optional free-text annotation provided by the signer.
    remarks: Option<String>,
}

impl SignatureRecord {
    /// Create a new, not yet persisted, valid signature record.
    pub fn new(
        page_id: PageId,
        revision_id: RevisionId,
        signer_id: UserId,
        content_hash: &ContentDigest,
        remarks: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            page_id: page_id as i64,
            revision_id: revision_id as i64,
            signer_id: signer_id as i64,
            timestamp: Utc::now().naive_utc(),
            content_hash: content_hash.to_string(),
            is_valid: true,
            remarks: remarks.map(|r| r.to_string()),
        }
    }

    /// Get id.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Get page id.
    pub fn page_id(&self) -> PageId {
        self.page_id as PageId
    }

    /// Get revision id.
    pub fn revision_id(&self) -> RevisionId {
        self.revision_id as RevisionId
    }

    /// Get signer id.
    pub fn signer_id(&self) -> UserId {
        self.signer_id as UserId
    }

    /// Get creation time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Get the hex content hash bound to this signature.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Whether this signature is still authoritative.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Get the remarks, if any.
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Insert this record into the database.
    pub fn insert(&mut self, conn: &Conn) -> Result<(), Error> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyExists(format!(
                "SignatureRecord already has an id ({})",
                id
            )));
        }
        diesel::insert_into(signatures::table)
            .values(self.clone())
            .execute(conn)?;

        self.id = Some(diesel::select(last_insert_rowid).get_result::<i32>(conn)?);

        Ok(())
    }

    /// The unique valid record matching both the page and the revision, if
    /// one exists.
    pub fn get_valid(
        conn: &Conn,
        page_id: PageId,
        revision_id: RevisionId,
    ) -> Result<Option<Self>, Error> {
        use super::super::schema::signatures::dsl;
        Ok(dsl::signatures
            .filter(dsl::page_id.eq(page_id as i64))
            .filter(dsl::revision_id.eq(revision_id as i64))
            .filter(dsl::is_valid.eq(true))
            .first::<Self>(conn)
            .optional()?)
    }

    /// Flip every currently-valid record of a page to invalid, returning
    /// the number of affected rows. Zero is a normal outcome.
    pub fn invalidate_all_for_page(conn: &Conn, page_id: PageId) -> Result<usize, Error> {
        use super::super::schema::signatures::dsl;
        Ok(diesel::update(
            dsl::signatures
                .filter(dsl::page_id.eq(page_id as i64))
                .filter(dsl::is_valid.eq(true)),
        )
        .set(dsl::is_valid.eq(false))
        .execute(conn)?)
    }

    /// The full signing history of a page, oldest first.
    pub fn history_for_page(conn: &Conn, page_id: PageId) -> Result<Vec<Self>, Error> {
        use super::super::schema::signatures::dsl;
        Ok(dsl::signatures
            .filter(dsl::page_id.eq(page_id as i64))
            .order(dsl::id.asc())
            .load::<Self>(conn)?)
    }
}
