// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Identifier types shared across the crate.
//!
//! These identify objects owned by the host wiki; the signature engine
//! never allocates them, it only records them.

/// Identifies a page in the host wiki's page store.
pub type PageId = u64;

/// Identifies one immutable revision of a page.
pub type RevisionId = u64;

/// Identifies a user in the host wiki's identity directory.
pub type UserId = u64;
