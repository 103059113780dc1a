// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Interfaces to the host wiki.
//!
//! Page and revision storage, rendering caches and the user directory all
//! live in the host wiki. The signature engine consumes them through these
//! narrow traits and never writes to any of them.

use crate::{
    error::Error,
    types::{PageId, RevisionId, UserId},
};
use std::collections::HashSet;

/// Content payload of a revision, as far as signing is concerned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RevisionContent {
    /// Plain text, hashable.
    Text(String),

    /// Some other content model (binary upload, structured data, ...)
    /// which has no textual representation to hash.
    Opaque,
}

/// Read access to the host wiki's page table.
pub trait PageStore: Send + Sync {
    /// The current (latest) revision id of a page, or None if the page
    /// does not exist or has been deleted.
    fn current_revision_id(&self, page_id: PageId) -> Result<Option<RevisionId>, Error>;

    /// Drop any cached rendering of the page, so the next view reflects
    /// the new signature state.
    fn purge_render_cache(&self, page_id: PageId) -> Result<(), Error>;
}

/// Read access to the host wiki's revision storage.
pub trait RevisionStore: Send + Sync {
    /// The content of a revision, or None if the revision does not exist.
    fn revision_content(&self, revision_id: RevisionId) -> Result<Option<RevisionContent>, Error>;
}

/// Read access to the host wiki's user directory.
pub trait IdentityDirectory: Send + Sync {
    /// The canonical user name of an actor.
    fn name_of(&self, user_id: UserId) -> Result<String, Error>;

    /// The current group memberships of an actor.
    fn groups_of(&self, user_id: UserId) -> Result<HashSet<String>, Error>;
}
