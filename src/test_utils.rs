// Copyright (c) 2018-2022 The MobileCoin Foundation

//! In-memory fakes for the host wiki collaborators.

use crate::{
    error::Error,
    types::{PageId, RevisionId, UserId},
    wiki::{IdentityDirectory, PageStore, RevisionContent, RevisionStore},
};
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

/// An in-memory wiki: pages, revisions and users backed by hash maps.
/// Implements all three collaborator traits so a single instance can be
/// handed to every component under test.
#[derive(Default)]
pub struct MemoryWiki {
    pages: Mutex<HashMap<PageId, RevisionId>>,
    revisions: Mutex<HashMap<RevisionId, RevisionContent>>,
    users: Mutex<HashMap<UserId, (String, HashSet<String>)>>,
    purged_pages: Mutex<Vec<PageId>>,
}

impl MemoryWiki {
    /// Register a page whose current revision holds the given text.
    pub fn add_page(&self, page_id: PageId, revision_id: RevisionId, text: &str) {
        self.pages.lock().unwrap().insert(page_id, revision_id);
        self.revisions
            .lock()
            .unwrap()
            .insert(revision_id, RevisionContent::Text(text.to_string()));
    }

    /// Save a new revision of an existing page, making it current.
    pub fn save_revision(&self, page_id: PageId, revision_id: RevisionId, text: &str) {
        self.add_page(page_id, revision_id, text);
    }

    /// Register a page whose current revision has no textual content.
    pub fn add_opaque_revision(&self, page_id: PageId, revision_id: RevisionId) {
        self.pages.lock().unwrap().insert(page_id, revision_id);
        self.revisions
            .lock()
            .unwrap()
            .insert(revision_id, RevisionContent::Opaque);
    }

    /// Swap the stored text of a revision without touching anything else.
    /// Revisions are immutable in a real wiki; this simulates storage
    /// corruption for drift-detection tests.
    pub fn replace_revision_text(&self, revision_id: RevisionId, text: &str) {
        self.revisions
            .lock()
            .unwrap()
            .insert(revision_id, RevisionContent::Text(text.to_string()));
    }

    /// Register a user with their group memberships.
    pub fn add_user(&self, user_id: UserId, name: &str, groups: &[&str]) {
        self.users.lock().unwrap().insert(
            user_id,
            (
                name.to_string(),
                groups.iter().map(|g| g.to_string()).collect(),
            ),
        );
    }

    /// Pages whose render cache was purged, in order.
    pub fn purged_pages(&self) -> Vec<PageId> {
        self.purged_pages.lock().unwrap().clone()
    }
}

impl PageStore for MemoryWiki {
    fn current_revision_id(&self, page_id: PageId) -> Result<Option<RevisionId>, Error> {
        Ok(self.pages.lock().unwrap().get(&page_id).copied())
    }

    fn purge_render_cache(&self, page_id: PageId) -> Result<(), Error> {
        self.purged_pages.lock().unwrap().push(page_id);
        Ok(())
    }
}

impl RevisionStore for MemoryWiki {
    fn revision_content(&self, revision_id: RevisionId) -> Result<Option<RevisionContent>, Error> {
        Ok(self.revisions.lock().unwrap().get(&revision_id).cloned())
    }
}

impl IdentityDirectory for MemoryWiki {
    fn name_of(&self, user_id: UserId) -> Result<String, Error> {
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|(name, _groups)| name.clone())
            .ok_or(Error::NotFound)
    }

    fn groups_of(&self, user_id: UserId) -> Result<HashSet<String>, Error> {
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|(_name, groups)| groups.clone())
            .ok_or(Error::NotFound)
    }
}
