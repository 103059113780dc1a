// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Content digests for stored revisions.

use crate::{
    error::Error,
    logger::{log, Logger},
    types::RevisionId,
    wiki::{RevisionContent, RevisionStore},
};
use sha1::{Digest, Sha1};
use std::{fmt, sync::Arc};

/// A 160-bit digest over the raw text of a revision.
///
/// The digest covers the exact byte sequence of the text, whitespace
/// included, and nothing else - no author, no timestamp. Two revisions
/// with identical text digest identically.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ContentDigest([u8; 20]);

impl ContentDigest {
    /// Digest the given revision text.
    pub fn from_text(text: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(text.as_bytes());
        Self(hasher.finalize().into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Computes content digests for revisions held by the host wiki.
#[derive(Clone)]
pub struct ContentHasher {
    revisions: Arc<dyn RevisionStore>,
    logger: Logger,
}

impl ContentHasher {
    /// Create a hasher reading from the given revision store.
    pub fn new(revisions: Arc<dyn RevisionStore>, logger: Logger) -> Self {
        Self { revisions, logger }
    }

    /// Digest the text content of a revision.
    pub fn hash_revision(&self, revision_id: RevisionId) -> Result<ContentDigest, Error> {
        match self.revisions.revision_content(revision_id)? {
            None => {
                log::warn!(
                    self.logger,
                    "Revision {} not found, cannot compute content hash",
                    revision_id
                );
                Err(Error::RevisionNotFound(revision_id))
            }

            Some(RevisionContent::Opaque) => {
                log::warn!(
                    self.logger,
                    "Revision {} has no textual content, cannot compute content hash",
                    revision_id
                );
                Err(Error::UnsupportedContent(revision_id))
            }

            Some(RevisionContent::Text(text)) => {
                let digest = ContentDigest::from_text(&text);
                log::debug!(
                    self.logger,
                    "Computed content hash {} for revision {} ({} bytes of text)",
                    digest,
                    revision_id,
                    text.len()
                );
                Ok(digest)
            }
        }
    }
}
