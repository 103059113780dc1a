// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Signature invalidation on content changes.

use crate::{
    db::SignatureDb,
    error::Error,
    logger::{log, Logger},
    types::{PageId, RevisionId},
    wiki::PageStore,
};
use std::sync::Arc;

/// Reacts to successful content saves by invalidating any signature the
/// page carried, then dropping cached renderings of the page.
///
/// Wired by the host wiki's save pipeline, which calls
/// [SignatureInvalidationHook::on_content_changed] after every successful
/// save.
#[derive(Clone)]
pub struct SignatureInvalidationHook {
    signature_db: SignatureDb,
    pages: Arc<dyn PageStore>,
    logger: Logger,
}

impl SignatureInvalidationHook {
    /// Create a new invalidation hook.
    pub fn new(signature_db: SignatureDb, pages: Arc<dyn PageStore>, logger: Logger) -> Self {
        Self {
            signature_db,
            pages,
            logger,
        }
    }

    /// Handle a successful content save of `page_id` producing
    /// `new_revision_id`.
    ///
    /// Returns the number of invalidated signatures; zero simply means the
    /// page had no valid signature. Page existence is not validated here,
    /// only the underlying store can report such an error.
    pub fn on_content_changed(
        &self,
        page_id: PageId,
        new_revision_id: RevisionId,
    ) -> Result<usize, Error> {
        log::info!(
            self.logger,
            "Content of page {} changed (new revision {}), invalidating signatures",
            page_id,
            new_revision_id
        );

        let num_rows = self.signature_db.invalidate_all_valid(page_id)?;
        if num_rows > 0 {
            log::info!(
                self.logger,
                "Invalidated {} signature(s) for page {}",
                num_rows,
                page_id
            );
        } else {
            log::debug!(self.logger, "No signatures to invalidate for page {}", page_id);
        }

        if let Err(err) = self.pages.purge_render_cache(page_id) {
            log::warn!(
                self.logger,
                "Failed purging render cache for page {}: {}",
                page_id,
                err
            );
        }

        Ok(num_rows)
    }
}
