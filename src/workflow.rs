// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Orchestration of signing requests.

use crate::{
    authorization::{AuthorizationResolver, SigningTarget},
    db::{SignatureDb, SignatureRecord},
    error::Error,
    hasher::{ContentDigest, ContentHasher},
    logger::{log, Logger},
    types::{PageId, RevisionId, UserId},
    wiki::PageStore,
};
use std::sync::Arc;

/// What a successful signing returns to the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignReceipt {
    /// The signed page.
    pub page_id: PageId,

    /// The exact revision that was signed.
    pub revision_id: RevisionId,

    /// The user the signature belongs to.
    pub signer_id: UserId,

    /// Digest of the revision text at signing time.
    pub content_hash: ContentDigest,

    /// Annotation carried on the record, if any.
    pub remarks: Option<String>,
}

/// Signature state of a page's current revision.
#[derive(Clone, Debug)]
pub struct PageSignatureStatus {
    /// The page's current revision.
    pub current_revision_id: RevisionId,

    /// The valid signature covering the current revision, if any.
    pub signature: Option<SignatureRecord>,

    /// Whether the stored content hash still matches a freshly recomputed
    /// digest of the current revision text. Always false when there is no
    /// signature.
    pub content_hash_verified: bool,
}

/// Orchestrates a sign request: checks the target revision is current,
/// resolves authorization, computes the content hash, and records the
/// signature.
#[derive(Clone)]
pub struct SigningWorkflow {
    pages: Arc<dyn PageStore>,
    resolver: AuthorizationResolver,
    hasher: ContentHasher,
    signature_db: SignatureDb,
    logger: Logger,
}

impl SigningWorkflow {
    /// Create a new signing workflow.
    pub fn new(
        pages: Arc<dyn PageStore>,
        resolver: AuthorizationResolver,
        hasher: ContentHasher,
        signature_db: SignatureDb,
        logger: Logger,
    ) -> Self {
        Self {
            pages,
            resolver,
            hasher,
            signature_db,
            logger,
        }
    }

    /// Sign `revision_id` of `page_id` as `signer`.
    ///
    /// The revision must be the page's current revision, the signer must
    /// satisfy `target`, and the revision text must be hashable. On
    /// success the new record is the page's only valid signature, and any
    /// cached rendering of the page is dropped.
    pub fn sign(
        &self,
        page_id: PageId,
        revision_id: RevisionId,
        target: &SigningTarget,
        remarks: Option<&str>,
        signer: UserId,
    ) -> Result<SignReceipt, Error> {
        let current_revision_id = self
            .pages
            .current_revision_id(page_id)?
            .ok_or(Error::PageNotFound(page_id))?;

        // A signature may only be attached to the current revision.
        // Anything else means the caller reviewed a view that has since
        // been superseded and must refresh.
        if revision_id != current_revision_id {
            log::info!(
                self.logger,
                "Refusing to sign page {}: revision {} is not current (current is {})",
                page_id,
                revision_id,
                current_revision_id
            );
            return Err(Error::StaleRevision(revision_id, current_revision_id));
        }

        if !self.resolver.authorize(signer, target)? {
            log::info!(
                self.logger,
                "User {} is not authorized to sign page {}",
                signer,
                page_id
            );
            return Err(Error::NotAuthorized);
        }

        let content_hash = self.hasher.hash_revision(revision_id)?;

        let record =
            self.signature_db
                .add_signature(page_id, revision_id, signer, &content_hash, remarks)?;

        // The cache purge is advisory; the signature is already durable.
        if let Err(err) = self.pages.purge_render_cache(page_id) {
            log::warn!(
                self.logger,
                "Failed purging render cache for page {}: {}",
                page_id,
                err
            );
        }

        Ok(SignReceipt {
            page_id,
            revision_id,
            signer_id: signer,
            content_hash,
            remarks: record.remarks().map(|r| r.to_string()),
        })
    }

    /// Signature state of the page's current revision, re-verifying the
    /// stored content hash against a fresh digest of the revision text.
    pub fn verify_current(&self, page_id: PageId) -> Result<PageSignatureStatus, Error> {
        let current_revision_id = self
            .pages
            .current_revision_id(page_id)?
            .ok_or(Error::PageNotFound(page_id))?;

        let signature = self
            .signature_db
            .get_valid_signature(page_id, current_revision_id)?;

        let content_hash_verified = match &signature {
            None => false,
            Some(record) => match self.hasher.hash_revision(current_revision_id) {
                Ok(digest) => digest.to_string() == record.content_hash(),
                // A revision that can no longer be hashed cannot verify.
                Err(Error::RevisionNotFound(_)) | Err(Error::UnsupportedContent(_)) => false,
                Err(err) => return Err(err),
            },
        };

        Ok(PageSignatureStatus {
            current_revision_id,
            signature,
            content_hash_verified,
        })
    }

    /// Whether `actor` may sign pages guarded by `target`.
    pub fn can_sign(&self, actor: UserId, target: &SigningTarget) -> Result<bool, Error> {
        self.resolver.authorize(actor, target)
    }
}
