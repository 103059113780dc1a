// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Digital signature records for wiki page revisions.
//!
//! A signature binds a reviewer to the content hash of one exact page
//! revision. Signatures are invalidated whenever the page content changes,
//! and at most one valid signature exists per page at any time.

#![deny(missing_docs)]

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

mod authorization;
mod db;
mod error;
mod hasher;
mod hooks;
mod service;
mod types;
mod wiki;
mod workflow;

/// Logging support.
pub mod logger;

#[cfg(test)]
mod test_utils;

pub use crate::{
    authorization::{AuthorizationResolver, SigningTarget, DEFAULT_SIGNING_ROLE},
    db::{SignatureDb, SignatureRecord},
    error::Error,
    hasher::{ContentDigest, ContentHasher},
    hooks::SignatureInvalidationHook,
    service::{
        ServiceError, SignRequest, SignResponse, SignatureService, SignatureStatusResponse,
    },
    types::{PageId, RevisionId, UserId},
    wiki::{IdentityDirectory, PageStore, RevisionContent, RevisionStore},
    workflow::{PageSignatureStatus, SignReceipt, SigningWorkflow},
};
