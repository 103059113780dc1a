// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Request-layer surface for signing.
//!
//! This wraps [SigningWorkflow] with the wire-shaped request/response
//! types and the stable machine-readable failure codes API clients key
//! off of. Transport (HTTP routing, parameter validation) stays with the
//! host.

use crate::{
    authorization::SigningTarget,
    db::SignatureRecord,
    error::Error,
    logger::{log, Logger},
    types::{PageId, RevisionId, UserId},
    workflow::SigningWorkflow,
};
use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// Parameters of a signing request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SignRequest {
    /// The page to sign.
    pub page_id: PageId,

    /// The revision the caller reviewed.
    pub revision_id: RevisionId,

    /// Group whose members may sign, when restricting by group.
    pub group: Option<String>,

    /// Specific user who may sign, when restricting by user.
    pub user: Option<String>,

    /// Optional free-text remarks to carry on the signature.
    pub remarks: Option<String>,
}

impl SignRequest {
    /// The signing target encoded by this request. A group restriction
    /// wins over a user restriction; naming neither selects the default
    /// role.
    pub fn target(&self) -> SigningTarget {
        if let Some(group) = &self.group {
            SigningTarget::Group(group.clone())
        } else if let Some(user) = &self.user {
            SigningTarget::User(user.clone())
        } else {
            SigningTarget::DefaultRole
        }
    }
}

/// Success payload of a signing request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SignResponse {
    /// Always "success".
    pub result: String,

    /// The signed page.
    pub pageid: PageId,

    /// The signed revision.
    pub revid: RevisionId,

    /// The signing user.
    pub userid: UserId,

    /// Hex content hash bound to the signature.
    pub hash: String,

    /// Remarks carried on the signature, if any.
    pub remarks: Option<String>,
}

/// Signature state payload for a page's current revision.
#[derive(Clone, Debug, Serialize)]
pub struct SignatureStatusResponse {
    /// The page.
    pub pageid: PageId,

    /// The page's current revision.
    pub revid: RevisionId,

    /// The valid signature covering the current revision, if any.
    pub signature: Option<SignatureRecord>,

    /// Whether the stored content hash still matches the current revision
    /// text.
    pub hash_verified: bool,
}

/// A request failure, carrying a stable machine-readable code.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ServiceError {
    /// You must be logged in to sign pages
    NotLoggedIn,

    /// The target page does not exist or has been deleted
    NoSuchPage,

    /// The page content has changed since the signature request was initiated
    ContentChanged,

    /// You are not authorized to sign pages with the specified criteria
    PermissionDenied,

    /// Could not retrieve content hash for the specified revision
    NoHash,

    /// Failed to store digital signature
    DbError,
}

impl ServiceError {
    /// The machine-readable code API clients key off of.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotLoggedIn => "notloggedin",
            Self::NoSuchPage => "nosuchpage",
            Self::ContentChanged => "contentchanged",
            Self::PermissionDenied => "permissiondenied",
            Self::NoHash => "nohash",
            Self::DbError => "dberror",
        }
    }
}

impl From<Error> for ServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::PageNotFound(_) => Self::NoSuchPage,
            Error::StaleRevision(_, _) => Self::ContentChanged,
            Error::NotAuthorized => Self::PermissionDenied,
            Error::RevisionNotFound(_) | Error::UnsupportedContent(_) => Self::NoHash,
            _ => Self::DbError,
        }
    }
}

/// Handles signing requests from the host wiki's request layer.
#[derive(Clone)]
pub struct SignatureService {
    workflow: SigningWorkflow,
    logger: Logger,
}

impl SignatureService {
    /// Create a new service around a signing workflow.
    pub fn new(workflow: SigningWorkflow, logger: Logger) -> Self {
        Self { workflow, logger }
    }

    /// Handle a signing request. `actor` is the authenticated caller, if
    /// any; anonymous callers are rejected before any other validation.
    pub fn sign(
        &self,
        actor: Option<UserId>,
        request: &SignRequest,
    ) -> Result<SignResponse, ServiceError> {
        let signer = actor.ok_or(ServiceError::NotLoggedIn)?;

        let receipt = self
            .workflow
            .sign(
                request.page_id,
                request.revision_id,
                &request.target(),
                request.remarks.as_deref(),
                signer,
            )
            .map_err(|err| {
                log::info!(
                    self.logger,
                    "Signing request for page {} revision {} by user {} failed: {}",
                    request.page_id,
                    request.revision_id,
                    signer,
                    err
                );
                ServiceError::from(err)
            })?;

        Ok(SignResponse {
            result: "success".to_string(),
            pageid: receipt.page_id,
            revid: receipt.revision_id,
            userid: receipt.signer_id,
            hash: receipt.content_hash.to_string(),
            remarks: receipt.remarks,
        })
    }

    /// Signature state of a page's current revision.
    pub fn signature_status(
        &self,
        page_id: PageId,
    ) -> Result<SignatureStatusResponse, ServiceError> {
        let status = self.workflow.verify_current(page_id)?;
        Ok(SignatureStatusResponse {
            pageid: page_id,
            revid: status.current_revision_id,
            signature: status.signature,
            hash_verified: status.content_hash_verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        authorization::AuthorizationResolver, db::test_utils::TestDbContext,
        hasher::ContentHasher, logger::create_test_logger, test_utils::MemoryWiki,
    };
    use std::sync::Arc;

    fn setup(logger: &Logger) -> (Arc<MemoryWiki>, TestDbContext, SignatureService) {
        let wiki = Arc::new(MemoryWiki::default());
        wiki.add_page(10, 100, "reviewed content");
        wiki.add_user(1, "alice", &["sysop"]);
        wiki.add_user(2, "bob", &["reviewer"]);

        let test_db_context = TestDbContext::default();
        let signature_db = test_db_context.get_db_instance(logger.clone());

        let workflow = SigningWorkflow::new(
            wiki.clone(),
            AuthorizationResolver::new(wiki.clone()),
            ContentHasher::new(wiki.clone(), logger.clone()),
            signature_db,
            logger.clone(),
        );
        let service = SignatureService::new(workflow, logger.clone());
        (wiki, test_db_context, service)
    }

    fn group_request(group: &str) -> SignRequest {
        SignRequest {
            page_id: 10,
            revision_id: 100,
            group: Some(group.to_string()),
            user: None,
            remarks: None,
        }
    }

    #[test]
    fn sign_returns_the_success_payload() {
        let logger = create_test_logger("sign_returns_the_success_payload");
        let (_wiki, _ctx, service) = setup(&logger);

        let mut request = group_request("sysop");
        request.remarks = Some("approved".to_string());

        let response = service.sign(Some(1), &request).unwrap();
        assert_eq!(response.result, "success");
        assert_eq!(response.pageid, 10);
        assert_eq!(response.revid, 100);
        assert_eq!(response.userid, 1);
        assert_eq!(response.hash.len(), 40);
        assert_eq!(response.remarks.as_deref(), Some("approved"));
    }

    #[test]
    fn anonymous_callers_get_notloggedin() {
        let logger = create_test_logger("anonymous_callers_get_notloggedin");
        let (_wiki, _ctx, service) = setup(&logger);

        let err = service.sign(None, &group_request("sysop")).unwrap_err();
        assert_eq!(err, ServiceError::NotLoggedIn);
        assert_eq!(err.code(), "notloggedin");
    }

    #[test]
    fn failure_codes_match_the_wire_contract() {
        let logger = create_test_logger("failure_codes_match_the_wire_contract");
        let (wiki, _ctx, service) = setup(&logger);

        // Unknown page.
        let mut request = group_request("sysop");
        request.page_id = 99;
        assert_eq!(
            service.sign(Some(1), &request).unwrap_err().code(),
            "nosuchpage"
        );

        // Unauthorized actor.
        assert_eq!(
            service
                .sign(Some(2), &group_request("sysop"))
                .unwrap_err()
                .code(),
            "permissiondenied"
        );

        // Revision that cannot be hashed.
        wiki.add_opaque_revision(11, 200);
        let mut request = group_request("sysop");
        request.page_id = 11;
        request.revision_id = 200;
        assert_eq!(
            service.sign(Some(1), &request).unwrap_err().code(),
            "nohash"
        );

        // Stale revision after an edit.
        wiki.save_revision(10, 101, "edited content");
        assert_eq!(
            service
                .sign(Some(1), &group_request("sysop"))
                .unwrap_err()
                .code(),
            "contentchanged"
        );
    }

    #[test]
    fn request_target_resolution_prefers_group_then_user_then_default() {
        let request = SignRequest {
            page_id: 10,
            revision_id: 100,
            group: Some("sysop".to_string()),
            user: Some("bob".to_string()),
            remarks: None,
        };
        assert_eq!(request.target(), SigningTarget::Group("sysop".to_string()));

        let request = SignRequest {
            group: None,
            ..request
        };
        assert_eq!(request.target(), SigningTarget::User("bob".to_string()));

        let request = SignRequest {
            user: None,
            ..request
        };
        assert_eq!(request.target(), SigningTarget::DefaultRole);
    }

    #[test]
    fn user_target_allows_the_named_user_only() {
        let logger = create_test_logger("user_target_allows_the_named_user_only");
        let (_wiki, _ctx, service) = setup(&logger);

        let request = SignRequest {
            page_id: 10,
            revision_id: 100,
            group: None,
            user: Some("bob".to_string()),
            remarks: None,
        };

        assert_eq!(
            service.sign(Some(1), &request).unwrap_err().code(),
            "permissiondenied"
        );
        assert!(service.sign(Some(2), &request).is_ok());
    }

    #[test]
    fn signature_status_round_trip() {
        let logger = create_test_logger("signature_status_round_trip");
        let (wiki, _ctx, service) = setup(&logger);

        let status = service.signature_status(10).unwrap();
        assert!(status.signature.is_none());
        assert!(!status.hash_verified);

        service.sign(Some(1), &group_request("sysop")).unwrap();

        let status = service.signature_status(10).unwrap();
        assert_eq!(status.revid, 100);
        assert!(status.signature.is_some());
        assert!(status.hash_verified);

        assert_eq!(
            service.signature_status(99).unwrap_err().code(),
            "nosuchpage"
        );

        // After an edit the new revision carries no signature.
        wiki.save_revision(10, 101, "edited content");
        let status = service.signature_status(10).unwrap();
        assert_eq!(status.revid, 101);
        assert!(status.signature.is_none());
    }
}
