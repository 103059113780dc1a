// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Authorization resolution for signing requests.

use crate::{error::Error, types::UserId, wiki::IdentityDirectory};
use std::sync::Arc;

/// The role checked when a request names neither a group nor a user.
/// Kept as "sysop" for backward compatibility with existing pages.
pub const DEFAULT_SIGNING_ROLE: &str = "sysop";

/// Who is allowed to sign a given page.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SigningTarget {
    /// Any current member of the named group.
    Group(String),

    /// Exactly the named user (case-sensitive).
    User(String),

    /// Holders of the configured default role.
    DefaultRole,
}

/// Decides whether an actor satisfies a signing target.
///
/// This is a pure decision function: it has no side effects and its
/// answer never reveals which groups or users would have been authorized.
#[derive(Clone)]
pub struct AuthorizationResolver {
    directory: Arc<dyn IdentityDirectory>,
    default_role: String,
}

impl AuthorizationResolver {
    /// Create a resolver using [DEFAULT_SIGNING_ROLE] as the default role.
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self::with_default_role(directory, DEFAULT_SIGNING_ROLE)
    }

    /// Create a resolver with a custom default role.
    pub fn with_default_role(
        directory: Arc<dyn IdentityDirectory>,
        default_role: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            default_role: default_role.into(),
        }
    }

    /// Whether `actor` satisfies `target`.
    pub fn authorize(&self, actor: UserId, target: &SigningTarget) -> Result<bool, Error> {
        match target {
            SigningTarget::Group(name) => Ok(self.directory.groups_of(actor)?.contains(name)),
            SigningTarget::User(name) => Ok(&self.directory.name_of(actor)? == name),
            SigningTarget::DefaultRole => {
                Ok(self.directory.groups_of(actor)?.contains(&self.default_role))
            }
        }
    }
}
