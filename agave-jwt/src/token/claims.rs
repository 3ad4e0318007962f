//! Gateway claim set for tenant tokens.
//!
//! Tokens carry the registered claims `iss`, `sub`, `iat` and `exp`, followed
//! by a fixed group of gateway claims named `{namespace}/{claim}`:
//!
//! | Claim | Value |
//! |---|---|
//! | `subscriber` | empty |
//! | `applicationid` | `1` |
//! | `applicationname` | `DefaultApplication` |
//! | `applicationtier` | `Unlimited` |
//! | `apicontext` | `/admin` |
//! | `version` | `2.0` |
//! | `tier` | `Unlimited` |
//! | `keytype` | `PRODUCTION` |
//! | `usertype` | `APPLICATION_USER` |
//! | `enduser` | username |
//! | `enduserTenantId` | `-1234` |
//! | `emailaddress` | `{username}@example.com` |
//! | `fullname` | username |
//! | `givenname` | empty |
//! | `lastname` | empty |
//! | `role` | comma-joined [`RoleList`] |
//! | `title` | `N/A` |
//!
//! # Token Lifetime
//!
//! `exp` is `iat` plus [`IssuerConfig::validity_ms`] (4 minutes by default).
//! Both are serialized as whole seconds since the Unix epoch.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::config::IssuerConfig;

/// Application every gateway token is issued for.
pub const APPLICATION_NAME: &str = "DefaultApplication";

/// Key type of the issuing application.
pub const KEY_TYPE: &str = "PRODUCTION";

/// Subscription tier of the application and API.
pub const TIER: &str = "Unlimited";

/// Gateway claim names, in serialization order.
pub mod names {
    /// Subscriber of the application.
    pub const SUBSCRIBER: &str = "subscriber";
    /// Application id.
    pub const APPLICATION_ID: &str = "applicationid";
    /// Application name.
    pub const APPLICATION_NAME: &str = "applicationname";
    /// Application tier.
    pub const APPLICATION_TIER: &str = "applicationtier";
    /// API context path.
    pub const API_CONTEXT: &str = "apicontext";
    /// API version.
    pub const VERSION: &str = "version";
    /// API tier.
    pub const TIER: &str = "tier";
    /// Key type.
    pub const KEY_TYPE: &str = "keytype";
    /// User type.
    pub const USER_TYPE: &str = "usertype";
    /// End user name.
    pub const END_USER: &str = "enduser";
    /// Tenant id of the end user.
    pub const END_USER_TENANT_ID: &str = "enduserTenantId";
    /// Email address.
    pub const EMAIL_ADDRESS: &str = "emailaddress";
    /// Full name.
    pub const FULL_NAME: &str = "fullname";
    /// Given name.
    pub const GIVEN_NAME: &str = "givenname";
    /// Last name.
    pub const LAST_NAME: &str = "lastname";
    /// Comma-joined roles.
    pub const ROLE: &str = "role";
    /// Title.
    pub const TITLE: &str = "title";
}

/// Roles granted to a tenant user, in the order they appear in the `role` claim.
///
/// Empty tenant ids or usernames are interpolated as-is.
///
/// # Examples
///
/// ```
/// use agave_jwt::token::claims::RoleList;
///
/// let roles = RoleList::new("TACC", "alice");
/// assert_eq!(roles.as_slice()[4], "Internal/everyone");
/// assert!(roles.to_string().ends_with("Internal/TACC_alice_DefaultApplication_PRODUCTION"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleList([String; 6]);

impl RoleList {
    /// Derives the six roles of `username` in `tenant_id`.
    #[must_use]
    pub fn new(tenant_id: &str, username: &str) -> Self {
        Self([
            format!("Internal/{tenant_id}-services-admin"),
            format!("Internal/{tenant_id}-tenant-admin"),
            format!("Internal/{tenant_id}-user-account-manager"),
            format!("Internal/{tenant_id}-impersonator"),
            "Internal/everyone".to_owned(),
            format!("Internal/{tenant_id}_{username}_{APPLICATION_NAME}_{KEY_TYPE}"),
        ])
    }

    /// Roles in claim order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for RoleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Claims of one gateway token.
///
/// Built fresh for every token by [`build_claims`]. Serializes to the JWT
/// payload with registered claims first and gateway claims in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// `iss` claim.
    pub issuer: String,
    /// `sub` claim, the username.
    pub subject: String,
    /// `iat` claim.
    pub issue_time: DateTime<Utc>,
    /// `exp` claim.
    pub expiration_time: DateTime<Utc>,
    namespace: String,
    gateway: Vec<(&'static str, String)>,
}

impl ClaimSet {
    /// Value of the gateway claim `name`, given without the namespace.
    ///
    /// ```
    /// use agave_jwt::{config::IssuerConfig, token::claims::{build_claims, names}};
    ///
    /// let claims = build_claims(&IssuerConfig::default(), "TACC", "alice", chrono::Utc::now());
    /// assert_eq!(claims.gateway_claim(names::EMAIL_ADDRESS), Some("alice@example.com"));
    /// ```
    #[must_use]
    pub fn gateway_claim(&self, name: &str) -> Option<&str> {
        self.gateway.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    /// Gateway claims as `(full claim name, value)` pairs, in serialization order.
    pub fn gateway_claims(&self) -> impl Iterator<Item = (String, &str)> {
        self.gateway.iter().map(|(name, value)| (self.claim_name(name), value.as_str()))
    }

    /// Time between `iat` and `exp`.
    #[must_use]
    pub fn validity(&self) -> TimeDelta {
        self.expiration_time - self.issue_time
    }

    fn claim_name(&self, name: &str) -> String {
        format!("{}/{name}", self.namespace)
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.gateway.len()))?;
        map.serialize_entry("iss", &self.issuer)?;
        map.serialize_entry("sub", &self.subject)?;
        map.serialize_entry("iat", &self.issue_time.timestamp())?;
        map.serialize_entry("exp", &self.expiration_time.timestamp())?;
        for (name, value) in &self.gateway {
            map.serialize_entry(&self.claim_name(name), value)?;
        }
        map.end()
    }
}

/// Builds the claim set for `username` in `tenant_id`, issued at `now`.
///
/// No validation is applied to `tenant_id` or `username`; callers reject
/// empty or unsanitized values before this point.
///
/// # Examples
///
/// ```
/// use agave_jwt::{config::IssuerConfig, token::claims::build_claims};
///
/// let now = chrono::Utc::now();
/// let claims = build_claims(&IssuerConfig::default(), "TACC", "alice", now);
///
/// assert_eq!(claims.subject, "alice");
/// assert_eq!(claims.issue_time, now);
/// assert_eq!(claims.validity().num_milliseconds(), 240_000);
/// ```
#[must_use]
pub fn build_claims(
    config: &IssuerConfig,
    tenant_id: &str,
    username: &str,
    now: DateTime<Utc>,
) -> ClaimSet {
    let validity = i64::try_from(config.validity_ms)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::MAX);
    let expiration_time = now.checked_add_signed(validity).unwrap_or(DateTime::<Utc>::MAX_UTC);

    let roles = RoleList::new(tenant_id, username);

    let gateway = vec![
        (names::SUBSCRIBER, String::new()),
        (names::APPLICATION_ID, "1".to_owned()),
        (names::APPLICATION_NAME, APPLICATION_NAME.to_owned()),
        (names::APPLICATION_TIER, TIER.to_owned()),
        (names::API_CONTEXT, "/admin".to_owned()),
        (names::VERSION, "2.0".to_owned()),
        (names::TIER, TIER.to_owned()),
        (names::KEY_TYPE, KEY_TYPE.to_owned()),
        (names::USER_TYPE, "APPLICATION_USER".to_owned()),
        (names::END_USER, username.to_owned()),
        (names::END_USER_TENANT_ID, config.end_user_tenant_id.clone()),
        (names::EMAIL_ADDRESS, format!("{username}@{}", config.email_domain)),
        (names::FULL_NAME, username.to_owned()),
        (names::GIVEN_NAME, String::new()),
        (names::LAST_NAME, String::new()),
        (names::ROLE, roles.to_string()),
        (names::TITLE, "N/A".to_owned()),
    ];

    ClaimSet {
        issuer: config.issuer.clone(),
        subject: username.to_owned(),
        issue_time: now,
        expiration_time,
        namespace: config.claims_namespace.clone(),
        gateway,
    }
}
