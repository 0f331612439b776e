use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::claims::{Identity, TokenType};
use crate::codec::TokenCodec;
use crate::error::{AuthError, AuthResult};
use crate::extractors::authenticate;

/// Static access-control record for one route. Built once at router
/// construction time and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    /// Public routes bypass identity checks entirely.
    pub public: bool,
    /// Non-empty set restricts the route to identities whose role is a
    /// case-sensitive member. Empty means authenticated-only.
    pub required_roles: Vec<String>,
}

impl RoutePolicy {
    pub fn public() -> Self {
        Self {
            public: true,
            required_roles: Vec::new(),
        }
    }

    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn roles(required: &[&str]) -> Self {
        Self {
            public: false,
            required_roles: required.iter().map(|role| role.to_string()).collect(),
        }
    }
}

/// Explicit registry mapping route identity (method + matched path
/// template) to its policy. Routes not registered here default to
/// authenticated-only.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    routes: HashMap<(Method, String), RoutePolicy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, path: &str, policy: RoutePolicy) -> Self {
        self.routes.insert((method, path.to_string()), policy);
        self
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RoutePolicy> {
        self.routes.get(&(method.clone(), path.to_string()))
    }
}

/// Per-route allow/deny decision point. Evaluated once per request, in
/// fixed order: public bypass, identity requirement, role membership.
#[derive(Clone)]
pub struct AccessGate {
    codec: Arc<TokenCodec>,
    registry: Arc<PolicyRegistry>,
}

impl AccessGate {
    pub fn new(codec: Arc<TokenCodec>, registry: PolicyRegistry) -> Self {
        Self {
            codec,
            registry: Arc::new(registry),
        }
    }

    /// Decide whether the request may proceed. On success for
    /// non-public routes the verified identity is attached to the
    /// request extensions; nothing is attached on failure.
    pub fn evaluate(&self, request: &mut Request) -> AuthResult<()> {
        let path = request
            .extensions()
            .get::<MatchedPath>()
            .map(|matched| matched.as_str().to_owned())
            .unwrap_or_else(|| request.uri().path().to_owned());
        // axum's `routing::get` also serves HEAD, so HEAD requests must
        // resolve to the policy registered for GET or they would fall
        // back to the authenticated-only default.
        let method = if request.method() == Method::HEAD {
            Method::GET
        } else {
            request.method().clone()
        };

        let policy = self
            .registry
            .lookup(&method, &path)
            .cloned()
            .unwrap_or_default();

        if policy.public {
            tracing::trace!(%method, path, "public route, bypassing identity check");
            return Ok(());
        }

        let identity = authenticate(request.headers(), &self.codec)?;
        if identity.token_type != TokenType::Access {
            return Err(AuthError::InvalidClaim("typ"));
        }

        ensure_role(&identity, &policy.required_roles)?;

        tracing::debug!(subject = %identity.id, %method, path, "request authorized");
        request.extensions_mut().insert(identity);
        Ok(())
    }
}

/// Middleware wrapper around [`AccessGate::evaluate`] for use with
/// `axum::middleware::from_fn_with_state`.
pub async fn access_gate(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.evaluate(&mut request) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Case-sensitive set-membership role check. An absent or empty role
/// claim never satisfies a non-empty requirement; it does not default
/// to any role.
pub fn ensure_role(identity: &Identity, required: &[String]) -> AuthResult<()> {
    if required.is_empty() {
        return Ok(());
    }

    let role = identity.role.as_deref().unwrap_or("");
    if role.is_empty() {
        return Err(AuthError::Forbidden);
    }

    if required.iter().any(|candidate| candidate == role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
