use std::net::IpAddr;

use poem::Request;

use crate::errors::InternalError;
use crate::errors::internal::AccessError;
use crate::types::internal::auth::{Principal, Role};

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries what logging and authorization need across API, coordinator and
/// store layers: who is calling, from where, and under which request id.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Authenticated caller, if a valid bearer token was presented
    pub principal: Option<Principal>,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Anonymous API context with the client address taken from `req`
    pub fn for_api(req: &Request) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            principal: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                if let Ok(ip) = ip.trim().parse() {
                    return Some(ip);
                }
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            if let Ok(ip) = real_ip.trim().parse() {
                return Some(ip);
            }
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Attach the authenticated caller; the actor becomes its user id
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.actor_id = principal.user_id.clone();
        self.principal = Some(principal);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn require_principal(&self) -> Result<&Principal, InternalError> {
        self.principal
            .as_ref()
            .ok_or_else(|| AccessError::Unauthenticated.into())
    }

    /// The caller must hold `role`, directly or through the hierarchy
    pub fn require_role(&self, role: Role) -> Result<&Principal, InternalError> {
        let principal = self.require_principal()?;
        if principal.has_role(role) {
            Ok(principal)
        } else {
            tracing::debug!(
                request_id = %self.request_id,
                user_id = %principal.user_id,
                required = %role,
                "Access denied"
            );
            Err(AccessError::Forbidden {
                required: role.authority().to_string(),
            }
            .into())
        }
    }

    /// The caller must hold `role` or be the person identified by `user_id`
    pub fn require_role_or_self(&self, role: Role, user_id: &str) -> Result<&Principal, InternalError> {
        let principal = self.require_principal()?;
        if principal.is_subject(user_id) {
            return Ok(principal);
        }
        self.require_role(role)
    }
}
