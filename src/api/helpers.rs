use poem::Request;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::types::internal::context::RequestContext;

/// Bearer token from the Authorization header, for endpoints where
/// authentication is optional
pub fn bearer_token(req: &Request) -> Option<&str> {
    req.header("Authorization")
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Build the request context, resolving the bearer token into a principal
///
/// A token that fails validation is an error even where authentication is
/// optional; no token at all leaves the context anonymous.
pub async fn request_context(
    app_data: &AppData,
    req: &Request,
    token: Option<&str>,
) -> Result<RequestContext, InternalError> {
    let ctx = RequestContext::for_api(req);
    let Some(token) = token else {
        return Ok(ctx);
    };

    let principal = app_data
        .providers
        .authentication_provider
        .authenticate(&app_data.db, token)
        .await?;
    Ok(ctx.with_principal(principal))
}

/// Context for endpoints that declare the bearer scheme
pub async fn authenticated_context(
    app_data: &AppData,
    req: &Request,
    auth: &BearerAuth,
) -> Result<RequestContext, InternalError> {
    request_context(app_data, req, Some(&auth.0.token)).await
}
