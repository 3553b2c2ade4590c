pub mod auth;
pub mod business_id;
pub mod context;
pub mod role_hierarchy;
pub mod validation;

pub use auth::{AccountKind, Claims, Principal, Role};
pub use business_id::{BusinessId, BusinessIdKind};
pub use context::{RequestContext, RequestId, RequestSource};
pub use role_hierarchy::RoleHierarchy;
pub use validation::{FieldError, FieldErrors};
