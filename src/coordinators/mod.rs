// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for specific API
// endpoints and CLI commands. Authorization checks happen here, against the
// principal carried by the RequestContext.

mod account_support;
pub mod complaint_coordinator;
pub mod customer_coordinator;
pub mod employee_coordinator;
pub mod login_coordinator;
pub mod owner_coordinator;

pub use complaint_coordinator::ComplaintCoordinator;
pub use customer_coordinator::CustomerCoordinator;
pub use employee_coordinator::EmployeeCoordinator;
pub use login_coordinator::LoginCoordinator;
pub use owner_coordinator::OwnerCoordinator;
