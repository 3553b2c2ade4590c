// Stores layer - Data access and repository pattern
pub mod catalog_store;
pub mod complaint_store;
pub mod credential_store;
pub mod customer_store;
pub mod employee_store;
pub mod owner_store;

pub use catalog_store::CatalogStore;
pub use complaint_store::ComplaintStore;
pub use credential_store::CredentialStore;
pub use customer_store::CustomerStore;
pub use employee_store::EmployeeStore;
pub use owner_store::OwnerStore;
