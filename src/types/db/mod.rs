// Database entities - SeaORM models
pub mod brand;
pub mod common;
pub mod complaint;
pub mod customer;
pub mod employee;
pub mod owner;
pub mod product_model;
pub mod product_type;
pub mod refresh_token;
pub mod user_credential;
pub mod user_role;

pub use common::{AccountType, ActiveStatus, ComplaintStatus};

