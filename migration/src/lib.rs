pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_people_tables;
mod m20260105_000002_create_credential_tables;
mod m20260105_000003_create_complaint_tables;
mod m20260105_000004_seed_product_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_people_tables::Migration),
            Box::new(m20260105_000002_create_credential_tables::Migration),
            Box::new(m20260105_000003_create_complaint_tables::Migration),
            Box::new(m20260105_000004_seed_product_catalog::Migration),
        ]
    }
}
