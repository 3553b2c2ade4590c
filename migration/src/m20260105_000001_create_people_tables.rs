use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owners::RefId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Owners::FirstName).string().not_null())
                    .col(ColumnDef::new(Owners::LastName).string().not_null())
                    .col(ColumnDef::new(Owners::Email).string().not_null())
                    .col(ColumnDef::new(Owners::Phone).string().not_null())
                    .col(ColumnDef::new(Owners::NationalId).string().not_null())
                    .col(ColumnDef::new(Owners::Address).string().not_null())
                    .col(
                        ColumnDef::new(Owners::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Owners::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Owners::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::RefId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(ColumnDef::new(Employees::Phone).string().not_null())
                    .col(ColumnDef::new(Employees::NationalId).string().not_null())
                    .col(ColumnDef::new(Employees::Address).string().not_null())
                    .col(ColumnDef::new(Employees::Designation).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Employees::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Employees::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::RefId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::FirstName).string().not_null())
                    .col(ColumnDef::new(Customers::LastName).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string().not_null())
                    .col(ColumnDef::new(Customers::Phone).string().not_null())
                    .col(ColumnDef::new(Customers::Address).string().not_null())
                    .col(ColumnDef::new(Customers::City).string().not_null())
                    .col(ColumnDef::new(Customers::Pincode).string_len(6).not_null())
                    .col(
                        ColumnDef::new(Customers::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Customers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Customers::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookup indexes for the cross-entity uniqueness queries
        for (table, column) in [
            ("owners", "email"),
            ("owners", "phone"),
            ("employees", "email"),
            ("employees", "phone"),
            ("customers", "email"),
            ("customers", "phone"),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(format!("idx_{}_{}", table, column))
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Owners {
    Table,
    RefId,
    FirstName,
    LastName,
    Email,
    Phone,
    NationalId,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    RefId,
    FirstName,
    LastName,
    Email,
    Phone,
    NationalId,
    Address,
    Designation,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    RefId,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    Pincode,
    Status,
    CreatedAt,
    UpdatedAt,
}
