use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Brands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Brands::ProductTypeId).integer().not_null())
                    .col(ColumnDef::new(Brands::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_brands_product_type_id")
                            .from(Brands::Table, Brands::ProductTypeId)
                            .to(ProductTypes::Table, ProductTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductModels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductModels::BrandId).integer().not_null())
                    .col(ColumnDef::new(ProductModels::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_models_brand_id")
                            .from(ProductModels::Table, ProductModels::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Complaints keep catalog names and the booking user as plain values, no foreign keys
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::RefId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::ProductType).string().not_null())
                    .col(ColumnDef::new(Complaints::Brand).string().not_null())
                    .col(ColumnDef::new(Complaints::Model).string().not_null())
                    .col(ColumnDef::new(Complaints::SerialNumber).string().null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::ContactName).string().not_null())
                    .col(ColumnDef::new(Complaints::ContactPhone).string().not_null())
                    .col(ColumnDef::new(Complaints::ServiceAddress).string().not_null())
                    .col(
                        ColumnDef::new(Complaints::Status)
                            .string_len(16)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(ColumnDef::new(Complaints::BookedBy).string().not_null())
                    .col(ColumnDef::new(Complaints::AssignedTo).string().null())
                    .col(ColumnDef::new(Complaints::ResolutionNote).text().null())
                    .col(ColumnDef::new(Complaints::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Complaints::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Complaints::ResolvedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_complaints_booked_by")
                    .table(Complaints::Table)
                    .col(Complaints::BookedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_complaints_status")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductModels::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ProductTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Brands {
    Table,
    Id,
    ProductTypeId,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum ProductModels {
    Table,
    Id,
    BrandId,
    Name,
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    RefId,
    ProductType,
    Brand,
    Model,
    SerialNumber,
    Description,
    ContactName,
    ContactPhone,
    ServiceAddress,
    Status,
    BookedBy,
    AssignedTo,
    ResolutionNote,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}
