use sea_orm_migration::prelude::*;

use crate::m20260105_000003_create_complaint_tables::{Brands, ProductModels, ProductTypes};

/// Product type → brand → models served by the company at launch
const CATALOG: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Refrigerator",
        &[
            ("Whirlpool", &["IntelliFresh 240L", "Neo 265L", "Protton 340L"]),
            ("Godrej", &["Edge Pro 190L", "Eon Vibe 244L"]),
            ("LG", &["Smart Inverter 260L", "InstaView 668L"]),
        ],
    ),
    (
        "Deep Freezer",
        &[
            ("Voltas", &["HF 205 DD", "CF HT 320 DD"]),
            ("Blue Star", &["CHF 300", "CHF 500"]),
        ],
    ),
    (
        "Water Cooler",
        &[
            ("Voltas", &["FS 40/80", "FS 60/120"]),
            ("Usha", &["SS 40/80", "SS 80/160"]),
        ],
    ),
    (
        "Visi Cooler",
        &[
            ("Western", &["SRC 320", "SRC 640"]),
            ("Rockwell", &["SFL 300", "SFL 450"]),
        ],
    ),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut product_type_id: i32 = 0;
        let mut brand_id: i32 = 0;

        for (product_type, brands) in CATALOG {
            product_type_id += 1;
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(ProductTypes::Table)
                        .columns([ProductTypes::Id, ProductTypes::Name])
                        .values_panic([product_type_id.into(), (*product_type).into()])
                        .to_owned(),
                )
                .await?;

            for (brand, models) in brands.iter() {
                brand_id += 1;
                manager
                    .exec_stmt(
                        Query::insert()
                            .into_table(Brands::Table)
                            .columns([Brands::Id, Brands::ProductTypeId, Brands::Name])
                            .values_panic([
                                brand_id.into(),
                                product_type_id.into(),
                                (*brand).into(),
                            ])
                            .to_owned(),
                    )
                    .await?;

                for model in models.iter() {
                    manager
                        .exec_stmt(
                            Query::insert()
                                .into_table(ProductModels::Table)
                                .columns([ProductModels::BrandId, ProductModels::Name])
                                .values_panic([brand_id.into(), (*model).into()])
                                .to_owned(),
                        )
                        .await?;
                }
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(ProductModels::Table).to_owned())
            .await?;

        manager
            .exec_stmt(Query::delete().from_table(Brands::Table).to_owned())
            .await?;

        manager
            .exec_stmt(Query::delete().from_table(ProductTypes::Table).to_owned())
            .await
    }
}
