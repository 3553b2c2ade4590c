use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::InternalError;
use crate::types::db::brand::{self, Entity as Brand};
use crate::types::db::product_model::{self, Entity as ProductModel};
use crate::types::db::product_type::{self, Entity as ProductType};

/// Read-only access to the product type → brand → model catalog
pub struct CatalogStore {}

impl CatalogStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn product_types(&self, conn: &impl ConnectionTrait) -> Result<Vec<product_type::Model>, InternalError> {
        ProductType::find()
            .order_by_asc(product_type::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_product_types", e))
    }

    pub async fn find_product_type(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<product_type::Model>, InternalError> {
        ProductType::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_product_type", e))
    }

    pub async fn brands_for(
        &self,
        conn: &impl ConnectionTrait,
        product_type_id: i32,
    ) -> Result<Vec<brand::Model>, InternalError> {
        Brand::find()
            .filter(brand::Column::ProductTypeId.eq(product_type_id))
            .order_by_asc(brand::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_brands", e))
    }

    pub async fn find_brand(&self, conn: &impl ConnectionTrait, id: i32) -> Result<Option<brand::Model>, InternalError> {
        Brand::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_brand", e))
    }

    pub async fn models_for(
        &self,
        conn: &impl ConnectionTrait,
        brand_id: i32,
    ) -> Result<Vec<product_model::Model>, InternalError> {
        ProductModel::find()
            .filter(product_model::Column::BrandId.eq(brand_id))
            .order_by_asc(product_model::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_models", e))
    }

    pub async fn find_model(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<product_model::Model>, InternalError> {
        ProductModel::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_model", e))
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_seeded_catalog_cascade() {
        let db = setup_test_db().await;
        let store = CatalogStore::new();

        let types = store.product_types(&db).await.unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Deep Freezer", "Refrigerator", "Visi Cooler", "Water Cooler"]);

        let refrigerator = types.iter().find(|t| t.name == "Refrigerator").unwrap();
        let brands = store.brands_for(&db, refrigerator.id).await.unwrap();
        let brand_names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(brand_names, vec!["Godrej", "LG", "Whirlpool"]);

        let whirlpool = brands.iter().find(|b| b.name == "Whirlpool").unwrap();
        let models = store.models_for(&db, whirlpool.id).await.unwrap();
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|m| m.brand_id == whirlpool.id));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let db = setup_test_db().await;
        let store = CatalogStore::new();

        assert!(store.find_product_type(&db, 999).await.unwrap().is_none());
        assert!(store.brands_for(&db, 999).await.unwrap().is_empty());
        assert!(store.find_model(&db, 999).await.unwrap().is_none());
    }
}
