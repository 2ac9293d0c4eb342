//! Product repository for database operations.

use std::collections::HashSet;

use rust_decimal::Decimal;
use sqlx::PgPool;

use verdant_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch};

/// Internal row type for `products` queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    image: Option<String>,
    price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            image: row.image,
            price: row.price,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, image, price FROM products ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, image, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Which of the given product IDs exist in the catalog.
    ///
    /// The input is already a set, so duplicate references in an order
    /// cannot produce a false mismatch. Read-only; used to validate
    /// referential integrity before an order write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn existing_ids(
        &self,
        ids: &HashSet<ProductId>,
    ) -> Result<HashSet<ProductId>, RepositoryError> {
        let raw: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();

        let found = sqlx::query_scalar::<_, i32>("SELECT id FROM products WHERE id = ANY($1)")
            .bind(&raw)
            .fetch_all(self.pool)
            .await?;

        Ok(found.into_iter().map(ProductId::new).collect())
    }

    /// Create a new catalog product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, image, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, image, price
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Apply a partial update; absent fields keep their stored value.
    ///
    /// Returns `None` if no product matched the ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                price = COALESCE($5, price)
            WHERE id = $1
            RETURNING id, name, description, image, price
            ",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.image)
        .bind(patch.price)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a product.
    ///
    /// Returns `true` if a row was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, including
    /// the foreign-key failure when historical order items still reference
    /// the product.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
