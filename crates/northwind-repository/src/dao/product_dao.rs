//! ProductDao trait, CRUD access to the products table.

use async_trait::async_trait;
use northwind_core::{IdProductAttributeSet, NorthwindResult, PageRequest, Product};

/// Product data access object.
///
/// Methods take `&mut self`: a DAO owns one connection and runs one
/// statement at a time.
#[async_trait]
pub trait ProductDao: Send {
    /// Inserts a product that has no id yet and returns it with the id the
    /// database assigned.
    async fn create(&mut self, product: &Product) -> NorthwindResult<Product>;

    /// Finds a product by id.
    async fn fetch(&mut self, id: IdProductAttributeSet) -> NorthwindResult<Option<Product>>;

    /// Returns one page of products ordered by id. Pages are 0-indexed.
    async fn fetch_all(&mut self, page: i64, limit: i64) -> NorthwindResult<Vec<Product>> {
        let request = PageRequest::try_new(page, limit)?;
        self.fetch_page(request).await
    }

    /// Returns the page described by a validated request.
    async fn fetch_page(&mut self, page: PageRequest) -> NorthwindResult<Vec<Product>>;

    /// Writes every non-id attribute of a product to its row.
    ///
    /// Updating a missing row is not an error.
    async fn update(&mut self, product: &Product) -> NorthwindResult<()>;

    /// Deletes the row with the product's id.
    ///
    /// Deleting a missing row is not an error.
    async fn delete(&mut self, product: &Product) -> NorthwindResult<()>;
}
