//! MySQL implementation of [`ProductDao`].

use super::base_dao::BaseDao;
use super::product_sql::{
    CREATE_PRODUCT_SQL, DELETE_PRODUCT_SQL, FETCH_ALL_PRODUCTS_BY_PAGE_SQL, FETCH_PRODUCT_SQL,
    LIMIT_PARAM, OFFSET_ROWS_PARAM, UPDATE_PRODUCT_SQL,
};
use super::row::decode_row;
use crate::connection::{Connection, MySqlDbConnection};
use crate::dao::ProductDao;
use crate::statement::NamedStatement;
use async_trait::async_trait;
use northwind_core::{
    encode_supplier_ids, AccessorBasedProductBuilder, IdProductAttributeSet, NorthwindError,
    NorthwindResult, PageRequest, Product, ProductAttributeNames as Attr, RowProductAccessor,
};
use sqlx::mysql::MySqlRow;
use tracing::{debug, warn};

/// Product DAO backed by a single MySQL connection.
#[derive(Debug)]
pub struct MySqlProductDao {
    base: BaseDao,
    builder: AccessorBasedProductBuilder,
}

impl MySqlProductDao {
    /// Creates a DAO that owns `connection`.
    #[must_use]
    pub fn new(connection: MySqlDbConnection) -> Self {
        Self {
            base: BaseDao::new(connection),
            builder: AccessorBasedProductBuilder::new(),
        }
    }

    /// Creates a DAO from a factory-produced connection.
    pub fn from_connection(connection: Connection) -> NorthwindResult<Self> {
        Ok(Self::new(connection.into_mysql()?))
    }

    /// Gives the connection back.
    #[must_use]
    pub fn into_connection(self) -> MySqlDbConnection {
        self.base.into_connection()
    }

    fn new_product_instance(&self, row: &MySqlRow) -> NorthwindResult<Product> {
        let decoded = decode_row(row)?;
        self.builder.build(&RowProductAccessor::new(&decoded))
    }
}

/// Binds every non-id attribute of `product`.
fn bind_all_params(statement: &mut NamedStatement, product: &Product) -> NorthwindResult<()> {
    statement
        .bind(Attr::CODE, product.code())?
        .bind(Attr::SUPPLIER_IDS, encode_supplier_ids(product.supplier_ids()))?
        .bind(Attr::NAME, product.name())?
        .bind(Attr::DESCRIPTION, product.description())?
        .bind(Attr::STANDARD_COST, product.standard_cost())?
        .bind(Attr::LIST_PRICE, product.list_price())?
        .bind(Attr::REORDER_LEVEL, product.reorder_level())?
        .bind(Attr::TARGET_LEVEL, product.target_level())?
        .bind(Attr::QUANTITY_PER_UNIT, product.quantity_per_unit())?
        .bind(Attr::DISCONTINUED, product.discontinued())?
        .bind(Attr::MINIMUM_REORDER_QUANTITY, product.minimum_reorder_quantity())?
        .bind(Attr::CATEGORY, product.category())?;
    Ok(())
}

/// Turns bind and execution failures into connection errors prefixed with
/// what the DAO was doing.
///
/// Mapping and validation errors pass through unchanged.
fn statement_failed(context: String) -> impl FnOnce(NorthwindError) -> NorthwindError {
    move |err| match err {
        NorthwindError::Connection(cause) | NorthwindError::Binding(cause) => {
            warn!(%cause, "{}", context);
            NorthwindError::Connection(format!("{}: {}", context, cause))
        }
        other => other,
    }
}

#[async_trait]
impl ProductDao for MySqlProductDao {
    async fn create(&mut self, product: &Product) -> NorthwindResult<Product> {
        debug!("Creating product: {}", product);

        if let Some(id) = product.id() {
            return Err(NorthwindError::validation(format!(
                "cannot create product that already has id {}",
                id
            )));
        }

        let context = format!("failed to create product {}", product);
        let mut statement = self.base.prepare(CREATE_PRODUCT_SQL);
        bind_all_params(&mut statement, product).map_err(statement_failed(context.clone()))?;

        let result = statement
            .execute(self.base.connection().inner())
            .await
            .map_err(statement_failed(context))?;

        let id = IdProductAttributeSet::try_from(result.last_insert_id())?;
        debug!("Created product with id: {}", id);
        product.clone().with_assigned_id(id)
    }

    async fn fetch(&mut self, id: IdProductAttributeSet) -> NorthwindResult<Option<Product>> {
        debug!("Fetching product by id: {}", id);

        let context = format!("failed to fetch product {}", id);
        let mut statement = self.base.prepare(FETCH_PRODUCT_SQL);
        statement
            .bind(Attr::ID, id.id())
            .map_err(statement_failed(context.clone()))?;

        let row = statement
            .fetch_optional(self.base.connection().inner())
            .await
            .map_err(statement_failed(context))?;

        row.map(|row| self.new_product_instance(&row)).transpose()
    }

    async fn fetch_page(&mut self, page: PageRequest) -> NorthwindResult<Vec<Product>> {
        debug!(
            "Fetching products page {} (limit {})",
            page.page(),
            page.limit()
        );

        let context = format!(
            "failed to fetch products page {} with limit {}",
            page.page(),
            page.limit()
        );
        let mut statement = self.base.prepare(FETCH_ALL_PRODUCTS_BY_PAGE_SQL);
        statement
            .bind(OFFSET_ROWS_PARAM, page.offset())
            .and_then(|s| s.bind(LIMIT_PARAM, page.limit()))
            .map_err(statement_failed(context.clone()))?;

        let rows = statement
            .fetch_all(self.base.connection().inner())
            .await
            .map_err(statement_failed(context))?;

        rows.iter()
            .map(|row| self.new_product_instance(row))
            .collect()
    }

    async fn update(&mut self, product: &Product) -> NorthwindResult<()> {
        debug!("Updating product: {}", product);

        let id = product.require_id("update")?;
        let context = format!("failed to update product {}", product);
        let mut statement = self.base.prepare(UPDATE_PRODUCT_SQL);
        bind_all_params(&mut statement, product)
            .and_then(|()| statement.bind(Attr::ID, id.id()).map(|_| ()))
            .map_err(statement_failed(context.clone()))?;

        let result = statement
            .execute(self.base.connection().inner())
            .await
            .map_err(statement_failed(context))?;

        debug!("Updated product {}, rows affected: {}", id, result.rows_affected());
        Ok(())
    }

    async fn delete(&mut self, product: &Product) -> NorthwindResult<()> {
        debug!("Deleting product: {}", product);

        let id = product.require_id("delete")?;
        let context = format!("failed to delete product {}", product);
        let mut statement = self.base.prepare(DELETE_PRODUCT_SQL);
        statement
            .bind(Attr::ID, id.id())
            .map_err(statement_failed(context.clone()))?;

        let result = statement
            .execute(self.base.connection().inner())
            .await
            .map_err(statement_failed(context))?;

        debug!("Deleted product {}, rows affected: {}", id, result.rows_affected());
        Ok(())
    }
}
