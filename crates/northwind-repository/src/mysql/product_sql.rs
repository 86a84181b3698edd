//! Statement bank for the products table.
//!
//! Columns are aliased to the product attribute names so rows can be read
//! through a [`RowProductAccessor`](northwind_core::RowProductAccessor)
//! directly. Money columns are DECIMAL in the schema and cast to DOUBLE.

/// Paging parameter: rows to skip.
pub const OFFSET_ROWS_PARAM: &str = "offset_rows";

/// Paging parameter: page size.
pub const LIMIT_PARAM: &str = "limit";

pub const CREATE_PRODUCT_SQL: &str = r#"
    INSERT INTO products (
        product_code, supplier_ids, product_name, description,
        standard_cost, list_price, reorder_level, target_level,
        quantity_per_unit, discontinued, minimum_reorder_quantity, category
    ) VALUES (
        :code, :supplier_ids, :name, :description,
        :standard_cost, :list_price, :reorder_level, :target_level,
        :quantity_per_unit, :discontinued, :minimum_reorder_quantity, :category
    )
"#;

pub const FETCH_PRODUCT_SQL: &str = r#"
    SELECT id, product_code AS code, supplier_ids, product_name AS name, description,
           CAST(standard_cost AS DOUBLE) AS standard_cost,
           CAST(list_price AS DOUBLE) AS list_price,
           reorder_level, target_level, quantity_per_unit, discontinued,
           minimum_reorder_quantity, category
    FROM products
    WHERE id = :id
"#;

pub const FETCH_ALL_PRODUCTS_BY_PAGE_SQL: &str = r#"
    SELECT id, product_code AS code, supplier_ids, product_name AS name, description,
           CAST(standard_cost AS DOUBLE) AS standard_cost,
           CAST(list_price AS DOUBLE) AS list_price,
           reorder_level, target_level, quantity_per_unit, discontinued,
           minimum_reorder_quantity, category
    FROM products
    ORDER BY id ASC
    LIMIT :offset_rows, :limit
"#;

pub const UPDATE_PRODUCT_SQL: &str = r#"
    UPDATE products
    SET product_code = :code,
        supplier_ids = :supplier_ids,
        product_name = :name,
        description = :description,
        standard_cost = :standard_cost,
        list_price = :list_price,
        reorder_level = :reorder_level,
        target_level = :target_level,
        quantity_per_unit = :quantity_per_unit,
        discontinued = :discontinued,
        minimum_reorder_quantity = :minimum_reorder_quantity,
        category = :category
    WHERE id = :id
"#;

pub const DELETE_PRODUCT_SQL: &str = r#"
    DELETE FROM products
    WHERE id = :id
"#;
