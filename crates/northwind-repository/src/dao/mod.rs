//! DAO (Data Access Object) layer.
//!
//! DAO traits describe data access for one entity, independent of the
//! backend. Backend implementations live beside their driver code, for
//! example [`crate::mysql::MySqlProductDao`].
//!
//! Hierarchy:
//! ```text
//! Caller → ProductDao (trait) → MySqlProductDao → BaseDao → MySQL
//! ```

pub mod product_dao;

pub use product_dao::ProductDao;
