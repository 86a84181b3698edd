//! # Northwind Repository
//!
//! Data access for the Northwind products table:
//!
//! ```text
//! Caller
//!   ↓  &mut dyn ProductDao       (DAO interface)
//! MySqlProductDao                (statement bank + row mapping)
//!   ↓  BaseDao / NamedStatement  (`:name` parameters → `?`)
//! MySqlDbConnection              (one SQLx session)
//!   ↓
//! MySQL
//! ```
//!
//! Connections come from [`ConnectionFactory`], which returns `None` for
//! configurations it has no driver for.
//!
//! ## Structure
//!
//! ```text
//! src/
//!   connection.rs            ← Connection, MySqlDbConnection
//!   factory.rs               ← ConnectionFactory
//!   statement.rs             ← NamedStatement
//!   dao/
//!     product_dao.rs         ← ProductDao trait
//!   mysql/
//!     base_dao.rs            ← BaseDao
//!     product_sql.rs         ← statement bank
//!     product_dao_impl.rs    ← MySqlProductDao
//!     row.rs                 ← MySqlRow → Row
//! ```

pub mod connection;
pub mod dao;
pub mod factory;
pub mod mysql;
pub mod statement;

pub use connection::*;
pub use dao::ProductDao;
pub use factory::*;
pub use mysql::{BaseDao, MySqlProductDao};
pub use statement::NamedStatement;
