//! MySQL DAO implementations.

mod base_dao;
mod product_dao_impl;
pub mod product_sql;
mod row;

pub use base_dao::BaseDao;
pub use product_dao_impl::MySqlProductDao;
pub use row::decode_row;
