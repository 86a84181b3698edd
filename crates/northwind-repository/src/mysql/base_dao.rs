//! Base DAO shared by MySQL DAOs.

use crate::connection::MySqlDbConnection;
use crate::statement::NamedStatement;

/// Holds the connection a MySQL DAO runs its statements on.
#[derive(Debug)]
pub struct BaseDao {
    connection: MySqlDbConnection,
}

impl BaseDao {
    #[must_use]
    pub fn new(connection: MySqlDbConnection) -> Self {
        Self { connection }
    }

    /// Returns the connection for running statements.
    pub fn connection(&mut self) -> &mut MySqlDbConnection {
        &mut self.connection
    }

    /// Prepares a statement with named parameters.
    #[must_use]
    pub fn prepare(&self, sql: &str) -> NamedStatement {
        NamedStatement::prepare(sql)
    }

    /// Gives the connection back.
    #[must_use]
    pub fn into_connection(self) -> MySqlDbConnection {
        self.connection
    }
}
