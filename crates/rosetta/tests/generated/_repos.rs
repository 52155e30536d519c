// @generated by rosetta. Do not edit by hand.

use rusqlite::{params, Connection};

use super::_models::*;

/// Read-only access to `users`.
pub struct UsersRepository<'c> {
    conn: &'c Connection,
}

impl<'c> UsersRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn fetch_all(&self) -> rusqlite::Result<Vec<Users>> {
        let mut stmt = self.conn.prepare("SELECT \"id\", \"usr_email\", \"status\" FROM \"users\"")?;
        let rows = stmt.query_map([], Users::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_id(&self, value: i64) -> rusqlite::Result<Vec<Users>> {
        let mut stmt = self.conn.prepare("SELECT \"id\", \"usr_email\", \"status\" FROM \"users\" WHERE \"id\" = ?1")?;
        let rows = stmt.query_map(params![value], Users::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_email_address(&self, value: &str) -> rusqlite::Result<Vec<Users>> {
        let mut stmt = self.conn.prepare("SELECT \"id\", \"usr_email\", \"status\" FROM \"users\" WHERE \"usr_email\" = ?1")?;
        let rows = stmt.query_map(params![value], Users::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_status(&self, value: &str) -> rusqlite::Result<Vec<Users>> {
        let mut stmt = self.conn.prepare("SELECT \"id\", \"usr_email\", \"status\" FROM \"users\" WHERE \"status\" = ?1")?;
        let rows = stmt.query_map(params![value], Users::from_row)?;
        rows.collect()
    }
}

/// Read-only access to `option`.
pub struct OptionRowRepository<'c> {
    conn: &'c Connection,
}

impl<'c> OptionRowRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn fetch_all(&self) -> rusqlite::Result<Vec<OptionRow>> {
        let mut stmt = self.conn.prepare("SELECT \"name\" FROM \"option\"")?;
        let rows = stmt.query_map([], OptionRow::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_name(&self, value: &str) -> rusqlite::Result<Vec<OptionRow>> {
        let mut stmt = self.conn.prepare("SELECT \"name\" FROM \"option\" WHERE \"name\" = ?1")?;
        let rows = stmt.query_map(params![value], OptionRow::from_row)?;
        rows.collect()
    }
}

/// Read-only access to `connection`.
pub struct ConnectionRowRepository<'c> {
    conn: &'c Connection,
}

impl<'c> ConnectionRowRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn fetch_all(&self) -> rusqlite::Result<Vec<ConnectionRow>> {
        let mut stmt = self.conn.prepare("SELECT \"host\", \"port\" FROM \"connection\"")?;
        let rows = stmt.query_map([], ConnectionRow::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_host(&self, value: &str) -> rusqlite::Result<Vec<ConnectionRow>> {
        let mut stmt = self.conn.prepare("SELECT \"host\", \"port\" FROM \"connection\" WHERE \"host\" = ?1")?;
        let rows = stmt.query_map(params![value], ConnectionRow::from_row)?;
        rows.collect()
    }

    pub fn fetch_by_port(&self, value: i64) -> rusqlite::Result<Vec<ConnectionRow>> {
        let mut stmt = self.conn.prepare("SELECT \"host\", \"port\" FROM \"connection\" WHERE \"port\" = ?1")?;
        let rows = stmt.query_map(params![value], ConnectionRow::from_row)?;
        rows.collect()
    }
}
