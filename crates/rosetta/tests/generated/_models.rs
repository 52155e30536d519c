// @generated by rosetta. Do not edit by hand.

use serde::{Deserialize, Serialize};

/// Row of `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Users {
    pub id: i64,
    #[serde(rename = "usr_email")]
    pub email_address: Option<String>,
    /// Account state.
    #[serde(rename = "status")]
    pub status: Option<String>,
}

impl Users {
    pub const TABLE: &'static str = "users";
    pub const COLUMNS: &'static [&'static str] = &["id", "usr_email", "status"];

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email_address: row.get("usr_email")?,
            status: row.get("status")?,
        })
    }
}

/// Row of `option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRow {
    pub name: Option<String>,
}

impl OptionRow {
    pub const TABLE: &'static str = "option";
    pub const COLUMNS: &'static [&'static str] = &["name"];

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
        })
    }
}

/// Row of `connection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRow {
    pub host: String,
    pub port: Option<i64>,
}

impl ConnectionRow {
    pub const TABLE: &'static str = "connection";
    pub const COLUMNS: &'static [&'static str] = &["host", "port"];

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            host: row.get("host")?,
            port: row.get("port")?,
        })
    }
}
