//! SQLite-backed order store.
//!
//! Orders are persisted as full JSON snapshots in a `data_json` column, with
//! a few indexed columns alongside for listing. The composer only ever sees
//! the deserialized [`OrderAggregate`].

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ReportError;
use crate::model::OrderAggregate;

pub struct OrderStore {
    conn: Connection,
}

impl OrderStore {
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        let conn = Connection::open(path)?;
        configure_sqlite(&conn)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, ReportError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert or replace the full snapshot of one order.
    pub fn save_order(&self, order: &OrderAggregate) -> Result<(), ReportError> {
        let json = serde_json::to_string(order)?;
        self.conn.execute(
            r#"INSERT INTO orders (id, orderNumber, status, createdAt, data_json)
               VALUES (?1, ?2, ?3, ?4, ?5)
               ON CONFLICT(id) DO UPDATE SET
                   orderNumber = excluded.orderNumber,
                   status = excluded.status,
                   createdAt = excluded.createdAt,
                   data_json = excluded.data_json"#,
            params![order.id, order.order_number, order.status, order.created_at, json],
        )?;
        Ok(())
    }

    pub fn load_order(&self, id: &str) -> Result<OrderAggregate, ReportError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT data_json FROM orders WHERE id = ?1",
                params![id],
                |r| r.get(0),
            )
            .optional()?;

        match json {
            Some(j) => Ok(serde_json::from_str(&j)?),
            None => Err(ReportError::OrderNotFound(id.to_string())),
        }
    }

    /// `(id, order number, status)` of every stored order, newest first.
    pub fn list_orders(&self) -> Result<Vec<(String, String, String)>, ReportError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, orderNumber, status FROM orders ORDER BY createdAt DESC")?;
        let rows = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn configure_sqlite(conn: &Connection) -> Result<(), rusqlite::Error> {
    // Apply PRAGMAs on init (outside any transaction).
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;\n\
         PRAGMA synchronous = NORMAL;\n\
         PRAGMA foreign_keys = ON;\n\
         PRAGMA busy_timeout = 5000;\n",
    )?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(())
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY NOT NULL,
            orderNumber TEXT NOT NULL,
            status TEXT NOT NULL,
            createdAt TEXT NOT NULL,
            data_json TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_orders_createdAt ON orders (createdAt);
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::sample_order;

    #[test]
    fn save_then_load_round_trips_the_snapshot() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = sample_order();
        store.save_order(&order).unwrap();

        let loaded = store.load_order(&order.id).unwrap();
        assert_eq!(loaded.order_number, order.order_number);
        assert_eq!(loaded.vehicle.plate, order.vehicle.plate);
    }

    #[test]
    fn save_is_an_upsert() {
        let store = OrderStore::open_in_memory().unwrap();
        let mut order = sample_order();
        store.save_order(&order).unwrap();
        order.status = "COMPLETED".to_string();
        store.save_order(&order).unwrap();

        let loaded = store.load_order(&order.id).unwrap();
        assert_eq!(loaded.status, "COMPLETED");
        assert_eq!(store.list_orders().unwrap().len(), 1);
    }

    #[test]
    fn unknown_id_is_a_distinct_error() {
        let store = OrderStore::open_in_memory().unwrap();
        match store.load_order("no-such-order") {
            Err(ReportError::OrderNotFound(id)) => assert_eq!(id, "no-such-order"),
            other => panic!("expected OrderNotFound, got {other:?}"),
        }
    }
}
