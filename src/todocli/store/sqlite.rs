//! SQLite-backed production store.
//!
//! # Invariants
//! - The connection runs in `EXCLUSIVE` locking mode; the lock taken while the
//!   tables are ensured at open is held until the connection closes.
//! - `todos` and `idgen` exist once `open` returns, and re-opening never
//!   touches existing rows.
//! - Every write commits before the call returns (`synchronous = FULL`).

use super::{advance_counter, ItemStore, Items};
use crate::error::{Result, TodoError};
use crate::model::{Identifier, TodoItem, COUNTER_KEY};
use log::{debug, info};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const TODOS_TABLE: &str = "todos";
const IDGEN_TABLE: &str = "idgen";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (key TEXT PRIMARY KEY NOT NULL, value BLOB NOT NULL);
CREATE TABLE IF NOT EXISTS idgen (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL);
";

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// How long to wait for another holder to release the file. Zero fails at once.
    pub lock_timeout: Duration,
}

pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if absent) the store file at `path` and take the exclusive hold.
    pub fn open(path: impl AsRef<Path>, options: &StoreOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();
        info!(
            "event=store_open status=start path={}",
            path.display()
        );

        match Self::open_inner(&path, options) {
            Ok(store) => {
                info!(
                    "event=store_open status=ok path={} duration_ms={}",
                    path.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                debug!(
                    "event=store_open status=error path={} duration_ms={} error={}",
                    path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn open_inner(path: &Path, options: &StoreOptions) -> Result<Self> {
        create_owner_only(path).map_err(|e| TodoError::open_failure(path, e))?;

        let mut conn = Connection::open(path).map_err(|e| open_error(path, e))?;
        conn.busy_timeout(options.lock_timeout)
            .map_err(|e| open_error(path, e))?;
        conn.query_row("PRAGMA locking_mode = EXCLUSIVE", [], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| open_error(path, e))?;
        conn.execute_batch("PRAGMA synchronous = FULL;")
            .map_err(|e| open_error(path, e))?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Exclusive)
            .map_err(|e| open_error(path, e))?;
        tx.execute_batch(SCHEMA).map_err(|e| open_error(path, e))?;
        tx.commit().map_err(|e| open_error(path, e))?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemStore for SqliteStore {
    fn next_id(&mut self) -> Result<Identifier> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| TodoError::write_failure("begin id allocation", e))?;
        require_table(&tx, IDGEN_TABLE)?;

        let raw = tx
            .query_row(
                "SELECT value FROM idgen WHERE key = ?1",
                [COUNTER_KEY],
                |row| value_bytes(row, 0),
            )
            .optional()?;

        // Dropping `tx` on the error path rolls back; the counter stays as found.
        let next = match advance_counter(raw.as_deref()) {
            Ok(next) => next,
            Err(err) => {
                debug!("event=next_id status=error error={}", err);
                return Err(err);
            }
        };

        tx.execute(
            "INSERT OR REPLACE INTO idgen (key, value) VALUES (?1, ?2)",
            params![COUNTER_KEY, next.key()],
        )
        .map_err(|e| TodoError::write_failure("update id counter", e))?;
        tx.commit()
            .map_err(|e| TodoError::write_failure("commit id counter", e))?;

        debug!("event=next_id status=ok id={}", next);
        Ok(next)
    }

    fn put_item(&mut self, id: &Identifier, text: &[u8]) -> Result<()> {
        require_table(&self.conn, TODOS_TABLE)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO todos (key, value) VALUES (?1, ?2)",
                params![id.key(), text],
            )
            .map_err(|e| TodoError::write_failure("put item", e))?;
        debug!("event=put_item status=ok id={} bytes={}", id, text.len());
        Ok(())
    }

    fn remove_item(&mut self, id: &str) -> Result<()> {
        require_table(&self.conn, TODOS_TABLE)?;
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE key = ?1", [id])
            .map_err(|e| TodoError::write_failure("remove item", e))?;
        debug!("event=remove_item status=ok id={} present={}", id, removed > 0);
        Ok(())
    }

    fn items(&self) -> Result<Items> {
        require_table(&self.conn, TODOS_TABLE)?;
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM todos ORDER BY key")?;
        let items = stmt
            .query_map([], |row| {
                Ok(TodoItem::new(row.get::<_, String>(0)?, value_bytes(row, 1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("event=list_items status=ok count={}", items.len());
        Ok(Items::new(items))
    }

    fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, e)| TodoError::write_failure("close store", e))?;
        info!("event=store_close status=ok path={}", path.display());
        Ok(())
    }
}

fn create_owner_only(path: &Path) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path).map(|_| ())
}

fn open_error(path: &Path, err: rusqlite::Error) -> TodoError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(e.code, ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) =>
        {
            TodoError::DataCorruption(format!("{} is not a valid store: {}", path.display(), err))
        }
        _ => TodoError::open_failure(path, err),
    }
}

fn require_table(conn: &Connection, name: &str) -> Result<()> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |_| Ok(()),
        )
        .optional()?;
    found.ok_or_else(|| TodoError::DataCorruption(format!("mapping `{name}` is missing")))
}

fn value_bytes(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<u8>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(b) | ValueRef::Blob(b) => b.to_vec(),
        ValueRef::Integer(i) => i.to_string().into_bytes(),
        ValueRef::Real(f) => f.to_string().into_bytes(),
        ValueRef::Null => Vec::new(),
    })
}
