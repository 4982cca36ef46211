pub mod commit;
pub mod error;
pub mod schema;

pub use commit::{CommitOutcome, FormController};
pub use error::StoreError;

use std::path::{Path, PathBuf};
use std::time::Duration;

use prio_core::{Category, Initiative, InitiativeFields, InitiativeId, TimeHorizon, WorkStream};
use rusqlite::{params, Connection, OptionalExtension};

/// How long a write waits on another session's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str =
    "SELECT id, name, impact, feasibility, work_stream, time_horizon, description FROM initiatives";

/// Owner of the `initiatives` table.
///
/// `list_all` serves a cached snapshot; every write drops the cache before
/// returning, so the next read always reflects it.
pub struct InitiativeStore {
    conn: Connection,
    path: Option<PathBuf>,
    cache: Option<Vec<Initiative>>,
}

impl InitiativeStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        schema::install(&conn)?;
        tracing::debug!(path = %path.display(), "opened initiative store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
            cache: None,
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::install(&conn)?;
        Ok(Self {
            conn,
            path: None,
            cache: None,
        })
    }

    /// Backing file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn create(&mut self, fields: &InitiativeFields) -> Result<InitiativeId, StoreError> {
        self.invalidate();
        self.conn.execute(
            "INSERT INTO initiatives (name, impact, feasibility, work_stream, time_horizon, description) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.name,
                fields.impact,
                fields.feasibility,
                fields.work_stream.as_str(),
                fields.time_horizon.as_str(),
                fields.description,
            ],
        )?;
        let id = InitiativeId::new(self.conn.last_insert_rowid());
        tracing::info!(%id, name = %fields.name, "created initiative");
        Ok(id)
    }

    /// Every record in id order.
    pub fn list_all(&mut self) -> Result<Vec<Initiative>, StoreError> {
        if let Some(cached) = &self.cache {
            return Ok(cached.clone());
        }
        let records = self.load_all()?;
        self.cache = Some(records.clone());
        Ok(records)
    }

    /// Drops the cache and re-reads the table, picking up writes made by other
    /// sessions on the same file.
    pub fn refresh(&mut self) -> Result<Vec<Initiative>, StoreError> {
        self.invalidate();
        self.list_all()
    }

    /// Reads one record straight from the table, bypassing the cache.
    pub fn get(&self, id: InitiativeId) -> Result<Initiative, StoreError> {
        let raw = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id.get()],
                RawRow::from_row,
            )
            .optional()?;
        raw.ok_or(StoreError::NotFound(id))?.decode()
    }

    /// Replaces every mutable column of the record in one statement.
    pub fn update(&mut self, id: InitiativeId, fields: &InitiativeFields) -> Result<(), StoreError> {
        self.invalidate();
        let changed = self.conn.execute(
            "UPDATE initiatives SET name = ?2, impact = ?3, feasibility = ?4, \
             work_stream = ?5, time_horizon = ?6, description = ?7 WHERE id = ?1",
            params![
                id.get(),
                fields.name,
                fields.impact,
                fields.feasibility,
                fields.work_stream.as_str(),
                fields.time_horizon.as_str(),
                fields.description,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(%id, "updated initiative");
        Ok(())
    }

    pub fn delete(&mut self, id: InitiativeId) -> Result<(), StoreError> {
        self.invalidate();
        let changed = self
            .conn
            .execute("DELETE FROM initiatives WHERE id = ?1", [id.get()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(%id, "deleted initiative");
        Ok(())
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    fn load_all(&self) -> Result<Vec<Initiative>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;
        let raw = stmt
            .query_map([], RawRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        let records = raw
            .into_iter()
            .map(RawRow::decode)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = records.len(), "loaded initiatives");
        Ok(records)
    }
}

/// A row as SQLite hands it back, before the enum columns are checked.
struct RawRow {
    id: i64,
    name: String,
    impact: i64,
    feasibility: i64,
    work_stream: String,
    time_horizon: String,
    description: Option<String>,
}

impl RawRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            impact: row.get(2)?,
            feasibility: row.get(3)?,
            work_stream: row.get(4)?,
            time_horizon: row.get(5)?,
            description: row.get(6)?,
        })
    }

    fn decode(self) -> Result<Initiative, StoreError> {
        let work_stream =
            WorkStream::from_label(&self.work_stream).ok_or_else(|| StoreError::CorruptRow {
                id: self.id,
                column: "work_stream",
                value: self.work_stream.clone(),
            })?;
        let time_horizon =
            TimeHorizon::from_label(&self.time_horizon).ok_or_else(|| StoreError::CorruptRow {
                id: self.id,
                column: "time_horizon",
                value: self.time_horizon.clone(),
            })?;
        Ok(Initiative::new(
            InitiativeId::new(self.id),
            InitiativeFields {
                name: self.name,
                impact: self.impact,
                feasibility: self.feasibility,
                work_stream,
                time_horizon,
                description: self.description,
            },
        ))
    }
}
