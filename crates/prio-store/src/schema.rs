use rusqlite::Connection;

use crate::StoreError;

pub const TABLE: &str = "initiatives";

/// Revision of the table shape created by [`install`]. Revisions 1 and 2
/// lacked `time_horizon` and `description`; their tables are set aside, not
/// migrated.
pub const SCHEMA_REVISION: i64 = 3;

pub const COLUMNS: [&str; 7] = [
    "id",
    "name",
    "impact",
    "feasibility",
    "work_stream",
    "time_horizon",
    "description",
];

const CREATE_SQL: &str = "
CREATE TABLE IF NOT EXISTS initiatives (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT    NOT NULL,
    impact       INTEGER NOT NULL,
    feasibility  INTEGER NOT NULL,
    work_stream  TEXT    NOT NULL,
    time_horizon TEXT    NOT NULL,
    description  TEXT
);
";

/// Creates the table at the current revision. A table left by an older
/// revision survives `CREATE TABLE IF NOT EXISTS`, so one missing columns is
/// renamed to `initiatives_rev<N>` and a fresh table takes its place.
pub fn install(conn: &Connection) -> Result<(), StoreError> {
    let present = table_columns(conn, TABLE)?;
    let missing = missing_columns(&present);

    let tx = conn.unchecked_transaction()?;
    if !present.is_empty() && !missing.is_empty() {
        let retired = retire_legacy_table(&tx, legacy_revision(&present))?;
        tracing::warn!(
            missing = %missing.join(", "),
            retired = %retired,
            "existing initiatives table predates the current schema; starting a fresh table"
        );
    }
    tx.execute_batch(CREATE_SQL)?;
    if user_version(&tx)? < SCHEMA_REVISION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_REVISION};"))?;
    }
    tx.commit()?;

    tracing::debug!(revision = SCHEMA_REVISION, "schema ready");
    Ok(())
}

pub fn user_version(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Column names of `table`, empty when the table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn missing_columns(present: &[String]) -> Vec<&'static str> {
    COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.iter().any(|p| p == c))
        .collect()
}

// Revision 2 added time_horizon, revision 3 description.
fn legacy_revision(present: &[String]) -> i64 {
    if present.iter().any(|c| c == "time_horizon") {
        2
    } else {
        1
    }
}

fn retire_legacy_table(conn: &Connection, revision: i64) -> Result<String, StoreError> {
    let base = format!("{TABLE}_rev{revision}");
    let mut name = base.clone();
    let mut n = 1;
    while !table_columns(conn, &name)?.is_empty() {
        n += 1;
        name = format!("{base}_{n}");
    }
    conn.execute_batch(&format!("ALTER TABLE {TABLE} RENAME TO {name};"))?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        install(&conn).unwrap();
        install(&conn).unwrap();
        assert_eq!(user_version(&conn).unwrap(), SCHEMA_REVISION);
    }

    #[test]
    fn legacy_table_is_replaced_by_a_fresh_one() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE initiatives (
                id INTEGER PRIMARY KEY,
                name TEXT,
                impact INTEGER,
                feasibility INTEGER,
                work_stream TEXT
            );
            INSERT INTO initiatives (name, impact, feasibility, work_stream)
                VALUES ('old', 4, 4, 'Finance');",
        )
        .unwrap();

        install(&conn).unwrap();

        assert_eq!(table_columns(&conn, TABLE).unwrap(), COLUMNS);
        assert_eq!(user_version(&conn).unwrap(), SCHEMA_REVISION);
        let fresh: i64 = conn
            .query_row("SELECT COUNT(*) FROM initiatives", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fresh, 0);
        let kept: String = conn
            .query_row("SELECT name FROM initiatives_rev1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kept, "old");
    }

    #[test]
    fn repeated_legacy_tables_get_distinct_names() {
        let conn = Connection::open_in_memory().unwrap();
        for _ in 0..2 {
            conn.execute_batch(
                "DROP TABLE IF EXISTS initiatives;
                 CREATE TABLE initiatives (
                    id INTEGER PRIMARY KEY, name TEXT, impact INTEGER,
                    feasibility INTEGER, work_stream TEXT, time_horizon TEXT
                 );",
            )
            .unwrap();
            install(&conn).unwrap();
        }
        assert!(!table_columns(&conn, "initiatives_rev2").unwrap().is_empty());
        assert!(!table_columns(&conn, "initiatives_rev2_2").unwrap().is_empty());
        assert_eq!(table_columns(&conn, TABLE).unwrap(), COLUMNS);
    }
}
