// Native .seatplan format using SQLite
//
// The classroom lives in a key/value `meta` table, one JSON value per
// bundle key. Named layouts share the file in their own table so saving
// the classroom never touches them.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use seatplan_engine::ClassroomBundle;

use crate::NATIVE_FORMAT_VERSION;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL            -- JSON
);

CREATE TABLE IF NOT EXISTS layouts (
    name TEXT PRIMARY KEY,
    saved_at TEXT NOT NULL,        -- RFC 3339
    data TEXT NOT NULL             -- JSON: rows, cols, seats, students
);
"#;

const VERSION_KEY: &str = "format_version";

/// Open (creating if needed) a native file with the current schema.
pub(crate) fn open(path: &Path) -> Result<Connection, String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
    Ok(conn)
}

/// Open an existing native file without creating it.
pub(crate) fn open_existing(path: &Path) -> Result<Connection, String> {
    if !path.exists() {
        return Err(format!("{}: no such file", path.display()));
    }
    open(path)
}

pub fn save(bundle: &ClassroomBundle, path: &Path) -> Result<(), String> {
    let mut conn = open(path)?;

    let Value::Object(fields) = serde_json::to_value(bundle).map_err(|e| e.to_string())? else {
        return Err("classroom did not serialize to an object".to_string());
    };

    // Rewrite the whole classroom in one transaction
    let tx = conn.transaction().map_err(|e| e.to_string())?;
    tx.execute("DELETE FROM meta", []).map_err(|e| e.to_string())?;
    tx.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)",
        params![VERSION_KEY, NATIVE_FORMAT_VERSION.to_string()],
    )
    .map_err(|e| e.to_string())?;

    for (key, value) in &fields {
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)",
            params![key, value.to_string()],
        )
        .map_err(|e| e.to_string())?;
    }
    tx.commit().map_err(|e| e.to_string())?;

    log::info!(
        "saved {} ({} students, {}x{})",
        path.display(),
        bundle.students.len(),
        bundle.rows,
        bundle.cols
    );
    Ok(())
}

/// Load the stored bundle. Missing keys take the bundle defaults, so an
/// empty file yields a fresh 8x6 classroom.
pub fn load(path: &Path) -> Result<ClassroomBundle, String> {
    let conn = open_existing(path)?;

    let version: Option<String> = conn
        .query_row("SELECT value FROM meta WHERE key = ?1", [VERSION_KEY], |row| row.get(0))
        .optional()
        .map_err(|e| e.to_string())?;
    if let Some(version) = version {
        let version: u32 = version
            .parse()
            .map_err(|_| format!("invalid format version '{}'", version))?;
        if version > NATIVE_FORMAT_VERSION {
            return Err(format!(
                "{} was written by a newer version (format {}, this build reads {})",
                path.display(),
                version,
                NATIVE_FORMAT_VERSION
            ));
        }
    }

    let mut stmt = conn
        .prepare("SELECT key, value FROM meta WHERE key != ?1")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([VERSION_KEY], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(|e| e.to_string())?;

    let mut fields = Map::new();
    for row in rows {
        let (key, text) = row.map_err(|e| e.to_string())?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| format!("corrupt value for '{}': {}", key, e))?;
        fields.insert(key, value);
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| format!("corrupt classroom data: {}", e))
}
