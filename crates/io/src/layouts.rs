// Named layouts stored beside the classroom in the native file

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use seatplan_engine::{Classroom, Seat, Student};

use crate::native;

/// A saved arrangement. The roster at save time is kept for reference;
/// loading only brings back the seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedLayout {
    pub seats: Vec<Seat>,
    pub students: Vec<Student>,
    pub rows: usize,
    pub cols: usize,
    pub saved_at: DateTime<Utc>,
}

impl NamedLayout {
    pub fn capture(classroom: &Classroom) -> Self {
        let layout = classroom.layout();
        Self {
            seats: layout.seats().to_vec(),
            students: classroom.roster().students().to_vec(),
            rows: layout.rows(),
            cols: layout.cols(),
            saved_at: Utc::now(),
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_occupied()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

fn check_name(name: &str) -> Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        Err("layout name cannot be empty".to_string())
    } else {
        Ok(name)
    }
}

/// Save the current arrangement under `name`, replacing any layout with
/// the same name.
pub fn save_named_layout(path: &Path, name: &str, classroom: &Classroom) -> Result<NamedLayout, String> {
    let name = check_name(name)?;
    let layout = NamedLayout::capture(classroom);
    let data = serde_json::to_string(&layout).map_err(|e| e.to_string())?;

    let conn = native::open(path)?;
    conn.execute(
        "INSERT OR REPLACE INTO layouts (name, saved_at, data) VALUES (?1, ?2, ?3)",
        params![name, layout.saved_at.to_rfc3339(), data],
    )
    .map_err(|e| e.to_string())?;

    log::info!("saved layout '{}' ({} seats occupied)", name, layout.occupied_count());
    Ok(layout)
}

/// Saved layouts, oldest first.
pub fn list_named_layouts(path: &Path) -> Result<Vec<LayoutInfo>, String> {
    let conn = native::open_existing(path)?;
    let mut stmt = conn
        .prepare("SELECT name, saved_at FROM layouts ORDER BY saved_at, name")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(|e| e.to_string())?;

    let mut layouts = Vec::new();
    for row in rows {
        let (name, saved_at) = row.map_err(|e| e.to_string())?;
        let saved_at = DateTime::parse_from_rfc3339(&saved_at)
            .map_err(|e| format!("layout '{}': bad timestamp: {}", name, e))?
            .with_timezone(&Utc);
        layouts.push(LayoutInfo { name, saved_at });
    }
    Ok(layouts)
}

pub fn load_named_layout(path: &Path, name: &str) -> Result<Option<NamedLayout>, String> {
    let name = check_name(name)?;
    let conn = native::open_existing(path)?;
    let data: Option<String> = conn
        .query_row("SELECT data FROM layouts WHERE name = ?1", [name], |row| row.get(0))
        .optional()
        .map_err(|e| e.to_string())?;

    data.map(|data| serde_json::from_str(&data).map_err(|e| format!("layout '{}' is corrupt: {}", name, e)))
        .transpose()
}

/// Returns false when no layout has that name.
pub fn delete_named_layout(path: &Path, name: &str) -> Result<bool, String> {
    let name = check_name(name)?;
    let conn = native::open_existing(path)?;
    let removed = conn
        .execute("DELETE FROM layouts WHERE name = ?1", [name])
        .map_err(|e| e.to_string())?;
    Ok(removed > 0)
}
