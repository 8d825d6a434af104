// Roster import from spreadsheets (csv, tsv, xlsx, xls, ods)
//
// Parsing only. The rows it accepts are handed to the engine's import
// reconciler, which decides create/update/skip against the live roster.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use serde::Serialize;

use seatplan_engine::{Gender, ImportRow};

use crate::delimited;

const NAME_KEYS: &[&str] = &["姓名", "名字", "name"];
const ID_KEYS: &[&str] = &["学号", "编号", "id", "number"];
const GENDER_KEYS: &[&str] = &["性别", "gender"];
const VISION_KEYS: &[&str] = &["视力", "近视", "眼镜", "vision", "情况"];
const NOTES_KEYS: &[&str] = &["备注", "说明", "note", "remark"];

/// Vision answers that mean the student should sit in the front band.
const FRONT_SEAT_KEYS: &[&str] = &["近视", "不佳", "戴眼镜", "眼镜", "poor", "bad", "yes", "是", "需要"];

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based spreadsheet row; the header is row 1 when it is the first row.
    pub row: usize,
    pub reason: String,
    /// Raw cells, for display.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRoster {
    pub accepted: Vec<ImportRow>,
    pub rejected: Vec<RejectedRow>,
}

/// Column positions found in the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub id: Option<usize>,
    pub gender: Option<usize>,
    pub vision: Option<usize>,
    pub notes: Option<usize>,
}

impl ColumnMap {
    /// Map header cells to fields. A header may feed more than one field,
    /// and when several headers match a field the rightmost one wins.
    pub fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (index, header) in headers.iter().enumerate() {
            let key = normalize_header(header);
            if key.is_empty() {
                continue;
            }
            let matches = |keys: &[&str]| keys.iter().any(|k| key.contains(k));
            if matches(NAME_KEYS) {
                map.name = Some(index);
            }
            if matches(ID_KEYS) {
                map.id = Some(index);
            }
            if matches(GENDER_KEYS) {
                map.gender = Some(index);
            }
            if matches(VISION_KEYS) {
                map.vision = Some(index);
            }
            if matches(NOTES_KEYS) {
                map.notes = Some(index);
            }
        }
        map
    }
}

/// Trim, drop zero-width characters and all whitespace, lowercase.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(*c, '\u{200B}'..='\u{200D}' | '\u{FEFF}') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn parse_gender(text: &str) -> Gender {
    let text = text.trim().to_lowercase();
    if text.contains('女') || text.contains("female") || text == "f" {
        Gender::Female
    } else if text.contains('男') || text.contains("male") || text == "m" {
        Gender::Male
    } else {
        Gender::Unspecified
    }
}

pub fn needs_front_seat(vision: &str) -> bool {
    let vision = vision.trim().to_lowercase();
    FRONT_SEAT_KEYS.iter().any(|k| vision.contains(k))
}

/// Parse a roster file, choosing the reader by extension.
pub fn parse_file(path: &Path) -> Result<ParsedRoster, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "csv" | "tsv" | "txt" => delimited::read_records(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_spreadsheet(path)?,
        _ => return Err(format!("Unsupported roster file type: .{}", ext)),
    };

    log::debug!("{}: read {} rows", path.display(), rows.len());
    parse_rows(&rows)
}

/// Read the first sheet as text cells. Leading empty rows are kept so row
/// numbers match what the user sees in the spreadsheet.
fn read_spreadsheet(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("Failed to open spreadsheet: {}", e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| "Spreadsheet contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_col];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Student numbers come through as floats; keep them integral
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Turn raw rows into import rows. The first non-empty row is the header.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<ParsedRoster, String> {
    let is_blank = |row: &Vec<String>| row.iter().all(|c| c.trim().is_empty());

    let header_index = rows
        .iter()
        .position(|row| !is_blank(row))
        .ok_or_else(|| "File is empty".to_string())?;

    let columns = ColumnMap::from_headers(&rows[header_index]);
    let Some(name_col) = columns.name else {
        return Err("No name column found (expected a header such as 姓名 or Name)".to_string());
    };

    let cell = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|c| row.get(c))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let optional = |text: String| if text.is_empty() { None } else { Some(text) };

    let mut parsed = ParsedRoster::default();
    for (index, row) in rows.iter().enumerate().skip(header_index + 1) {
        if is_blank(row) {
            continue;
        }
        let row = row.as_slice();

        let name = cell(row, Some(name_col));
        if name.is_empty() {
            parsed.rejected.push(RejectedRow {
                row: index + 1,
                reason: "name is empty".to_string(),
                cells: row.to_vec(),
            });
            continue;
        }

        parsed.accepted.push(ImportRow {
            name,
            external_id: optional(cell(row, columns.id)),
            gender: parse_gender(&cell(row, columns.gender)),
            needs_front_seat: needs_front_seat(&cell(row, columns.vision)),
            notes: optional(cell(row, columns.notes)),
        });
    }

    if !parsed.rejected.is_empty() {
        log::info!("roster import: {} rows rejected", parsed.rejected.len());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| line.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Student\u{200B} Name "), "studentname");
        assert_eq!(normalize_header("\u{FEFF}视力 情况"), "视力情况");
    }

    #[test]
    fn test_column_map_chinese_template() {
        let headers = rows(&[&["姓名", "学号", "性别", "视力情况", "备注"]]).remove(0);
        let map = ColumnMap::from_headers(&headers);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.id, Some(1));
        assert_eq!(map.gender, Some(2));
        assert_eq!(map.vision, Some(3));
        assert_eq!(map.notes, Some(4));
    }

    #[test]
    fn test_column_map_later_match_wins() {
        let headers = rows(&[&["Name", "Nickname", "Gender"]]).remove(0);
        let map = ColumnMap::from_headers(&headers);
        assert_eq!(map.name, Some(1));
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(parse_gender("男"), Gender::Male);
        assert_eq!(parse_gender("女"), Gender::Female);
        assert_eq!(parse_gender("Female"), Gender::Female);
        assert_eq!(parse_gender("male"), Gender::Male);
        assert_eq!(parse_gender(" M "), Gender::Male);
        assert_eq!(parse_gender("f"), Gender::Female);
        assert_eq!(parse_gender("unknown"), Gender::Unspecified);
        assert_eq!(parse_gender(""), Gender::Unspecified);
    }

    #[test]
    fn test_vision_keywords() {
        assert!(needs_front_seat("近视"));
        assert!(needs_front_seat("戴眼镜"));
        assert!(needs_front_seat("Poor"));
        assert!(needs_front_seat("需要坐前排"));
        assert!(!needs_front_seat("正常"));
        assert!(!needs_front_seat(""));
    }

    #[test]
    fn test_parse_rows_accepts_and_rejects() {
        let data = rows(&[
            &["姓名", "学号", "性别", "视力情况", "备注"],
            &["张三", "001", "男", "正常", "班长"],
            &["", "", "", "", ""],
            &["", "002", "女", "近视", ""],
            &["王五", "", "", "近视", ""],
        ]);
        let parsed = parse_rows(&data).unwrap();

        assert_eq!(parsed.accepted.len(), 2);
        let first = &parsed.accepted[0];
        assert_eq!(first.name, "张三");
        assert_eq!(first.external_id.as_deref(), Some("001"));
        assert_eq!(first.gender, Gender::Male);
        assert!(!first.needs_front_seat);
        assert_eq!(first.notes.as_deref(), Some("班长"));

        let second = &parsed.accepted[1];
        assert_eq!(second.external_id, None);
        assert!(second.needs_front_seat);

        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].row, 4);
    }

    #[test]
    fn test_short_rows_and_leading_blank_rows() {
        let data = rows(&[&[], &["Name", "Vision"], &["Ada"]]);
        let parsed = parse_rows(&data).unwrap();
        assert_eq!(parsed.accepted.len(), 1);
        assert!(!parsed.accepted[0].needs_front_seat);
    }

    #[test]
    fn test_missing_name_column_is_error() {
        let data = rows(&[&["学号", "性别"], &["001", "男"]]);
        assert!(parse_rows(&data).is_err());
        assert!(parse_rows(&[]).is_err());
    }

    #[test]
    fn test_parse_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        fs::write(&path, "Name;Gender;Vision\nAda;F;poor\nAlan;M;ok\n").unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.accepted.len(), 2);
        assert_eq!(parsed.accepted[0].gender, Gender::Female);
        assert!(parsed.accepted[0].needs_front_seat);
        assert!(!parsed.accepted[1].needs_front_seat);
    }

    #[test]
    fn test_parse_template_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        crate::template::write_template(&path).unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.accepted.len(), 4);
        assert_eq!(parsed.accepted[0].name, "张三");
        assert_eq!(parsed.accepted[0].external_id.as_deref(), Some("001"));
        assert!(parsed.accepted[1].needs_front_seat);
        assert_eq!(parsed.accepted[1].gender, Gender::Female);
        assert!(parsed.accepted[3].needs_front_seat);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_file(Path::new("roster.pdf")).unwrap_err();
        assert!(err.contains(".pdf"));
    }
}
