// CSV/TSV reading and writing

use std::io::Read;
use std::path::Path;

/// Read a delimited text file into rows of raw fields.
/// The delimiter is sniffed from the first lines.
pub fn read_records(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    records_from_string(&content, delimiter)
}

pub fn records_from_string(content: &str, delimiter: u8) -> Result<Vec<Vec<String>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map_or(1, |r| r.len())
}

/// Guess the separator of a roster export.
///
/// Rosters come from Excel "save as" (comma, or semicolon in some locales),
/// from pasting a sheet into a text file (tab), or from school systems that
/// use pipes. The header row has to split under a candidate; among those,
/// the candidate whose later rows keep the header's column count wins, with
/// wider headers preferred. Blank lines are ignored. Defaults to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];
    const SAMPLE_ROWS: usize = 10;

    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_ROWS)
        .collect();
    let Some((header, rows)) = sample.split_first() else {
        return b',';
    };

    CANDIDATES
        .iter()
        .filter_map(|&delimiter| {
            let columns = field_count(header, delimiter);
            if columns < 2 {
                return None;
            }
            let agreeing = 1 + rows.iter().filter(|row| field_count(row, delimiter) == columns).count();
            Some((agreeing * columns, delimiter))
        })
        // First candidate wins a tie
        .fold(None, |best: Option<(usize, u8)>, (score, delimiter)| match best {
            Some((best_score, _)) if best_score >= score => best,
            _ => Some((score, delimiter)),
        })
        .map_or(b',', |(_, delimiter)| delimiter)
}

/// Roster file contents as text. Files that are not valid UTF-8 are
/// decoded as Windows-1252; a leading byte-order mark is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("{}: not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Write rows as comma-separated text. Rows may differ in width.
pub fn write_records(path: &Path, rows: &[Vec<String>]) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for row in rows {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "姓名;学号;性别\n张三;001;男\n李四;002;女\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Id,Gender\nAlice,1,F\nBob,2,M\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tId\tGender\nAlice\t1\tF\nBob\t2\tM\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "Name;Notes;Gender\n\"Doe, Jane\";\"tall, sits back\";F\nBob;\"none\";M\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_pipe_after_blank_lines() {
        let content = "\n\nName|Id\nAlice|1\nBob|2\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Name\nAlice\nBob\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "José" in Windows-1252
        fs::write(&path, b"Name\nJos\xe9\n").unwrap();
        let text = read_file_as_utf8(&path).unwrap();
        assert_eq!(text, "Name\nJosé\n");
    }

    #[test]
    fn test_bom_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{FEFF}姓名,学号\n张三,001\n").unwrap();
        let rows = read_records(&path).unwrap();
        assert_eq!(rows[0], vec!["姓名", "学号"]);
        assert_eq!(rows[1], vec!["张三", "001"]);
    }

    #[test]
    fn test_write_then_read_ragged_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            vec!["a".to_string(), "b, c".to_string()],
            vec!["d".to_string()],
        ];
        write_records(&path, &rows).unwrap();
        assert_eq!(records_from_string(&fs::read_to_string(&path).unwrap(), b',').unwrap(), rows);
    }
}
