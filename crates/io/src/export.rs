// Seating-chart export (CSV grid, JSON)
//
// The chart is drawn as seen from the back of the room: the back row comes
// first and the front row, next to the podium, comes last.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use seatplan_engine::{Classroom, SeatId};

use crate::delimited;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Csv,
    Json,
}

impl ChartFormat {
    /// Pick a format from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ChartFormat::Json,
            _ => ChartFormat::Csv,
        }
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ChartFormat::Csv),
            "json" => Ok(ChartFormat::Json),
            other => Err(format!("Unknown chart format '{}' (expected csv or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatingChart {
    pub rows: usize,
    pub cols: usize,
    /// Back row first.
    pub grid: Vec<Vec<String>>,
}

impl SeatingChart {
    pub fn from_classroom(classroom: &Classroom) -> Self {
        let layout = classroom.layout();
        let grid = (0..layout.rows())
            .rev()
            .map(|row| {
                (0..layout.cols())
                    .map(|col| {
                        let id = SeatId::new(row, col);
                        let label = layout.label(id);
                        match classroom.student_at(id) {
                            Some(student) => format!("{} {}", label, student.name),
                            None => label,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            grid,
        }
    }
}

pub fn export_chart(classroom: &Classroom, path: &Path, format: ChartFormat) -> Result<(), String> {
    let chart = SeatingChart::from_classroom(classroom);
    match format {
        ChartFormat::Csv => delimited::write_records(path, &chart.grid),
        ChartFormat::Json => {
            let file = File::create(path).map_err(|e| e.to_string())?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &chart).map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_engine::StudentFields;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> Classroom {
        let mut classroom = Classroom::new(3, 2).unwrap();
        let ada = classroom.add_student(StudentFields::named("Ada")).unwrap();
        let bob = classroom.add_student(StudentFields::named("Bob")).unwrap();
        classroom.assign(ada, SeatId::new(0, 0), None);
        classroom.assign(bob, SeatId::new(2, 1), None);
        classroom
    }

    #[test]
    fn test_chart_back_row_first() {
        let chart = SeatingChart::from_classroom(&sample());
        assert_eq!(chart.grid.len(), 3);
        assert_eq!(chart.grid[0], vec!["1-1", "1-2 Bob"]);
        assert_eq!(chart.grid[1], vec!["2-1", "2-2"]);
        assert_eq!(chart.grid[2], vec!["3-1 Ada", "3-2"]);
    }

    #[test]
    fn test_csv_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.csv");
        export_chart(&sample(), &path, ChartFormat::Csv).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let rows = delimited::records_from_string(&content, b',').unwrap();
        assert_eq!(rows.last().unwrap(), &vec!["3-1 Ada".to_string(), "3-2".to_string()]);
    }

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.json");
        export_chart(&sample(), &path, ChartFormat::from_path(&path)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows"], 3);
        assert_eq!(value["cols"], 2);
        assert_eq!(value["grid"][2][0], "3-1 Ada");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ChartFormat>().unwrap(), ChartFormat::Json);
        assert!("png".parse::<ChartFormat>().is_err());
        assert_eq!(ChartFormat::from_path(Path::new("a.txt")), ChartFormat::Csv);
    }
}
