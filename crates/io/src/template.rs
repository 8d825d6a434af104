// Blank roster template for import

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::delimited;

pub const TEMPLATE_HEADERS: [&str; 5] = ["姓名", "学号", "性别", "视力情况", "备注"];
pub const TEMPLATE_SHEET_NAME: &str = "学生名单";

const SAMPLE_ROWS: [[&str; 5]; 4] = [
    ["张三", "001", "男", "正常", "班长"],
    ["李四", "002", "女", "近视", "需要坐前排"],
    ["王五", "003", "男", "正常", ""],
    ["赵六", "004", "女", "戴眼镜", ""],
];

const COLUMN_WIDTHS: [f64; 5] = [12.0, 10.0, 8.0, 12.0, 20.0];

/// Write the template as `.xlsx`, or as `.csv` when the extension says so.
pub fn write_template(path: &Path) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => write_csv(path),
        "xlsx" => write_xlsx(path),
        _ => Err(format!("Template must be .xlsx or .csv, got .{}", ext)),
    }
}

fn template_rows() -> Vec<Vec<String>> {
    std::iter::once(&TEMPLATE_HEADERS)
        .chain(SAMPLE_ROWS.iter())
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn write_csv(path: &Path) -> Result<(), String> {
    delimited::write_records(path, &template_rows())
}

fn write_xlsx(path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name(TEMPLATE_SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet: {}", e))?;

    for (col, header) in TEMPLATE_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| e.to_string())?;
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTHS[col])
            .map_err(|e| e.to_string())?;
    }

    for (row, values) in SAMPLE_ROWS.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            // Student numbers are text so leading zeros survive
            worksheet
                .write_string(row as u32 + 1, col as u16, *value)
                .map_err(|e| e.to_string())?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))
}
