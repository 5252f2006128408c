use crate::utils::error::{EtlError, Result};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

/// 兩種讀取器共用的儲存格正規化：去 BOM、修剪、壓縮連續空白
pub fn clean_cell(raw: &str) -> String {
    let stripped = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 讀取分隔文字為列的矩陣。不假設首列是標頭，保留原始列結構，
/// 讓標頭解析器自行掃過說明性前導列。
pub fn read_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(clean_cell).collect());
    }
    Ok(rows)
}

/// 讀取試算表的第一個工作表；缺格一律視為空字串
pub fn read_xlsx(data: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = Xlsx::new(Cursor::new(data))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EtlError::ProcessingError {
            message: "Workbook has no sheets".to_string(),
        })??;

    let mut rows = Vec::new();
    for row in range.rows() {
        rows.push(
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::DateTime(dt) => dt
                        .as_datetime()
                        .map(|naive| naive.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default(),
                    other => clean_cell(&other.to_string()),
                })
                .collect(),
        );
    }
    Ok(rows)
}
