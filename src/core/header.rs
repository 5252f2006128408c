use std::collections::HashMap;

/// 標頭掃描窗：真正的標頭列必須出現在前 10 列內
pub const HEADER_SCAN_WINDOW: usize = 10;

/// 欄位別名：逐字比對（不分大小寫）或正規表達式樣式
#[derive(Debug)]
pub enum Alias {
    Exact(&'static str),
    Pattern(&'static str),
}

/// 邏輯欄位與其依優先序排列的別名
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [Alias],
}

/// 一種檔案的宣告式標頭描述：標記儲存格與欄位別名表。
/// 所有記錄種類共用同一個解析器，別名只是資料。
#[derive(Debug)]
pub struct TableSpec {
    pub markers: &'static [&'static str],
    pub fields: &'static [FieldSpec],
}

/// 邏輯欄位名 → 欄位置
pub type HeaderMap = HashMap<&'static str, usize>;

/// 在掃描窗內尋找含標記儲存格的真正標頭列；其前方皆為說明性前導列
pub fn find_header(rows: &[Vec<String>], spec: &TableSpec) -> Option<usize> {
    rows.iter().take(HEADER_SCAN_WINDOW).position(|row| {
        row.iter()
            .any(|cell| spec.markers.iter().any(|marker| cell.eq_ignore_ascii_case(marker)))
    })
}

/// 對每個邏輯欄位取第一個命中任何標頭儲存格的別名；沒命中的欄位讀起來是空值,
/// 要丟列還是給預設值由各正規化器決定
pub fn resolve_fields(header: &[String], spec: &TableSpec) -> HeaderMap {
    let mut map = HeaderMap::new();
    for field in spec.fields {
        for alias in field.aliases {
            let column = match alias {
                Alias::Exact(literal) => header
                    .iter()
                    .position(|cell| cell.eq_ignore_ascii_case(literal)),
                Alias::Pattern(pattern) => {
                    let re = regex::RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .expect("invalid field alias pattern");
                    header.iter().position(|cell| re.is_match(cell))
                }
            };
            if let Some(index) = column {
                map.insert(field.name, index);
                break;
            }
        }
    }
    map
}

/// 依標頭映射取出一列中的欄位值；未解析的欄位與短列都回空字串
pub fn field<'a>(row: &'a [String], headers: &HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|&index| row.get(index))
        .map(|cell| cell.as_str())
        .unwrap_or("")
}

/// 正規化後完全沒有內容的列，在欄位抽取前就丟棄
pub fn row_is_empty(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: TableSpec = TableSpec {
        markers: &["First Name"],
        fields: &[
            FieldSpec {
                name: "first_name",
                aliases: &[Alias::Exact("First Name")],
            },
            FieldSpec {
                name: "url",
                aliases: &[Alias::Exact("URL"), Alias::Pattern(r"profile\s*url")],
            },
        ],
    };

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_find_header_skips_preamble() {
        let table = rows(&[
            &["Notes:"],
            &["Some descriptive text about the export"],
            &["First Name", "Last Name", "URL"],
            &["Jane", "Doe", "https://example.com/in/jane"],
        ]);
        assert_eq!(find_header(&table, &TABLE), Some(2));
    }

    #[test]
    fn test_find_header_is_case_insensitive() {
        let table = rows(&[&["FIRST NAME", "LAST NAME"]]);
        assert_eq!(find_header(&table, &TABLE), Some(0));
    }

    #[test]
    fn test_find_header_respects_scan_window() {
        let mut table = rows(&[]);
        for _ in 0..HEADER_SCAN_WINDOW {
            table.push(vec!["preamble".to_string()]);
        }
        table.push(vec!["First Name".to_string()]);
        assert_eq!(find_header(&table, &TABLE), None);
    }

    #[test]
    fn test_resolve_fields_first_alias_wins() {
        let header = vec![
            "First Name".to_string(),
            "Sender Profile URL".to_string(),
            "URL".to_string(),
        ];
        let map = resolve_fields(&header, &TABLE);
        assert_eq!(map.get("first_name"), Some(&0));
        // Exact("URL") 優先於樣式別名
        assert_eq!(map.get("url"), Some(&2));
    }

    #[test]
    fn test_unresolved_field_reads_empty() {
        let header = vec!["First Name".to_string()];
        let map = resolve_fields(&header, &TABLE);
        let row = vec!["Jane".to_string()];
        assert_eq!(field(&row, &map, "url"), "");
        assert_eq!(field(&row, &map, "first_name"), "Jane");
    }

    #[test]
    fn test_short_row_reads_empty() {
        let header = vec!["First Name".to_string(), "URL".to_string()];
        let map = resolve_fields(&header, &TABLE);
        let row = vec!["Jane".to_string()];
        assert_eq!(field(&row, &map, "url"), "");
    }

    #[test]
    fn test_row_is_empty() {
        assert!(row_is_empty(&[String::new(), String::new()]));
        assert!(!row_is_empty(&["x".to_string()]));
        assert!(row_is_empty(&[]));
    }
}
