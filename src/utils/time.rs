use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// 依序嘗試的日期時間格式；先長格式再短格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y, %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"];

/// 將匯出檔中的日期文字正規化為 UTC 時刻。
/// 先去除尾端的 " UTC" 字樣再解析；空字串或無法解析回傳 None，
/// 「沒有日期」與「壞日期」的區分由呼叫端依原始輸入是否為空判斷。
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let mut text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(tail) = text.len().checked_sub(4).and_then(|at| text.get(at..)) {
        if tail.eq_ignore_ascii_case(" utc") {
            text = text[..text.len() - 4].trim_end();
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// RFC 3339、秒精度、'Z' 結尾的標準字串；None 時為空字串（身分雜湊用）
pub fn canonical(instant: &Option<DateTime<Utc>>) -> String {
    match instant {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => String::new(),
    }
}

/// UTC 日曆日期（訊息分組的粗略後援鍵）
pub fn day_bucket(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}
