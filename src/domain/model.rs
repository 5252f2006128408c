use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單一輸入檔案（ZIP、CSV 或 XLSX 的原始位元組）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    FromSelf,
    FromCounterpart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteDirection {
    Sent,
    Received,
}

impl InviteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteDirection::Sent => "sent",
            InviteDirection::Received => "received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub connected_at: Option<DateTime<Utc>>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_key: String,
    pub direction: MessageDirection,
    pub counterpart: Option<String>,
    pub body: String,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub id: String,
    pub direction: InviteDirection,
    pub counterpart_name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFollow {
    pub id: String,
    pub company: String,
    pub followed_at: Option<DateTime<Utc>>,
}

/// 儲存的職缺；「已申請」的列也落在這裡，來源檔案種類不保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: String,
    pub company: String,
    pub title: String,
    pub saved_at: Option<DateTime<Utc>>,
}

/// 每次解析的診斷彙總：處理過的檔案標籤、逐標籤列數、依序的警告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub files_processed: Vec<String>,
    pub rows: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
}

impl ParseSummary {
    pub fn record_file(&mut self, label: &str, row_count: usize) {
        self.files_processed.push(label.to_string());
        *self.rows.entry(label.to_string()).or_insert(0) += row_count;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// 單次解析呼叫的完整結果；永遠整體替換，不做原地修補
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub contacts: Vec<Contact>,
    pub messages: Vec<Message>,
    pub invites: Vec<Invite>,
    pub company_follows: Vec<CompanyFollow>,
    pub saved_jobs: Vec<SavedJob>,
    pub summary: ParseSummary,
}
