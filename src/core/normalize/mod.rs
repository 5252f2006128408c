pub mod company;
pub mod contact;
pub mod invite;
pub mod message;
pub mod saved_job;

use crate::core::header::TableSpec;

/// 六種可辨識的匯出檔種類；以檔名（不含路徑）不分大小寫的子字串比對
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Connections,
    Messages,
    Invitations,
    CompanyFollows,
    SavedJobs,
    JobApplications,
}

/// 路徑最後一段（同時接受 '/' 與 '\' 分隔）
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

impl FileKind {
    pub fn detect(file_name: &str) -> Option<FileKind> {
        let base = base_name(file_name).to_lowercase();
        if base.contains("connections") {
            Some(FileKind::Connections)
        } else if base.contains("messages") {
            Some(FileKind::Messages)
        } else if base.contains("invitations") {
            Some(FileKind::Invitations)
        } else if base.contains("company follows") {
            Some(FileKind::CompanyFollows)
        } else if base.contains("saved jobs") {
            Some(FileKind::SavedJobs)
        } else if base.contains("job applications") {
            Some(FileKind::JobApplications)
        } else {
            None
        }
    }

    /// 診斷彙總用的正典標籤
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Connections => "Connections",
            FileKind::Messages => "messages",
            FileKind::Invitations => "Invitations",
            FileKind::CompanyFollows => "Company Follows",
            FileKind::SavedJobs => "Saved Jobs",
            FileKind::JobApplications => "Job Applications",
        }
    }

    pub fn table_spec(&self) -> &'static TableSpec {
        match self {
            FileKind::Connections => &contact::TABLE,
            FileKind::Messages => &message::TABLE,
            FileKind::Invitations => &invite::TABLE,
            FileKind::CompanyFollows => &company::TABLE,
            // 儲存與已申請共用同一張欄位表
            FileKind::SavedJobs | FileKind::JobApplications => &saved_job::TABLE,
        }
    }
}

/// 空字串視為缺值
pub(crate) fn optional(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_base_name_case_insensitively() {
        assert_eq!(FileKind::detect("Connections.csv"), Some(FileKind::Connections));
        assert_eq!(
            FileKind::detect("export/COMPANY FOLLOWS.csv"),
            Some(FileKind::CompanyFollows)
        );
        assert_eq!(FileKind::detect("Saved Jobs.xlsx"), Some(FileKind::SavedJobs));
        assert_eq!(
            FileKind::detect("Job Applications.csv"),
            Some(FileKind::JobApplications)
        );
        assert_eq!(FileKind::detect("messages.csv"), Some(FileKind::Messages));
        assert_eq!(FileKind::detect("rich_media.csv"), None);
    }

    #[test]
    fn test_detect_ignores_directory_components() {
        // 目錄名含 "messages" 但檔名不含，不應誤判
        assert_eq!(FileKind::detect("messages/Connections.csv"), Some(FileKind::Connections));
        assert_eq!(FileKind::detect("archive\\Invitations.csv"), Some(FileKind::Invitations));
    }
}
