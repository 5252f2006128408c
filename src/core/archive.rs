use crate::core::normalize::FileKind;
use crate::domain::model::{InputFile, ParseSummary};
use std::io::{Cursor, Read};

/// 展開 ZIP 匯出檔，只保留可辨識的條目。
/// messages 家族只有頂層的 messages.csv 是正典；其他路徑含
/// "messages" 的條目是輔助訊息檔，一律排除並各留一則警告，
/// 避免重複或部分的對話匯出污染討論串資料。
/// 單一條目失敗只略過該條目；整個壓縮檔打不開則略過整個檔案，
/// 兩者都以警告記錄，不中斷整體執行。
pub fn expand_archive(
    archive_name: &str,
    data: &[u8],
    summary: &mut ParseSummary,
) -> Vec<InputFile> {
    let mut archive = match zip::ZipArchive::new(Cursor::new(data)) {
        Ok(archive) => archive,
        Err(error) => {
            summary.warn(format!(
                "Failed to open archive '{}': {}",
                archive_name, error
            ));
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(error) => {
                summary.warn(format!(
                    "Failed to read entry #{} in '{}': {}",
                    index, archive_name, error
                ));
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let path = entry.name().to_string();
        let Some(kind) = FileKind::detect(&path) else {
            continue;
        };

        if kind == FileKind::Messages && !path.eq_ignore_ascii_case("messages.csv") {
            summary.warn(format!("Skipping auxiliary message file '{}'", path));
            continue;
        }

        let mut content = Vec::new();
        if let Err(error) = entry.read_to_end(&mut content) {
            summary.warn(format!(
                "Failed to extract '{}' from '{}': {}",
                path, archive_name, error
            ));
            continue;
        }

        entries.push(InputFile::new(path, content));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file::<_, ()>(*name, FileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_keeps_only_recognized_entries() {
        let data = build_archive(&[
            ("Connections.csv", "First Name,Last Name\nJane,Doe\n"),
            ("Rich Media.csv", "irrelevant\n"),
            ("Company Follows.csv", "Organization,Followed On\nAcme,2024-01-02\n"),
        ]);
        let mut summary = ParseSummary::default();
        let entries = expand_archive("export.zip", &data, &mut summary);

        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Connections.csv", "Company Follows.csv"]);
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_auxiliary_message_files_warn_and_skip() {
        let data = build_archive(&[
            ("messages.csv", "From,To,Date,Content\nYou,Sarah,2024-01-02,hello\n"),
            ("archive/messages-2023.csv", "old conversations\n"),
            ("Group Messages.csv", "group export\n"),
        ]);
        let mut summary = ParseSummary::default();
        let entries = expand_archive("export.zip", &data, &mut summary);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "messages.csv");
        // 每個輔助訊息檔恰好一則警告
        assert_eq!(summary.warnings.len(), 2);
        assert!(summary.warnings.iter().all(|w| w.contains("auxiliary")));
    }

    #[test]
    fn test_directories_are_skipped() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .add_directory::<_, ()>("Connections/", FileOptions::default())
            .unwrap();
        writer
            .start_file::<_, ()>("Connections/Connections.csv", FileOptions::default())
            .unwrap();
        writer
            .write_all(b"First Name,Last Name\nJane,Doe\n")
            .unwrap();
        let data = writer.finish().unwrap().into_inner();

        let mut summary = ParseSummary::default();
        let entries = expand_archive("export.zip", &data, &mut summary);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Connections/Connections.csv");
    }

    #[test]
    fn test_unopenable_archive_warns_and_yields_nothing() {
        let mut summary = ParseSummary::default();
        let entries = expand_archive("broken.zip", b"not a zip archive", &mut summary);

        assert!(entries.is_empty());
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("broken.zip"));
    }
}
