use crate::core::header::{self, HEADER_SCAN_WINDOW};
use crate::core::normalize::{company, contact, invite, message, saved_job, FileKind};
use crate::core::{archive, tabular};
use crate::domain::model::{InputFile, ParseResult};
use crate::utils::error::{EtlError, Result};

/// 一次解析呼叫的同步入口：檔案位元組進，彙總結果出。
/// 檔案之間嚴格循序，除了五個只增集合與診斷彙總外沒有共享狀態；
/// 每次呼叫都建立全新的結果，由呼叫端整體替換上一份。
pub fn parse_export(files: Vec<InputFile>) -> Result<ParseResult> {
    let mut result = ParseResult::default();

    for file in files {
        let lowered = file.name.to_lowercase();
        if lowered.ends_with(".zip") {
            tracing::debug!("Expanding archive '{}'", file.name);
            let entries = archive::expand_archive(&file.name, &file.data, &mut result.summary);
            for entry in entries {
                process_table(entry, &mut result);
            }
        } else if lowered.ends_with(".csv") || lowered.ends_with(".xlsx") {
            process_table(file, &mut result);
        } else {
            result
                .summary
                .warn(format!("Unrecognized file type for '{}'", file.name));
        }
    }

    if result.summary.files_processed.is_empty() {
        return Err(EtlError::EmptyExportError);
    }

    Ok(result)
}

/// 單一表格檔：辨識種類、讀表、找標頭、交給對應的正規化器
fn process_table(file: InputFile, result: &mut ParseResult) {
    let Some(kind) = FileKind::detect(&file.name) else {
        result
            .summary
            .warn(format!("Unrecognized export file '{}'", file.name));
        return;
    };

    let rows = match read_table(&file) {
        Ok(rows) => rows,
        Err(error) => {
            result
                .summary
                .warn(format!("Failed to read '{}': {}", file.name, error));
            return;
        }
    };

    let spec = kind.table_spec();
    let Some(header_index) = header::find_header(&rows, spec) else {
        result.summary.warn(format!(
            "No header row found in '{}' within the first {} rows",
            file.name, HEADER_SCAN_WINDOW
        ));
        result.summary.record_file(kind.label(), 0);
        return;
    };

    let headers = header::resolve_fields(&rows[header_index], spec);
    let data_rows: Vec<Vec<String>> = rows
        .into_iter()
        .skip(header_index + 1)
        .filter(|row| !header::row_is_empty(row))
        .collect();

    tracing::debug!(
        "Processing '{}' as {} ({} data rows)",
        file.name,
        kind.label(),
        data_rows.len()
    );
    result.summary.record_file(kind.label(), data_rows.len());

    match kind {
        FileKind::Connections => {
            let contacts = contact::normalize(&data_rows, &headers, &mut result.summary);
            result.contacts.extend(contacts);
        }
        FileKind::Messages => {
            let messages = message::normalize(&data_rows, &headers, &mut result.summary);
            result.messages.extend(messages);
        }
        FileKind::Invitations => {
            let invites = invite::normalize(&data_rows, &headers, &mut result.summary);
            result.invites.extend(invites);
        }
        FileKind::CompanyFollows => {
            let follows = company::normalize(&data_rows, &headers, &mut result.summary);
            result.company_follows.extend(follows);
        }
        // 來源是「儲存」還是「已申請」不保留在記錄上
        FileKind::SavedJobs | FileKind::JobApplications => {
            let jobs = saved_job::normalize(&data_rows, &headers, &mut result.summary);
            result.saved_jobs.extend(jobs);
        }
    }
}

fn read_table(file: &InputFile) -> Result<Vec<Vec<String>>> {
    if file.name.to_lowercase().ends_with(".xlsx") {
        tabular::read_xlsx(&file.data)
    } else {
        tabular::read_csv(&String::from_utf8_lossy(&file.data))
    }
}
