use crate::core::header::{field, Alias, FieldSpec, HeaderMap, TableSpec};
use crate::domain::model::{ParseSummary, SavedJob};
use crate::utils::hash::stable_id;
use crate::utils::time::{canonical, parse_instant};

pub const TABLE: TableSpec = TableSpec {
    markers: &["Company Name", "Job Title"],
    fields: &[
        FieldSpec {
            name: "company",
            aliases: &[Alias::Exact("Company Name"), Alias::Exact("Company")],
        },
        FieldSpec {
            name: "title",
            aliases: &[
                Alias::Exact("Job Title"),
                Alias::Exact("Title"),
                Alias::Pattern(r"job\s*title"),
            ],
        },
        FieldSpec {
            name: "saved_at",
            aliases: &[
                Alias::Exact("Saved Date"),
                Alias::Exact("Application Date"),
                Alias::Exact("Date"),
                Alias::Pattern(r"date$"),
            ],
        },
    ],
};

/// 職缺正規化，「儲存」與「已申請」兩種檔案都進到同一個集合。
/// 採寬鬆收列策略：公司或職稱有其一即收，缺的那個補字面 "Unknown"
/// （實際匯出檔在兩種變體間不一致地省略其中一欄）；兩者皆空才丟列。
pub fn normalize(
    rows: &[Vec<String>],
    headers: &HeaderMap,
    summary: &mut ParseSummary,
) -> Vec<SavedJob> {
    let mut jobs = Vec::new();

    for row in rows {
        let mut company = field(row, headers, "company").to_string();
        let mut title = field(row, headers, "title").to_string();
        if company.is_empty() && title.is_empty() {
            continue;
        }
        if company.is_empty() {
            company = "Unknown".to_string();
        }
        if title.is_empty() {
            title = "Unknown".to_string();
        }

        let raw_date = field(row, headers, "saved_at");
        let saved_at = parse_instant(raw_date);
        if saved_at.is_none() && !raw_date.is_empty() {
            summary.warn(format!(
                "Unparseable job date '{}' for '{} - {}'",
                raw_date, company, title
            ));
        }

        jobs.push(SavedJob {
            id: stable_id(&[&company, &title, &canonical(&saved_at)]),
            company,
            title,
            saved_at,
        });
    }

    jobs
}
