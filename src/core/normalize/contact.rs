use crate::core::header::{field, Alias, FieldSpec, HeaderMap, TableSpec};
use crate::core::normalize::optional;
use crate::domain::model::{Contact, ParseSummary};
use crate::utils::hash::stable_id;
use crate::utils::time::{canonical, parse_instant};

pub const TABLE: TableSpec = TableSpec {
    markers: &["First Name"],
    fields: &[
        FieldSpec {
            name: "first_name",
            aliases: &[Alias::Exact("First Name"), Alias::Pattern(r"^first\s*name$")],
        },
        FieldSpec {
            name: "last_name",
            aliases: &[Alias::Exact("Last Name"), Alias::Pattern(r"^last\s*name$")],
        },
        FieldSpec {
            name: "url",
            aliases: &[
                Alias::Exact("URL"),
                Alias::Exact("Profile URL"),
                Alias::Pattern(r"profile\s*url"),
            ],
        },
        FieldSpec {
            name: "title",
            aliases: &[Alias::Exact("Position"), Alias::Exact("Title")],
        },
        FieldSpec {
            name: "company",
            aliases: &[Alias::Exact("Company"), Alias::Exact("Organization")],
        },
        FieldSpec {
            name: "location",
            aliases: &[Alias::Exact("Location"), Alias::Pattern(r"^geo")],
        },
        FieldSpec {
            name: "connected_at",
            aliases: &[Alias::Exact("Connected On"), Alias::Pattern(r"^connected")],
        },
    ],
};

/// 聯絡人正規化。採嚴格收列策略：姓與名皆空的列直接丟棄並留警告。
/// 身分鍵：有個人檔案網址時只看網址（同網址即同人），否則退回
/// 姓名|公司|建立連結時刻的組合。
pub fn normalize(
    rows: &[Vec<String>],
    headers: &HeaderMap,
    summary: &mut ParseSummary,
) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for row in rows {
        let first = field(row, headers, "first_name");
        let last = field(row, headers, "last_name");
        if first.is_empty() && last.is_empty() {
            summary.warn("Dropping connection row with no first or last name");
            continue;
        }

        let name = format!("{} {}", first, last).trim().to_string();
        let company = field(row, headers, "company");
        let url = field(row, headers, "url");

        let raw_date = field(row, headers, "connected_at");
        let connected_at = parse_instant(raw_date);
        if connected_at.is_none() && !raw_date.is_empty() {
            summary.warn(format!(
                "Unparseable connection date '{}' for '{}'",
                raw_date, name
            ));
        }

        let id = if url.is_empty() {
            stable_id(&[&name, company, &canonical(&connected_at)])
        } else {
            stable_id(&[url])
        };

        contacts.push(Contact {
            id,
            name,
            title: optional(field(row, headers, "title")),
            company: optional(company),
            location: optional(field(row, headers, "location")),
            connected_at,
            profile_url: optional(url),
        });
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::resolve_fields;

    fn header() -> Vec<String> {
        ["First Name", "Last Name", "URL", "Company", "Position", "Connected On"]
            .iter()
            .map(|cell| cell.to_string())
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_strict_admission_drops_nameless_row() {
        let headers = resolve_fields(&header(), &TABLE);
        let rows = vec![
            row(&["Jane", "Doe", "", "Acme", "Engineer", "04 Jan 2024"]),
            row(&["", "", "", "Ghost Corp", "", ""]),
            row(&["John", "", "", "", "", ""]),
        ];
        let mut summary = ParseSummary::default();
        let contacts = normalize(&rows, &headers, &mut summary);

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Jane Doe");
        assert_eq!(contacts[1].name, "John");
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("no first or last name"));
    }

    #[test]
    fn test_profile_url_dominates_identity() {
        let headers = resolve_fields(&header(), &TABLE);
        let url = "https://example.com/in/jane";
        let a = row(&["Jane", "Doe", url, "Acme", "Engineer", "04 Jan 2024"]);
        let b = row(&["Jane", "Doe", url, "Globex", "Director", "05 Feb 2025"]);
        let mut summary = ParseSummary::default();
        let contacts = normalize(&[a, b], &headers, &mut summary);

        // 相同網址 → 相同身分雜湊，不受公司/職稱/時刻影響
        assert_eq!(contacts[0].id, contacts[1].id);
    }

    #[test]
    fn test_urlless_identity_uses_name_company_instant() {
        let headers = resolve_fields(&header(), &TABLE);
        let a = row(&["Jane", "Doe", "", "Acme", "", "04 Jan 2024"]);
        let b = row(&["Jane", "Doe", "", "Globex", "", "04 Jan 2024"]);
        let mut summary = ParseSummary::default();
        let contacts = normalize(&[a, b], &headers, &mut summary);

        assert_ne!(contacts[0].id, contacts[1].id);
    }

    #[test]
    fn test_bad_date_keeps_row_with_warning() {
        let headers = resolve_fields(&header(), &TABLE);
        let rows = vec![row(&["Jane", "Doe", "", "Acme", "", "sometime in spring"])];
        let mut summary = ParseSummary::default();
        let contacts = normalize(&rows, &headers, &mut summary);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].connected_at, None);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("sometime in spring"));
    }
}
