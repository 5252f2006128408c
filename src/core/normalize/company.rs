use crate::core::header::{field, Alias, FieldSpec, HeaderMap, TableSpec};
use crate::domain::model::{CompanyFollow, ParseSummary};
use crate::utils::hash::stable_id;
use crate::utils::time::{canonical, parse_instant};

pub const TABLE: TableSpec = TableSpec {
    markers: &["Organization", "Company"],
    fields: &[
        FieldSpec {
            name: "organization",
            aliases: &[Alias::Exact("Organization"), Alias::Exact("Company")],
        },
        FieldSpec {
            name: "followed_at",
            aliases: &[
                Alias::Exact("Followed On"),
                Alias::Exact("Date"),
                Alias::Pattern(r"^followed"),
            ],
        },
    ],
};

/// 公司追蹤正規化：組織名空白的列靜默丟棄
pub fn normalize(
    rows: &[Vec<String>],
    headers: &HeaderMap,
    summary: &mut ParseSummary,
) -> Vec<CompanyFollow> {
    let mut follows = Vec::new();

    for row in rows {
        let company = field(row, headers, "organization");
        if company.is_empty() {
            continue;
        }

        let raw_date = field(row, headers, "followed_at");
        let followed_at = parse_instant(raw_date);
        if followed_at.is_none() && !raw_date.is_empty() {
            summary.warn(format!(
                "Unparseable follow date '{}' for '{}'",
                raw_date, company
            ));
        }

        follows.push(CompanyFollow {
            id: stable_id(&[company, &canonical(&followed_at)]),
            company: company.to_string(),
            followed_at,
        });
    }

    follows
}
