use crate::core::header::{field, Alias, FieldSpec, HeaderMap, TableSpec};
use crate::core::normalize::optional;
use crate::domain::model::{Invite, InviteDirection, ParseSummary};
use crate::utils::hash::stable_id;
use crate::utils::time::{canonical, parse_instant};

pub const TABLE: TableSpec = TableSpec {
    markers: &["From", "Direction"],
    fields: &[
        FieldSpec {
            name: "from",
            aliases: &[Alias::Exact("From"), Alias::Pattern(r"^from\s*name$")],
        },
        FieldSpec {
            name: "to",
            aliases: &[Alias::Exact("To"), Alias::Pattern(r"^to\s*name$")],
        },
        FieldSpec {
            name: "direction",
            aliases: &[Alias::Exact("Direction")],
        },
        FieldSpec {
            name: "sent_at",
            aliases: &[Alias::Exact("Sent At"), Alias::Exact("Date")],
        },
        FieldSpec {
            name: "message",
            aliases: &[Alias::Exact("Message")],
        },
        FieldSpec {
            name: "title",
            aliases: &[Alias::Exact("Position"), Alias::Exact("Job Title")],
        },
        FieldSpec {
            name: "company",
            aliases: &[Alias::Exact("Company"), Alias::Exact("Organization")],
        },
    ],
};

/// 邀請正規化。from 與 to 皆空的列丟棄並留警告。
/// 方向先看明確的方向欄（含 "outgoing"/"incoming" 子字串），
/// 否則由寄件者欄含 "you" 推斷。狀態一律是字面 "unknown"：
/// 結構上保留更豐富的值，但管線絕不推斷接受與否。
pub fn normalize(
    rows: &[Vec<String>],
    headers: &HeaderMap,
    summary: &mut ParseSummary,
) -> Vec<Invite> {
    let mut invites = Vec::new();

    for row in rows {
        let from = field(row, headers, "from");
        let to = field(row, headers, "to");
        if from.is_empty() && to.is_empty() {
            summary.warn("Dropping invitation row with no from or to participant");
            continue;
        }

        let direction_column = field(row, headers, "direction").to_lowercase();
        let direction = if direction_column.contains("outgoing") {
            InviteDirection::Sent
        } else if direction_column.contains("incoming") {
            InviteDirection::Received
        } else if from.to_lowercase().contains("you") {
            InviteDirection::Sent
        } else {
            InviteDirection::Received
        };

        let counterpart_name = match direction {
            InviteDirection::Sent => to.to_string(),
            InviteDirection::Received => from.to_string(),
        };

        let raw_date = field(row, headers, "sent_at");
        let sent_at = parse_instant(raw_date);
        if sent_at.is_none() && !raw_date.is_empty() {
            summary.warn(format!(
                "Unparseable invitation date '{}' for '{}'",
                raw_date, counterpart_name
            ));
        }

        let id = stable_id(&[
            direction.as_str(),
            &counterpart_name,
            &canonical(&sent_at),
        ]);

        invites.push(Invite {
            id,
            direction,
            counterpart_name,
            title: optional(field(row, headers, "title")),
            company: optional(field(row, headers, "company")),
            status: "unknown".to_string(),
            message: optional(field(row, headers, "message")),
            sent_at,
        });
    }

    invites
}
