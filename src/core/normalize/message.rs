use crate::core::header::{field, Alias, FieldSpec, HeaderMap, TableSpec};
use crate::core::normalize::optional;
use crate::domain::model::{Message, MessageDirection, ParseSummary};
use crate::utils::hash::stable_id;
use crate::utils::time::{canonical, day_bucket, parse_instant};

/// 身分雜湊只取訊息本文前 40 個字元；同討論串、同時刻、前 40 字
/// 相同的兩則長訊息會碰撞，屬有意為之的已知限制
const BODY_KEY_CHARS: usize = 40;

pub const TABLE: TableSpec = TableSpec {
    markers: &["Conversation ID", "From"],
    fields: &[
        FieldSpec {
            name: "conversation_id",
            aliases: &[
                Alias::Exact("Conversation ID"),
                Alias::Pattern(r"conversation\s*id"),
            ],
        },
        FieldSpec {
            name: "from",
            aliases: &[Alias::Exact("From"), Alias::Exact("Sender")],
        },
        FieldSpec {
            name: "sender_url",
            aliases: &[
                Alias::Exact("Sender Profile URL"),
                Alias::Pattern(r"sender\s*profile"),
            ],
        },
        FieldSpec {
            name: "to",
            aliases: &[Alias::Exact("To"), Alias::Exact("Recipient")],
        },
        FieldSpec {
            name: "recipient_urls",
            aliases: &[
                Alias::Exact("Recipient Profile URLs"),
                Alias::Pattern(r"recipient\s*profile"),
            ],
        },
        FieldSpec {
            name: "date",
            aliases: &[Alias::Exact("Date"), Alias::Exact("Sent At")],
        },
        FieldSpec {
            name: "body",
            aliases: &[Alias::Exact("Content"), Alias::Pattern(r"^(content|body)$")],
        },
    ],
};

/// 訊息正規化。空本文的列靜默丟棄（高頻良性雜訊）。
/// 討論串鍵的決議順序：明確的對話識別欄 → 收件者網址清單（多人時
/// 排序後才雜湊，與順序無關）→ 參與者|UTC 日期桶的後援雜湊。
pub fn normalize(
    rows: &[Vec<String>],
    headers: &HeaderMap,
    summary: &mut ParseSummary,
) -> Vec<Message> {
    let mut messages = Vec::new();

    for row in rows {
        let body = field(row, headers, "body");
        if body.is_empty() {
            continue;
        }

        let from = field(row, headers, "from");
        let direction = if from.to_lowercase().contains("you") {
            MessageDirection::FromSelf
        } else {
            MessageDirection::FromCounterpart
        };

        let raw_date = field(row, headers, "date");
        let sent_at = parse_instant(raw_date);
        if sent_at.is_none() && !raw_date.is_empty() {
            summary.warn(format!("Unparseable message date '{}'", raw_date));
        }

        let recipients: Vec<String> = field(row, headers, "recipient_urls")
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();

        let conversation_id = field(row, headers, "conversation_id");
        let thread_key = if !conversation_id.is_empty() {
            conversation_id.to_string()
        } else if !recipients.is_empty() {
            if recipients.len() == 1 {
                stable_id(&[&recipients[0]])
            } else {
                let mut sorted = recipients.clone();
                sorted.sort();
                stable_id(&[&sorted.join(",")])
            }
        } else {
            let to = field(row, headers, "to");
            let participant = if to.is_empty() { from } else { to };
            let day = sent_at
                .as_ref()
                .map(day_bucket)
                .unwrap_or_else(|| "unknown".to_string());
            stable_id(&[participant, &day])
        };

        let counterpart = match direction {
            MessageDirection::FromCounterpart => optional(field(row, headers, "sender_url")),
            MessageDirection::FromSelf => recipients.first().cloned(),
        };

        let body_key: String = body.chars().take(BODY_KEY_CHARS).collect();
        let id = stable_id(&[&thread_key, &canonical(&sent_at), &body_key]);

        messages.push(Message {
            id,
            thread_key,
            direction,
            counterpart,
            body: body.to_string(),
            sent_at,
        });
    }

    messages
}
