use std::fmt::Write as _;

use super::{join_attendees, DECISION_COLUMNS, NONE_PLACEHOLDER, NOT_APPLICABLE, SECTION_TITLES};
use crate::summary::StructuredSummary;

/// Renders the summary as the Markdown meeting note archived alongside the
/// Notion page and sent in the webhook payload.
#[must_use]
pub fn render_markdown(summary: &StructuredSummary) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", summary.title);

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[0]);
    md.push_str("| 항목 | 내용 |\n| --- | --- |\n");
    let _ = writeln!(md, "| 회의 제목 | {} |", summary.title);
    let _ = writeln!(md, "| 회의 일시 | {} |", summary.date);
    let _ = writeln!(md, "| 참석자 | {} |", join_attendees(&summary.attendees));
    let _ = writeln!(md, "| 회의 목적 | {} |\n", summary.purpose);

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[1]);
    bullets(&mut md, &summary.executive_summary, NONE_PLACEHOLDER);

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[2]);
    if summary.discussion_topics.is_empty() {
        let _ = writeln!(md, "- {NONE_PLACEHOLDER}\n");
    }
    for (i, topic) in summary.discussion_topics.iter().enumerate() {
        let _ = writeln!(md, "### 주제 {}: {}\n", i + 1, topic.title);
        let _ = writeln!(md, "{}\n", topic.body);
    }

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[3]);
    if summary.decision_structure.is_empty() {
        let _ = writeln!(md, "- {NOT_APPLICABLE}\n");
    } else {
        let _ = writeln!(md, "| {} |", DECISION_COLUMNS.join(" | "));
        md.push_str("|------|------|--------|------|--------|\n");
        for item in &summary.decision_structure {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                item.category, item.subject, item.influence, item.criteria, item.comment
            );
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[4]);
    bullets(&mut md, &summary.key_risks, NONE_PLACEHOLDER);

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[5]);
    bullets(&mut md, &summary.decisions, NONE_PLACEHOLDER);

    let _ = writeln!(md, "## {}\n", SECTION_TITLES[6]);
    if summary.action_items.is_empty() {
        let _ = writeln!(md, "- {NONE_PLACEHOLDER}");
    }
    for item in &summary.action_items {
        let _ = writeln!(
            md,
            "- [ ] {} (@{} / ~{}) - 목적: {} / 리스크: {}",
            item.action, item.subject, item.due_date, item.purpose, item.risk
        );
    }

    md
}

fn bullets(md: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        let _ = writeln!(md, "- {placeholder}");
    }
    for item in items {
        let _ = writeln!(md, "- {item}");
    }
    md.push('\n');
}
