use std::fmt::Write as _;

use super::{join_attendees, NONE_PLACEHOLDER, NOT_APPLICABLE, SECTION_TITLES};
use crate::summary::StructuredSummary;

const INDENT: &str = "   ";

/// Renders the summary without markup characters; structure is carried by
/// indentation alone.
#[must_use]
pub fn render_plain_text(summary: &StructuredSummary) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}\n", summary.title);

    let _ = writeln!(text, "{}", SECTION_TITLES[0]);
    let _ = writeln!(text, "{INDENT}일시: {}", summary.date);
    let _ = writeln!(text, "{INDENT}참석자: {}", join_attendees(&summary.attendees));
    let _ = writeln!(text, "{INDENT}회의 목적: {}\n", summary.purpose);

    let _ = writeln!(text, "{}", SECTION_TITLES[1]);
    lines(&mut text, &summary.executive_summary, NONE_PLACEHOLDER);

    let _ = writeln!(text, "{}", SECTION_TITLES[2]);
    if summary.discussion_topics.is_empty() {
        let _ = writeln!(text, "{INDENT}{NONE_PLACEHOLDER}\n");
    }
    for (i, topic) in summary.discussion_topics.iter().enumerate() {
        let _ = writeln!(text, "{INDENT}주제 {}: {}", i + 1, topic.title);
        for line in topic.body.lines() {
            let _ = writeln!(text, "{INDENT}{INDENT}{line}");
        }
        text.push('\n');
    }

    let _ = writeln!(text, "{}", SECTION_TITLES[3]);
    if summary.decision_structure.is_empty() {
        let _ = writeln!(text, "{INDENT}{NOT_APPLICABLE}");
    }
    for item in &summary.decision_structure {
        let _ = writeln!(
            text,
            "{INDENT}{} / {}: 영향력 {}, 기준 {}, {}",
            item.category, item.subject, item.influence, item.criteria, item.comment
        );
    }
    text.push('\n');

    let _ = writeln!(text, "{}", SECTION_TITLES[4]);
    lines(&mut text, &summary.key_risks, NONE_PLACEHOLDER);

    let _ = writeln!(text, "{}", SECTION_TITLES[5]);
    lines(&mut text, &summary.decisions, NONE_PLACEHOLDER);

    let _ = writeln!(text, "{}", SECTION_TITLES[6]);
    if summary.action_items.is_empty() {
        let _ = writeln!(text, "{INDENT}{NONE_PLACEHOLDER}");
    }
    for item in &summary.action_items {
        let _ = writeln!(
            text,
            "{INDENT}{} (담당: {} / 기한: {} / 목적: {} / 리스크: {})",
            item.action, item.subject, item.due_date, item.purpose, item.risk
        );
    }

    text
}

fn lines(text: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        let _ = writeln!(text, "{INDENT}{placeholder}");
    }
    for item in items {
        let _ = writeln!(text, "{INDENT}{item}");
    }
    text.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    fn assert_no_markup(text: &str) {
        for marker in ["#", "|", "**", "- ", "[ ]", "<"] {
            assert!(!text.contains(marker), "found markup {marker:?} in:\n{text}");
        }
    }

    #[test]
    fn renders_without_markup() {
        let text = render_plain_text(&fixtures::full());
        assert_no_markup(&text);
        assert!(text.contains("   주제 1: PoC 범위\n      콜센터 2개 업무로 한정한다."));
        assert!(text.contains("   제안서 송부 (담당: 김철수 / 기한: 2/20 / 목적: 계약 / 리스크: 예산 미확정)"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let text = render_plain_text(&fixtures::empty());
        assert_no_markup(&text);
        for title in SECTION_TITLES {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("   해당 없음"));
        assert!(text.contains("참석자: 없음"));
    }
}
