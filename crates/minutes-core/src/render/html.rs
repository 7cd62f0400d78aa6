use std::fmt::Write as _;

use super::{join_attendees, DECISION_COLUMNS, NONE_PLACEHOLDER, NOT_APPLICABLE, SECTION_TITLES};
use crate::summary::StructuredSummary;

const H2: &str = r#"<h2 style="color: #2563eb; margin-top: 25px;">"#;
const TD: &str = r#"<td style="padding: 8px; border-bottom: 1px solid #e2e8f0;">"#;
const TH: &str = r#"<th style="padding: 10px; text-align: left; border-bottom: 2px solid #e2e8f0;">"#;
const LI: &str = r#"<li style="margin: 5px 0;">"#;
const LI_EMPTY: &str = r#"<li style="margin: 5px 0; color: #666;">"#;

/// Renders the summary as an inline-styled HTML email body.
///
/// Content is inserted unescaped; model output is trusted.
#[must_use]
pub fn render_html(summary: &StructuredSummary) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<div style="font-family: 'Malgun Gothic', 'Apple SD Gothic Neo', sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; color: #333;">"#,
    );
    html.push('\n');
    let _ = writeln!(
        html,
        r#"<h1 style="color: #1a1a1a; border-bottom: 3px solid #2563eb; padding-bottom: 10px; margin-bottom: 20px;">{}</h1>"#,
        summary.title
    );

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[0]);
    html.push_str(r#"<table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">"#);
    html.push('\n');
    for (label, value) in [
        ("회의 제목", summary.title.clone()),
        ("일시", summary.date.clone()),
        ("참석자", join_attendees(&summary.attendees)),
        ("회의 목적", summary.purpose.clone()),
    ] {
        let _ = writeln!(
            html,
            r#"<tr><td style="padding: 8px 0; color: #666; width: 100px;"><strong>{label}</strong></td><td style="padding: 8px 0;">{value}</td></tr>"#
        );
    }
    html.push_str("</table>\n");

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[1]);
    list(
        &mut html,
        r#"<ul style="background-color: #f8fafc; border-left: 4px solid #2563eb; padding: 15px 15px 15px 35px; margin-bottom: 20px; list-style-type: disc;">"#,
        &summary.executive_summary,
    );

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[2]);
    if summary.discussion_topics.is_empty() {
        let _ = writeln!(html, r#"<p style="color: #666;">{NONE_PLACEHOLDER}</p>"#);
    }
    for (i, topic) in summary.discussion_topics.iter().enumerate() {
        let _ = writeln!(
            html,
            r#"<h3 style="color: #1e40af; margin-top: 15px;">주제 {}: {}</h3>"#,
            i + 1,
            topic.title
        );
        let _ = writeln!(
            html,
            r#"<p style="margin-bottom: 15px; line-height: 1.7;">{}</p>"#,
            topic.body
        );
    }

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[3]);
    if summary.decision_structure.is_empty() {
        let _ = writeln!(html, r#"<p style="color: #666;">{NOT_APPLICABLE}</p>"#);
    } else {
        html.push_str(r#"<table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">"#);
        html.push_str("\n<tr style=\"background-color: #f1f5f9;\">");
        for column in DECISION_COLUMNS {
            let _ = write!(html, "{TH}{column}</th>");
        }
        html.push_str("</tr>\n");
        for item in &summary.decision_structure {
            html.push_str("<tr>");
            for cell in [
                &item.category,
                &item.subject,
                &item.influence,
                &item.criteria,
                &item.comment,
            ] {
                let _ = write!(html, "{TD}{cell}</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
    }

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[4]);
    list(
        &mut html,
        r#"<ul style="background-color: #fef2f2; border-left: 4px solid #dc2626; padding: 15px 15px 15px 35px; margin-bottom: 20px;">"#,
        &summary.key_risks,
    );

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[5]);
    let decisions: Vec<String> = summary
        .decisions
        .iter()
        .map(|d| format!("<strong>{d}</strong>"))
        .collect();
    list(
        &mut html,
        r#"<ul style="margin: 10px 0; padding-left: 20px;">"#,
        &decisions,
    );

    let _ = writeln!(html, "{H2}{}</h2>", SECTION_TITLES[6]);
    let actions: Vec<String> = summary
        .action_items
        .iter()
        .map(|item| {
            format!(
                r#"&#9744; {} <span style="color: #666; font-size: 0.9em;">(@{} / ~{})</span>"#,
                item.action, item.subject, item.due_date
            )
        })
        .collect();
    list(
        &mut html,
        r#"<ul style="list-style-type: none; padding-left: 5px; margin-bottom: 20px;">"#,
        &actions,
    );

    html.push_str(r#"<hr style="margin-top: 30px; border: none; border-top: 1px solid #e2e8f0;">"#);
    html.push_str(
        "\n<p style=\"color: #9ca3af; font-size: 12px; text-align: center;\">이 회의록은 AI에 의해 자동 생성되었습니다.</p>\n</div>\n",
    );
    html
}

fn list<S: AsRef<str>>(html: &mut String, open: &str, items: &[S]) {
    html.push_str(open);
    html.push('\n');
    if items.is_empty() {
        let _ = writeln!(html, "{LI_EMPTY}{NONE_PLACEHOLDER}</li>");
    }
    for item in items {
        let _ = writeln!(html, "{LI}{}</li>", item.as_ref());
    }
    html.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn renders_all_sections_in_order() {
        let html = render_html(&fixtures::full());
        let positions: Vec<usize> = SECTION_TITLES
            .iter()
            .map(|title| html.find(title).expect("section present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("<strong>3월 착수</strong>"));
        assert!(html.contains("&#9744; 제안서 송부"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn content_is_not_escaped() {
        let mut summary = fixtures::full();
        summary.key_risks = vec!["<b>예산</b> & 일정".to_string()];
        assert!(render_html(&summary).contains("<b>예산</b> & 일정"));
    }

    #[test]
    fn empty_lists_keep_sections() {
        let html = render_html(&fixtures::empty());
        for title in SECTION_TITLES {
            assert!(html.contains(title), "missing {title}");
        }
        assert!(html.contains(NOT_APPLICABLE));
        // attendee cell, discussion paragraph and the four list sections
        assert_eq!(html.matches(">없음<").count(), 6);
    }
}
