use std::fmt::Write as _;

use super::NONE_PLACEHOLDER;
use crate::summary::CondensedSummary;

/// Renders the short email summary as Markdown.
#[must_use]
pub fn render_condensed_markdown(summary: &CondensedSummary) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "# {}\n", summary.title);
    let _ = writeln!(body, "**일시:** {}\n", summary.date);
    body.push_str("---\n\n## 핵심 요약\n\n");
    let _ = writeln!(body, "{}\n", summary.summary);

    body.push_str("---\n\n## 핵심 포인트\n\n");
    bullets(&mut body, summary.key_points.iter().map(String::as_str));

    body.push_str("\n---\n\n## 결정사항\n\n");
    bullets(&mut body, summary.decisions.iter().map(String::as_str));

    body.push_str("\n---\n\n## Next Action\n\n");
    let actions: Vec<String> = summary
        .next_actions
        .iter()
        .map(|a| format!("[ ] {} (@{})", a.task, a.assignee))
        .collect();
    bullets(&mut body, actions.iter().map(String::as_str));

    body
}

fn bullets<'a>(body: &mut String, items: impl Iterator<Item = &'a str>) {
    let mut any = false;
    for item in items {
        any = true;
        let _ = writeln!(body, "- {item}");
    }
    if !any {
        let _ = writeln!(body, "- {NONE_PLACEHOLDER}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::CondensedAction;

    fn condensed() -> CondensedSummary {
        CondensedSummary {
            title: "20260213_한전_AICC 킥오프 관련 회의".to_string(),
            date: "2026.02.13".to_string(),
            summary: "PoC 범위와 일정을 확정했다.".to_string(),
            key_points: vec!["PoC 2개 업무".to_string()],
            decisions: Vec::new(),
            next_actions: vec![CondensedAction {
                task: "제안서 송부".to_string(),
                assignee: "김철수".to_string(),
            }],
        }
    }

    #[test]
    fn renders_email_body() {
        let body = render_condensed_markdown(&condensed());
        assert!(body.starts_with("# 20260213_한전_AICC 킥오프 관련 회의\n\n**일시:** 2026.02.13"));
        assert!(body.contains("## 핵심 요약\n\nPoC 범위와 일정을 확정했다."));
        assert!(body.contains("## 결정사항\n\n- 없음\n"));
        assert!(body.contains("- [ ] 제안서 송부 (@김철수)"));
    }

    #[test]
    fn empty_actions_render_placeholder() {
        let mut summary = condensed();
        summary.next_actions.clear();
        assert!(render_condensed_markdown(&summary).ends_with("## Next Action\n\n- 없음\n"));
    }
}
