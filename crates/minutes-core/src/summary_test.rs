use serde_json::json;

use super::*;

fn full_payload() -> serde_json::Value {
    json!({
        "meeting_title": "20260213_한전_AICC 킥오프 관련 회의",
        "meeting_date": "2026.02.13",
        "attendees": ["김철수", "이영희"],
        "meeting_purpose": "AICC 구축 킥오프",
        "executive_summary": ["일정 확정", "PoC 범위 합의"],
        "discussions": [
            {"topic_title": "PoC 범위", "content": "콜센터 2개 업무로 한정한다."}
        ],
        "decision_structure": [
            {"category": "기술", "subject": "IT팀", "influence": "높음", "criteria": "안정성", "comment": "-"}
        ],
        "key_risks": ["일정 지연"],
        "decisions": ["3월 착수"],
        "action_items": [
            {"subject": "김철수", "action": "제안서 송부", "due_date": "2/20", "purpose": "계약", "risk": "예산"}
        ]
    })
}

#[test]
fn parses_valid_payload() {
    let raw = full_payload().to_string();
    let summary = parse_structured_summary(&raw).expect("valid payload should parse");
    assert_eq!(summary.title, "20260213_한전_AICC 킥오프 관련 회의");
    assert_eq!(summary.attendees.len(), 2);
    assert_eq!(summary.discussion_topics[0].title, "PoC 범위");
    assert_eq!(summary.decision_structure[0].subject, "IT팀");
    assert_eq!(summary.action_items[0].due_date, "2/20");
}

#[test]
fn parses_payload_inside_code_fence() {
    let raw = format!("```json\n{}\n```", full_payload());
    assert!(parse_structured_summary(&raw).is_ok());
}

#[test]
fn parses_payload_with_surrounding_prose() {
    let raw = format!("Here is the analysis:\n{}\nLet me know!", full_payload());
    assert!(parse_structured_summary(&raw).is_ok());
}

#[test]
fn missing_decision_structure_defaults_to_empty() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("decision_structure");
    let summary = parse_structured_summary(&payload.to_string()).unwrap();
    assert!(summary.decision_structure.is_empty());
}

#[test]
fn missing_scalar_is_rejected() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("meeting_date");
    let err = parse_structured_summary(&payload.to_string()).unwrap_err();
    assert!(err.reason.contains("meeting_date"), "reason: {}", err.reason);
}

#[test]
fn missing_required_list_is_rejected() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("key_risks");
    let err = parse_structured_summary(&payload.to_string()).unwrap_err();
    assert!(err.reason.contains("key_risks"), "reason: {}", err.reason);
}

#[test]
fn null_list_is_rejected() {
    let mut payload = full_payload();
    payload["decisions"] = serde_json::Value::Null;
    assert!(parse_structured_summary(&payload.to_string()).is_err());
}

#[test]
fn wrong_element_type_is_rejected() {
    let mut payload = full_payload();
    payload["executive_summary"] = json!(["ok", 42]);
    assert!(parse_structured_summary(&payload.to_string()).is_err());
}

#[test]
fn empty_title_is_rejected() {
    let mut payload = full_payload();
    payload["meeting_title"] = json!("   ");
    let err = parse_structured_summary(&payload.to_string()).unwrap_err();
    assert_eq!(err.reason, "meeting_title is empty");
}

#[test]
fn violation_keeps_truncated_raw_text() {
    let raw = "x".repeat(RAW_EXCERPT_CHARS * 2);
    let err = parse_structured_summary(&raw).unwrap_err();
    assert_eq!(err.raw_excerpt.chars().count(), RAW_EXCERPT_CHARS);
    assert_eq!(err.schema, "meeting analysis");
}

#[test]
fn parses_condensed_summary() {
    let raw = json!({
        "meeting_title": "20260213_한전_AICC 킥오프 관련 회의",
        "meeting_date": "2026.02.13",
        "executive_summary": "PoC 범위와 일정을 확정했다.",
        "key_points": ["PoC 2개 업무", "3월 착수"],
        "decisions": [],
        "next_actions": [{"task": "제안서 송부", "assignee": "김철수"}]
    })
    .to_string();
    let summary = parse_condensed_summary(&raw).unwrap();
    assert_eq!(summary.summary, "PoC 범위와 일정을 확정했다.");
    assert_eq!(summary.next_actions[0].assignee, "김철수");
}

#[test]
fn condensed_summary_rejects_list_summary() {
    let raw = json!({
        "meeting_title": "t",
        "meeting_date": "d",
        "executive_summary": ["not", "a", "string"],
        "key_points": [],
        "decisions": [],
        "next_actions": []
    })
    .to_string();
    let err = parse_condensed_summary(&raw).unwrap_err();
    assert_eq!(err.schema, "email summary");
}

#[test]
fn extract_json_object_handles_bare_fence() {
    assert_eq!(extract_json_object("```\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(extract_json_object("  {\"a\":1}  "), "{\"a\":1}");
}
