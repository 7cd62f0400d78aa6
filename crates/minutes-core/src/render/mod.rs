//! Text renderers for a validated [`StructuredSummary`](crate::StructuredSummary).
//!
//! Every renderer emits the same seven sections in the same order. An empty
//! list never drops its section; it renders [`NONE_PLACEHOLDER`] (or
//! [`NOT_APPLICABLE`] for the decision structure) instead.

mod condensed;
mod html;
mod markdown;
mod plain;

pub use condensed::render_condensed_markdown;
pub use html::render_html;
pub use markdown::render_markdown;
pub use plain::render_plain_text;

/// Section headings shared by every renderer, including the Notion block tree.
pub const SECTION_TITLES: [&str; 7] = [
    "1. 회의 개요 (Meeting Overview)",
    "2. 핵심 요약 (Executive Summary)",
    "3. 주요 논의 내용 (Discussion Summary)",
    "4. 의사결정 구조 및 평가 기준 (Decision Structure)",
    "5. 핵심 리스크 (Key Risks)",
    "6. 결정사항 (Decisions)",
    "7. Next Action",
];

/// Rendered in place of an empty list.
pub const NONE_PLACEHOLDER: &str = "없음";

/// Rendered in place of an empty decision structure.
pub const NOT_APPLICABLE: &str = "해당 없음";

/// Column headers of the decision-structure table.
pub const DECISION_COLUMNS: [&str; 5] = ["구분", "주체", "영향력", "기준", "코멘트"];

/// Attendee list joined with `, `, or [`NONE_PLACEHOLDER`].
#[must_use]
pub fn join_attendees(attendees: &[String]) -> String {
    if attendees.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        attendees.join(", ")
    }
}
