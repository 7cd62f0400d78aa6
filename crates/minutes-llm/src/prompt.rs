//! Prompt text for the full analysis and the condensed email summary.

use minutes_core::summary::{CONDENSED_SCHEMA_HINT, STRUCTURED_SCHEMA_HINT};
use minutes_core::title::{NO_GUIDANCE, TITLE_RULES};

const RULE: &str = "────────────────────────";

const ANALYSIS_PRINCIPLES: &str = "\
당신은 전략 컨설턴트 수준의 회의 기록 전문가입니다.
아래 회의 원문을 바탕으로 임원 보고와 사업 의사결정에 바로 쓸 수 있는 구조화된 미팅노트를 작성하세요.

1. 대화 요약이 아니라 맥락, 의사결정 구조, 이해관계, 리스크, 사업적 함의를 담은 전략 문서로 정리한다.
2. 발언 순서를 따르지 말고 논점별로 중복 없이 재구성한다.
3. executive_summary는 10~15줄로 작성한다.
4. 기술적 논의와 사업적 의미를 구분한다.
5. 평가 기준, 의사결정 권한자, 이해관계 충돌이 드러나면 decision_structure에 정리한다. 없으면 빈 배열.
6. action_items에는 주체, 기한(없으면 \"미정\"), 목적, 리스크를 모두 적는다.
7. discussions의 content는 소제목 없이 하나의 문단으로, 팩트 중심으로 서술한다.
8. 감정적 표현과 군더더기, 이모지를 쓰지 않는다.
9. 날짜, 수치, 고유명사는 원문 그대로 유지한다.";

const CONDENSED_PRINCIPLES: &str = "\
당신은 회의 내용을 이메일로 공유하기 좋게 짧게 요약하는 비서입니다.

1. executive_summary는 회의의 핵심을 2~3문장으로 요약한다.
2. key_points는 3~5개, 각 한 줄로 제한한다.
3. 논의 과정과 배경 설명은 빼고 결론과 방향성만 남긴다.
4. decisions에는 확정된 사항만 적는다.
5. next_actions에는 할 일과 담당자만 적는다.
6. 이모지를 쓰지 않는다. 받는 사람이 1분 안에 읽을 수 있어야 한다.";

const OUTPUT_INSTRUCTIONS: &str = "\
아래 구조의 JSON 객체 하나만 출력하세요. 모든 키를 포함하고, 해당 내용이 없는 목록은 빈 배열로 두세요.
코드 블록, 설명 문장, 주석을 덧붙이지 마세요.";

/// Builds the full analysis prompt.
///
/// `guidance` is inserted verbatim; blank or absent guidance becomes
/// [`NO_GUIDANCE`].
#[must_use]
pub fn analysis_prompt(transcript: &str, guidance: Option<&str>) -> String {
    let guidance = guidance
        .filter(|g| !g.trim().is_empty())
        .unwrap_or(NO_GUIDANCE);

    format!(
        "{ANALYSIS_PRINCIPLES}\n\n\
         {RULE}\n[제목 작성 규칙]\n{RULE}\n{TITLE_RULES}\n\n\
         {RULE}\n[회의 원문]\n{RULE}\n{transcript}\n\n\
         {RULE}\n[사용자 추가 요청사항 / 파일명 힌트]\n{RULE}\n{guidance}\n\n\
         {RULE}\n[출력 형식]\n{RULE}\n{OUTPUT_INSTRUCTIONS}\n{STRUCTURED_SCHEMA_HINT}\n"
    )
}

/// Builds the condensed email-summary prompt.
#[must_use]
pub fn condensed_prompt(transcript: &str) -> String {
    format!(
        "{CONDENSED_PRINCIPLES}\n\n\
         {RULE}\n[회의 원문]\n{RULE}\n{transcript}\n\n\
         {RULE}\n[출력 형식]\n{RULE}\n{OUTPUT_INSTRUCTIONS}\n{CONDENSED_SCHEMA_HINT}\n"
    )
}
