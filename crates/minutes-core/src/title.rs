//! Title derivation policy.
//!
//! Titles have the shape `YYYYMMDD_<subject>_<topic> 관련 회의`. The model is
//! told to pick the subject (customer / counterparty name) in a fixed
//! priority order, spelled out in [`TITLE_RULES`]:
//!
//! 1. text the requesting user typed next to the upload,
//! 2. the filename, unless it is only digits / dates / generic words,
//! 3. an organization name mentioned repeatedly in the transcript, never the
//!    requesting organization itself,
//! 4. [`CUSTOMER_UNSPECIFIED`].
//!
//! [`TitlePolicy`] re-implements the same order deterministically. It does
//! not override the model; [`TitlePolicy::check_title`] only reports whether
//! the title the model produced is consistent with it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Subject used when no source names the customer.
pub const CUSTOMER_UNSPECIFIED: &str = "고객사명미기재";

/// Date used when the transcript records none.
pub const DATE_NOT_RECORDED: &str = "미기재";

/// Guidance sent to the model when the user supplied none.
pub const NO_GUIDANCE: &str = "없음";

/// Minimum transcript mentions before a name counts as the counterparty.
const MIN_TRANSCRIPT_MENTIONS: usize = 2;

/// Title rules embedded verbatim in the analysis prompt.
pub const TITLE_RULES: &str = r#"meeting_title 형식: "YYYYMMDD_고객명_회의내용1줄요약 관련 회의"

* 날짜: 회의 원문에서 추출한 YYYYMMDD 8자리 (예: 2026.01.14 → 20260114). 원문에 날짜가 없으면 "미기재".

* 고객명은 반드시 아래 순서로 결정한다.
  [1순위] 요청사항에 "[사용자 입력 텍스트:" 가 있으면 그 텍스트에서 회사명/고객명을 추출한다. 있으면 다른 소스는 무시한다.
    예: "한전 AICC 킥오프" → 한전 / "삼성SDS 프로젝트 미팅" → 삼성SDS
  [2순위] 요청사항의 "[파일명 힌트:" 에서 회사명/고객명을 추출한다.
    단, 파일명이 숫자/날짜뿐이거나(예: 260210, 20260210) 일반 명사뿐이면(예: meeting_0210) 고객명이 아니므로 3순위로 넘어간다.
    예: [파일명 힌트: 삼성SDS_미팅] → 삼성SDS
  [3순위] 회의 원문에서 반복적으로 언급되는 법인명/브랜드명(예: ~전자, ~그룹, ~유플러스)을 추출한다.
    우리 회사(요청자) 이름이 아닌 상대방 고객사 이름만 사용한다.
  [4순위] 1~3순위가 모두 실패한 경우에만 "고객사명미기재" 를 사용한다. 이 경우는 극히 드물어야 한다.

* 회의내용1줄요약: 핵심 주제를 간결하게.
* 절대 금지: 어느 소스에도 없는 회사명을 지어내기, "[고객사명미기재]" 처럼 대괄호 사용."#;

/// Words that never name a customer when found in a filename.
const GENERIC_WORDS: &[&str] = &[
    "meeting",
    "minutes",
    "transcript",
    "record",
    "recording",
    "note",
    "notes",
    "memo",
    "stt",
    "final",
    "draft",
    "copy",
    "회의",
    "회의록",
    "미팅",
    "녹취",
    "녹취록",
    "메모",
    "정리",
];

/// Endings of Korean legal / brand names.
const ORG_SUFFIXES: &[&str] = &[
    "유플러스",
    "전자",
    "그룹",
    "텔레콤",
    "통신",
    "은행",
    "증권",
    "생명",
    "화재",
    "보험",
    "카드",
    "건설",
    "화학",
    "중공업",
    "제약",
    "바이오",
    "홀딩스",
    "전력",
    "공사",
    "SDS",
    "SDI",
];

/// Trailing particles stripped from a token before matching, longest first.
const PARTICLES: &[&str] = &[
    "에서는", "에서도", "께서는", "으로는", "이라는", "에서", "께서", "으로", "에게", "한테",
    "과의", "와의", "에는", "이랑", "은", "는", "이", "가", "을", "를", "과", "와", "의", "에",
    "로", "도", "만", "측",
];

/// Latin initials glued to a Hangul name, e.g. `LG유플러스`, `SK텔레콤`.
static LATIN_HANGUL_ORG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,5}[가-힣]{2,}$").expect("valid regex"));

static TITLE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{8}|미기재)_([^_]+)_(.+?)\s*관련 회의$").expect("valid regex")
});

/// Which priority level produced a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectSource {
    UserText,
    FilenameHint,
    Transcript,
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSubject {
    pub name: String,
    pub source: SubjectSource,
}

/// Inputs the title subject may be drawn from.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleSources<'a> {
    pub user_text: Option<&'a str>,
    pub filename_hint: Option<&'a str>,
    pub transcript: &'a str,
}

/// Components of a well-formed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleParts<'a> {
    pub date: &'a str,
    pub subject: &'a str,
    pub topic: &'a str,
}

/// Outcome of comparing a model-produced title with the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleCheck {
    Consistent,
    /// The title does not have the `YYYYMMDD_subject_topic 관련 회의` shape.
    Malformed,
    /// A higher-priority source names a different subject.
    SubjectMismatch {
        found: String,
        expected: DerivedSubject,
    },
    /// The subject appears in none of the sources.
    UnsupportedSubject { found: String },
}

impl TitleCheck {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        matches!(self, TitleCheck::Consistent)
    }
}

/// Deterministic reference implementation of the subject priority order.
#[derive(Debug, Clone, Default)]
pub struct TitlePolicy {
    own_org_names: Vec<String>,
}

impl TitlePolicy {
    /// `own_org_names` are the requesting organization's names, which
    /// transcript inference must skip.
    #[must_use]
    pub fn new(own_org_names: Vec<String>) -> Self {
        Self { own_org_names }
    }

    #[must_use]
    pub fn derive_subject(&self, sources: &TitleSources<'_>) -> DerivedSubject {
        if let Some(name) = sources.user_text.and_then(subject_from_user_text) {
            return DerivedSubject {
                name,
                source: SubjectSource::UserText,
            };
        }
        if let Some(name) = sources.filename_hint.and_then(subject_from_filename) {
            return DerivedSubject {
                name,
                source: SubjectSource::FilenameHint,
            };
        }
        if let Some(name) = self.subject_from_transcript(sources.transcript) {
            return DerivedSubject {
                name,
                source: SubjectSource::Transcript,
            };
        }
        DerivedSubject {
            name: CUSTOMER_UNSPECIFIED.to_string(),
            source: SubjectSource::Unspecified,
        }
    }

    #[must_use]
    pub fn check_title(&self, title: &str, sources: &TitleSources<'_>) -> TitleCheck {
        let Some(parts) = split_title(title) else {
            return TitleCheck::Malformed;
        };
        let found = parts.subject.trim();
        let expected = self.derive_subject(sources);

        if found == CUSTOMER_UNSPECIFIED {
            return if expected.source == SubjectSource::Unspecified {
                TitleCheck::Consistent
            } else {
                TitleCheck::SubjectMismatch {
                    found: found.to_string(),
                    expected,
                }
            };
        }

        if !appears_in_sources(found, sources) {
            return TitleCheck::UnsupportedSubject {
                found: found.to_string(),
            };
        }

        match expected.source {
            SubjectSource::UserText | SubjectSource::FilenameHint
                if !names_agree(found, &expected.name) =>
            {
                TitleCheck::SubjectMismatch {
                    found: found.to_string(),
                    expected,
                }
            }
            _ => TitleCheck::Consistent,
        }
    }

    fn subject_from_transcript(&self, transcript: &str) -> Option<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, token) in words(transcript).enumerate() {
            let Some(name) = org_name(token) else {
                continue;
            };
            if self.is_own(name) {
                continue;
            }
            counts.entry(name).or_insert((0, position)).0 += 1;
        }

        counts
            .into_iter()
            .filter(|(_, (count, _))| *count >= MIN_TRANSCRIPT_MENTIONS)
            .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
            .map(|(name, _)| name.to_string())
    }

    fn is_own(&self, name: &str) -> bool {
        self.own_org_names
            .iter()
            .any(|own| names_agree(own, name))
    }
}

/// Builds the guidance block handed to the analyzer from the filename stem
/// and the text the user typed. Returns `None` when both are absent.
#[must_use]
pub fn compose_guidance(filename_stem: Option<&str>, user_text: Option<&str>) -> Option<String> {
    let filename_stem = filename_stem.map(str::trim).filter(|s| !s.is_empty());
    let user_text = user_text.map(str::trim).filter(|s| !s.is_empty());

    let mut lines = Vec::new();
    if let Some(stem) = filename_stem {
        lines.push(format!("[파일명 힌트: {stem}]"));
    }
    if let Some(text) = user_text {
        lines.push(format!("[사용자 입력 텍스트: {text}]"));
        lines.push(
            "사용자가 위 텍스트를 입력했습니다. 제목의 고객명과 회의주제에 반드시 반영하세요."
                .to_string(),
        );
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Splits a title into date, subject, and topic.
#[must_use]
pub fn split_title(title: &str) -> Option<TitleParts<'_>> {
    let caps = TITLE_SHAPE.captures(title.trim())?;
    Some(TitleParts {
        date: caps.get(1)?.as_str(),
        subject: caps.get(2)?.as_str(),
        topic: caps.get(3)?.as_str(),
    })
}

fn subject_from_user_text(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if let Some(name) = tokens.iter().find_map(|t| org_name(trim_punctuation(t))) {
        return Some(name.to_string());
    }
    tokens
        .iter()
        .map(|t| trim_punctuation(t))
        .find(|t| t.chars().any(char::is_alphabetic))
        .map(ToOwned::to_owned)
}

fn subject_from_filename(hint: &str) -> Option<String> {
    let segments: Vec<&str> = hint
        .split(['_', '-', '.', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty() && !is_uninformative(s))
        .collect();

    if let Some(name) = segments.iter().find_map(|s| org_name(s)) {
        return Some(name.to_string());
    }
    segments.first().map(|s| (*s).to_string())
}

/// Digits, dates, and generic words (alone or glued together) say nothing
/// about the customer.
fn is_uninformative(segment: &str) -> bool {
    let without_digits: String = segment.chars().filter(|c| !c.is_ascii_digit()).collect();
    without_digits.is_empty()
        || GENERIC_WORDS
            .iter()
            .any(|g| without_digits.eq_ignore_ascii_case(g))
}

fn org_name(token: &str) -> Option<&str> {
    let stripped = strip_particle(token);
    if is_org_like(stripped) {
        Some(stripped)
    } else if is_org_like(token) {
        Some(token)
    } else {
        None
    }
}

fn is_org_like(token: &str) -> bool {
    if token.chars().count() < 2 {
        return false;
    }
    ORG_SUFFIXES
        .iter()
        .any(|suffix| token.len() > suffix.len() && token.ends_with(suffix))
        || LATIN_HANGUL_ORG.is_match(token)
}

fn strip_particle(token: &str) -> &str {
    for particle in PARTICLES {
        if let Some(stem) = token.strip_suffix(particle) {
            if stem.chars().count() >= 2 {
                return stem;
            }
        }
    }
    token
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn trim_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn names_agree(a: &str, b: &str) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn appears_in_sources(name: &str, sources: &TitleSources<'_>) -> bool {
    let needle = normalize(name);
    [sources.user_text, sources.filename_hint, Some(sources.transcript)]
        .into_iter()
        .flatten()
        .any(|haystack| normalize(haystack).contains(&needle))
}

#[cfg(test)]
#[path = "title_test.rs"]
mod tests;
