//! Transcript attachment helpers: extension filter and UTF-8 decoding.

use thiserror::Error;

/// File extensions accepted as transcripts (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("transcript is empty")]
    Empty,
}

/// Whether `filename` has one of the [`SUPPORTED_EXTENSIONS`].
#[must_use]
pub fn is_supported_transcript(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
    })
}

/// The filename without its final extension, used as the filename hint.
#[must_use]
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

/// Decodes attachment bytes as UTF-8, dropping a leading byte-order mark.
///
/// # Errors
///
/// Returns [`TranscriptError::InvalidUtf8`] for non-UTF-8 content and
/// [`TranscriptError::Empty`] when nothing but whitespace remains.
pub fn decode_transcript(bytes: Vec<u8>) -> Result<String, TranscriptError> {
    let text = String::from_utf8(bytes)?;
    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };
    if text.trim().is_empty() {
        return Err(TranscriptError::Empty);
    }
    Ok(text)
}

fn extension(filename: &str) -> Option<&str> {
    let idx = filename.rfind('.')?;
    (idx > 0 && idx + 1 < filename.len()).then(|| &filename[idx + 1..])
}
