use crate::error::TtsError;

/// Gate text before synthesis, returning the trimmed string
///
/// The ceiling counts characters, not bytes.
pub(crate) fn validate_text(text: &str, max_chars: usize) -> crate::error::Result<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(TtsError::EmptyText);
    }

    let actual = trimmed.chars().count();
    if actual > max_chars {
        return Err(TtsError::TextTooLong { actual, max: max_chars });
    }

    Ok(trimmed.to_owned())
}
