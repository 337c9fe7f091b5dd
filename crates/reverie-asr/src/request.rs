use axum::extract::Multipart;

use crate::error::AsrError;
use crate::types::TranscriptionRequest;

/// Pull the audio upload out of a multipart form
///
/// Only the `file` field is meaningful; unknown fields are skipped.
pub(crate) async fn read_upload(mut multipart: Multipart) -> crate::error::Result<TranscriptionRequest> {
    let mut upload: Option<TranscriptionRequest> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AsrError::InvalidRequest(format!("failed to parse multipart form: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("audio.wav").to_owned();
        let content_type = field.content_type().unwrap_or("audio/wav").to_owned();

        let audio = field
            .bytes()
            .await
            .map_err(|e| AsrError::InvalidRequest(format!("failed to read audio data: {e}")))?
            .to_vec();

        upload = Some(TranscriptionRequest {
            audio,
            filename,
            content_type,
        });
    }

    upload.ok_or_else(|| AsrError::InvalidRequest("missing required 'file' field in multipart form".to_owned()))
}
