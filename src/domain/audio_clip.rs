use bytes::Bytes;

pub const DEFAULT_AUDIO_MIME: &str = "audio/wav";

/// An uploaded audio file, kept as opaque bytes. The remote service does all
/// decoding, so only the mime type travels with it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl AudioClip {
    pub fn new(filename: impl Into<String>, mime_type: Option<&str>, data: impl Into<Bytes>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != "application/octet-stream")
            .unwrap_or(DEFAULT_AUDIO_MIME)
            .to_string();
        Self {
            filename: filename.into(),
            mime_type,
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
