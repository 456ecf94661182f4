use bytes::Bytes;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputId(Uuid);

impl OutputId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OutputId {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoded WAV produced by a successful run. Owned by the session; replacing
/// it drops the previous bytes and invalidates its id.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOutput {
    pub id: OutputId,
    pub filename: String,
    pub wav: Bytes,
}

impl GeneratedOutput {
    pub fn new(filename: impl Into<String>, wav: impl Into<Bytes>) -> Self {
        Self {
            id: OutputId::new(),
            filename: filename.into(),
            wav: wav.into(),
        }
    }

    pub fn download_path(&self) -> String {
        format!("/api/v1/outputs/{}", self.id.as_uuid())
    }
}
