use std::fmt;
use std::num::NonZeroU32;

/// 1-based speaker number. Reference clip `i` (0-based upload order) becomes
/// `SpeakerId(i + 1)`, which is how "Speaker N" labels in a transcript are
/// mapped back to voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeakerId(NonZeroU32);

impl SpeakerId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn from_upload_index(index: usize) -> Self {
        let id = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    pub fn label(&self) -> String {
        format!("Speaker {}", self.0)
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
