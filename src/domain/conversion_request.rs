use super::{AudioClip, ConversionMode};

pub const MAX_REFERENCE_CLIPS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    source: AudioClip,
    references: Vec<AudioClip>,
    mode: ConversionMode,
}

impl ConversionRequest {
    pub fn new(
        source: Option<AudioClip>,
        references: Vec<AudioClip>,
        mode: ConversionMode,
    ) -> Result<Self, InputError> {
        let source = source.ok_or(InputError::MissingSource)?;
        match references.len() {
            0 => Err(InputError::NoReferences),
            n if n > MAX_REFERENCE_CLIPS => Err(InputError::TooManyReferences(n)),
            _ => Ok(Self {
                source,
                references,
                mode,
            }),
        }
    }

    pub fn source(&self) -> &AudioClip {
        &self.source
    }

    /// Reference clips in upload order.
    pub fn references(&self) -> &[AudioClip] {
        &self.references
    }

    pub fn speaker_count(&self) -> usize {
        self.references.len()
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("a source clip and at least one reference clip are required (source missing)")]
    MissingSource,
    #[error("a source clip and at least one reference clip are required (no reference clips)")]
    NoReferences,
    #[error("at most {max} reference clips are allowed, got {0}", max = MAX_REFERENCE_CLIPS)]
    TooManyReferences(usize),
}
