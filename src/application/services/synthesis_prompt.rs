use crate::application::ports::SpeakerVoiceAssignment;
use crate::domain::{ConversionMode, SpeakerProfile};

pub const DEFAULT_PROSODY_NOTE: &str = "Normal pacing.";

/// Sentence prepended to the transcript in mimic mode.
pub fn delivery_instruction(prosody_note: &str) -> String {
    format!("Perform with this specific delivery style: {}. ", prosody_note)
}

pub fn synthesis_instruction(
    mode: ConversionMode,
    transcript: &str,
    prosody_note: Option<&str>,
) -> String {
    match (mode, prosody_note) {
        (ConversionMode::Mimic, Some(note)) => format!(
            "Re-enact the following conversation using the assigned voices. \n\nIMPORTANT INSTRUCTION: {}\n\nTranscript:\n{}",
            delivery_instruction(note),
            transcript
        ),
        _ => format!(
            "Synthesize the following conversation clearly and naturally.\n\nTranscript:\n{}",
            transcript
        ),
    }
}

/// One `Speaker N -> voice` entry per profile, in speaker id order.
pub fn speaker_voice_assignments(profiles: &[SpeakerProfile]) -> Vec<SpeakerVoiceAssignment> {
    let mut ordered: Vec<&SpeakerProfile> = profiles.iter().collect();
    ordered.sort_by_key(|p| p.id);

    ordered
        .into_iter()
        .map(|profile| {
            if profile.voice_name.is_none() {
                tracing::warn!(
                    speaker = %profile.id,
                    voice = %profile.assigned_voice(),
                    "Profile has no recognized voice, falling back to default"
                );
            }
            SpeakerVoiceAssignment {
                speaker: profile.label(),
                voice: profile.assigned_voice(),
            }
        })
        .collect()
}
