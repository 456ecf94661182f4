use polyvoice::application::services::{
    delivery_instruction, speaker_voice_assignments, synthesis_instruction,
};
use polyvoice::domain::{ConversionMode, SpeakerId, SpeakerProfile, VoiceAnalysis, VoiceName};

fn profile(id: u32, voice: Option<VoiceName>) -> SpeakerProfile {
    SpeakerProfile::new(
        SpeakerId::new(id).unwrap(),
        VoiceAnalysis {
            style_description: format!("style {}", id),
            closest_voice: voice,
        },
    )
}

#[test]
fn given_mimic_mode_with_note_when_building_instruction_then_delivery_precedes_transcript() {
    let instruction = synthesis_instruction(
        ConversionMode::Mimic,
        "Speaker 1: Hi.",
        Some("Calm and slow"),
    );

    assert_eq!(
        instruction,
        "Re-enact the following conversation using the assigned voices. \n\n\
         IMPORTANT INSTRUCTION: Perform with this specific delivery style: Calm and slow. \n\n\
         Transcript:\nSpeaker 1: Hi."
    );
}

#[test]
fn given_clean_mode_when_building_instruction_then_note_is_ignored() {
    let instruction = synthesis_instruction(ConversionMode::Clean, "Speaker 1: Hi.", Some("ignored"));

    assert_eq!(
        instruction,
        "Synthesize the following conversation clearly and naturally.\n\nTranscript:\nSpeaker 1: Hi."
    );
}

#[test]
fn given_note_when_building_delivery_instruction_then_sentence_is_terminated() {
    assert_eq!(
        delivery_instruction("Normal pacing"),
        "Perform with this specific delivery style: Normal pacing. "
    );
}

#[test]
fn given_unordered_profiles_when_assigning_then_output_is_sorted_by_speaker() {
    let profiles = vec![
        profile(3, Some(VoiceName::Zephyr)),
        profile(1, Some(VoiceName::Puck)),
        profile(2, None),
    ];

    let assignments = speaker_voice_assignments(&profiles);

    let pairs: Vec<(&str, VoiceName)> = assignments
        .iter()
        .map(|a| (a.speaker.as_str(), a.voice))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Speaker 1", VoiceName::Puck),
            ("Speaker 2", VoiceName::Fenrir),
            ("Speaker 3", VoiceName::Zephyr),
        ]
    );
}
