use serde_json::{Value, json};

use crate::domain::VoiceName;

pub fn voice_profile_prompt() -> String {
    format!(
        "Analyze this speaker's voice.\n\
         1. Provide a concise style description (gender, age, tone, speed, emotion).\n\
         2. Select the closest matching voice personality from this list: [{}].",
        VoiceName::catalogue()
    )
}

pub fn voice_profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "styleDescription": {
                "type": "STRING",
                "description": "A concise description of the voice style."
            },
            "closestVoice": {
                "type": "STRING",
                "description": format!("The closest match from the list [{}]", VoiceName::catalogue())
            }
        },
        "required": ["styleDescription", "closestVoice"]
    })
}

pub const PROSODY_PROMPT: &str = "Describe the pacing, speed, pauses, and emotional intensity of this audio in one clear sentence. Do not mention the content, only the delivery style.";

pub fn transcription_prompt(speaker_count: usize) -> String {
    let mut prompt = String::from("Transcribe exactly what is spoken in this audio. ");
    if speaker_count > 1 {
        prompt.push_str(&format!(
            "Identify distinct speakers. Label them strictly as \"Speaker 1\", \"Speaker 2\", etc., up to \"Speaker {}\". Format the output as a script, e.g., \nSpeaker 1: Hello there.\nSpeaker 2: Hi, how are you?",
            speaker_count
        ));
    } else {
        prompt.push_str("Format the output as: Speaker 1: [text]");
    }
    prompt
}
