use crate::models::Personality;

use super::personality::personality_profile;

/// Ideal conversational pace band shown to the model
pub const IDEAL_WPM_RANGE: (u32, u32) = (140, 160);

/// Fields the model must return, in contract order
pub const REQUIRED_FIELDS: [&str; 9] = [
    "summary",
    "clarityScore",
    "confidenceScore",
    "engagementScore",
    "structureScore",
    "overall_score",
    "tip",
    "strengths",
    "improvements",
];

const SCORING_RUBRIC: &str = r#"**SCORING RUBRIC (guidance for every 0-100 score):**
- 0-49: poor - the dimension gets in the way of the message
- 50-69: moderate - understandable, with clear weaknesses
- 70-89: good - effective, with room to polish
- 90-100: excellent - exceptional and hard to improve on
- Score HONESTLY based on this specific speech; different speeches deserve distinct scores
- Very short speeches (under 30 words) should generally score lower"#;

const DIMENSIONS: &str = r#"**YOUR TASK:**
Analyze this SPECIFIC speech across these dimensions:

1. **CLARITY SCORE** (0-100): How clearly was the intended message communicated? Consider organization, word choice, directness and coherence.
2. **CONFIDENCE SCORE** (0-100): How confident and assertive does the speaker sound? Consider hedging language, filler words and assertive statements.
3. **ENGAGEMENT SCORE** (0-100): How engaging is the content? Consider storytelling, examples, energy and audience connection.
4. **STRUCTURE SCORE** (0-100): How well organized is the speech? Consider logical flow, a clear beginning/middle/end and transitions.
5. **OVERALL SCORE** (0-10, decimals allowed such as 8.5): Holistic evaluation across all dimensions.
6. **STRENGTHS** (3-4 specific points): What did the speaker do well? Quote the speech where possible.
7. **IMPROVEMENTS** (3-4 specific, actionable points): What should change next time?
8. **TIP** (2-3 sentences): The main improvement opportunity with actionable advice.
9. **SUMMARY** (1-2 sentences): What the speaker actually communicated."#;

const RESPONSE_FORMAT: &str = r#"**RESPONSE FORMAT:**
Return your analysis as a single JSON object with exactly this structure:
{
  "summary": "one or two sentence summary of what the speaker communicated",
  "clarityScore": number_between_0_and_100,
  "confidenceScore": number_between_0_and_100,
  "engagementScore": number_between_0_and_100,
  "structureScore": number_between_0_and_100,
  "overall_score": number_between_0_and_10_with_decimals,
  "tip": "constructive feedback with specific actionable advice (2-3 sentences)",
  "strengths": ["strength 1", "strength 2", "strength 3"],
  "improvements": ["improvement 1", "improvement 2", "improvement 3"]
}

CRITICAL: Return ONLY the JSON object. No text before or after it, no markdown, no code fences."#;

/// Build the coaching prompt sent to the LLM.
///
/// Deterministic for identical inputs. The duration block appears only when
/// the duration is known; the audio note is informational context.
pub fn build_feedback_prompt(
    transcript: &str,
    goal: &str,
    duration_seconds: u32,
    audio_present: bool,
    personality: Personality,
) -> String {
    let profile = personality_profile(personality);
    let word_count = transcript.split_whitespace().count();
    let mut prompt = String::new();

    prompt.push_str(
        "You are an expert public speaking coach analyzing a speech recording. Your goal is to \
         provide constructive, actionable feedback that helps the speaker improve.\n\n",
    );

    prompt.push_str("**YOUR COACHING PERSONALITY:**\n");
    prompt.push_str(&format!("- Tone: {}\n", profile.tone));
    prompt.push_str(&format!("- Approach: {}\n", profile.approach));
    prompt.push_str(&format!("- Example of your voice: \"{}\"\n", profile.style_example));
    prompt.push_str(
        "Keep this voice consistent in the summary, tip, strengths and improvements. \
         Personality shapes the wording only, never the scores.\n\n",
    );

    prompt.push_str(&format!("**SPEAKER'S GOAL:** {}\n\n", goal.trim()));
    prompt.push_str("**TRANSCRIPT TO ANALYZE:**\n");
    prompt.push_str(transcript.trim());
    prompt.push_str("\n\n");

    prompt.push_str("**SPEECH METRICS:**\n");
    prompt.push_str(&format!("- Word count: {}\n", word_count));
    if duration_seconds > 0 {
        let minutes = duration_seconds as f64 / 60.0;
        let wpm = word_count as u64 * 60 / duration_seconds as u64;
        prompt.push_str(&format!(
            "- Duration: {} seconds ({:.1} minutes)\n",
            duration_seconds, minutes
        ));
        prompt.push_str(&format!(
            "- Speaking pace: {} WPM (ideal: {}-{} WPM)\n",
            wpm, IDEAL_WPM_RANGE.0, IDEAL_WPM_RANGE.1
        ));
    }
    prompt.push('\n');

    prompt.push_str("**AUDIO ANALYSIS NOTES:**\n");
    if audio_present {
        prompt.push_str(
            "An audio recording was provided, but only the transcript is available to you. \
             Base your analysis on the transcript.\n\n",
        );
    } else {
        prompt.push_str("No audio file provided - analysis based on transcript only.\n\n");
    }

    prompt.push_str(SCORING_RUBRIC);
    prompt.push_str("\n\n");
    prompt.push_str(DIMENSIONS);
    prompt.push_str("\n\n");
    prompt.push_str(
        "Note any excessive filler words or verbal crutches (um, uh, like, you know, so, \
         basically, actually, literally, kind of, sort of).\n\n",
    );
    prompt.push_str(RESPONSE_FORMAT);

    prompt
}
