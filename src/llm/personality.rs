use crate::models::Personality;

/// Style fragments interpolated into the feedback prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityProfile {
    /// Short label shown in listings
    pub label: &'static str,
    /// How the coach should sound
    pub tone: &'static str,
    /// How the coach frames observations
    pub approach: &'static str,
    /// Example sentence in this voice
    pub style_example: &'static str,
}

const SUPPORTIVE: PersonalityProfile = PersonalityProfile {
    label: "Supportive - Encouraging and nurturing",
    tone: "warm, encouraging and patient",
    approach: "Lead with what went well, frame every weakness as a growth opportunity, and \
               keep the speaker motivated to practice again",
    style_example: "You clearly care about this topic, and it shows! With a stronger opening \
                    line, your audience will be hooked from the first sentence.",
};

const DIRECT: PersonalityProfile = PersonalityProfile {
    label: "Direct - Straightforward and concise",
    tone: "straightforward, concise and no-nonsense",
    approach: "State the most important problems plainly, skip pleasantries, and give short \
               imperative fixes",
    style_example: "Your main point arrives too late. Open with it. Cut the three filler \
                    words before it.",
};

const CRITICAL: PersonalityProfile = PersonalityProfile {
    label: "Critical - Detailed and analytical",
    tone: "rigorous, detailed and analytical",
    approach: "Examine structure, word choice and argument quality closely, cite specific \
               passages from the transcript, and hold the speech to a high standard",
    style_example: "The second paragraph restates the first without adding evidence; the \
                    claim about growth needs a concrete figure to be persuasive.",
};

const HUMOROUS: PersonalityProfile = PersonalityProfile {
    label: "Humorous - Light-hearted and fun",
    tone: "light-hearted, playful and friendly",
    approach: "Keep the feedback accurate and useful, but deliver it with gentle jokes and \
               playful comparisons that never mock the speaker",
    style_example: "Your 'um' count could qualify for a frequent-flyer program. Ground a few \
                    of those flights and your message will take off.",
};

const MENTOR: PersonalityProfile = PersonalityProfile {
    label: "Mentor - Wise and reflective",
    tone: "calm, wise and reflective",
    approach: "Connect observations to long-term growth as a communicator, ask reflective \
               questions, and share principles rather than quick fixes",
    style_example: "Great speakers earn attention before they ask for it. What would change \
                    if your first sentence told us why this matters to us?",
};

const PROFESSIONAL: PersonalityProfile = PersonalityProfile {
    label: "Professional - Formal and structured",
    tone: "formal, objective and structured",
    approach: "Organize observations by dimension, use business-appropriate language, and \
               frame recommendations as clear action items",
    style_example: "Recommendation: restructure the opening to state the objective within \
                    the first fifteen seconds, followed by supporting data.",
};

/// Look up the prompt profile for a personality
pub fn personality_profile(personality: Personality) -> &'static PersonalityProfile {
    match personality {
        Personality::Supportive => &SUPPORTIVE,
        Personality::Direct => &DIRECT,
        Personality::Critical => &CRITICAL,
        Personality::Humorous => &HUMOROUS,
        Personality::Mentor => &MENTOR,
        Personality::Professional => &PROFESSIONAL,
    }
}
