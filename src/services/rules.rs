//! Static rule tables used by the scoring engine.
//!
//! Every keyword, tag group and tier adjustment lives here so the full rule set
//! can be read and tested in one place.

use crate::models::Level;

/// Score every item starts from
pub const BASE_SCORE: i32 = 5;

/// Added once per concern keyword whose region tags the item carries
pub const CONCERN_BOOST: i32 = 60;

/// Added when the item is easy to start with
pub const ACCESSIBILITY_BOOST: i32 = 10;

/// Body region a concern keyword points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRegion {
    Shoulder,
    Neck,
    Back,
    Eyes,
    Legs,
    Posture,
    Stress,
    Sleep,
}

impl BodyRegion {
    /// Tags that address this region
    pub fn wanted_tags(self) -> &'static [&'static str] {
        match self {
            BodyRegion::Shoulder => &["shoulder-relief", "shoulder-blade", "shoulder"],
            BodyRegion::Neck => &["neck-relief", "stiff-neck", "neck"],
            BodyRegion::Back => &["back-pain", "lower-back", "back"],
            BodyRegion::Eyes => &["eye-strain", "eyes"],
            BodyRegion::Legs => &["leg-fatigue", "swelling", "legs"],
            BodyRegion::Posture => &["posture-correction", "posture"],
            BodyRegion::Stress => &["stress-relief", "relax", "breathing"],
            BodyRegion::Sleep => &["better-sleep", "sleep", "relax"],
        }
    }
}

/// Concern keywords, matched case-sensitively as substrings of the concern text
pub const CONCERN_KEYWORDS: &[(&str, BodyRegion)] = &[
    ("shoulder", BodyRegion::Shoulder),
    ("neck", BodyRegion::Neck),
    ("back", BodyRegion::Back),
    ("eye", BodyRegion::Eyes),
    ("leg", BodyRegion::Legs),
    ("posture", BodyRegion::Posture),
    ("stress", BodyRegion::Stress),
    ("sleep", BodyRegion::Sleep),
];

/// Named groups of tags that tier rules refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    Gentle,
    HighIntensity,
    Active,
    Moderate,
    MoodLift,
    Achievement,
    Accessible,
}

impl TagGroup {
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            TagGroup::Gentle => &[
                "high-fatigue-friendly",
                "stretch",
                "relax",
                "breathing",
                "light",
                "seated",
            ],
            TagGroup::HighIntensity => &["strength-training", "high-intensity", "push-to-limit"],
            TagGroup::Active => &["strength-training", "cardio", "active"],
            TagGroup::Moderate => &["stretch", "strength-training"],
            TagGroup::MoodLift => &["refresh", "mood-change", "breathing", "meditation", "relax"],
            TagGroup::Achievement => &["achievement", "strength-training", "cardio"],
            TagGroup::Accessible => &["beginner-friendly", "short-duration", "seated"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FatigueTier {
    Low,
    Moderate,
    High,
}

impl FatigueTier {
    pub fn of(level: Level) -> Self {
        match level.get() {
            0..=2 => FatigueTier::Low,
            3 => FatigueTier::Moderate,
            _ => FatigueTier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodTier {
    Low,
    Neutral,
    High,
}

impl MoodTier {
    pub fn of(level: Level) -> Self {
        match level.get() {
            0..=2 => MoodTier::Low,
            3 => MoodTier::Neutral,
            _ => MoodTier::High,
        }
    }
}

/// (tier, group, delta): the delta applies when the item carries any tag of the group
pub const FATIGUE_RULES: &[(FatigueTier, TagGroup, i32)] = &[
    (FatigueTier::High, TagGroup::Gentle, 30),
    (FatigueTier::High, TagGroup::HighIntensity, -25),
    (FatigueTier::Low, TagGroup::Active, 20),
    (FatigueTier::Moderate, TagGroup::Moderate, 10),
];

pub const MOOD_RULES: &[(MoodTier, TagGroup, i32)] = &[
    (MoodTier::Low, TagGroup::MoodLift, 25),
    (MoodTier::High, TagGroup::Achievement, 10),
];

/// Regions whose keyword occurs in the concern, once per matching keyword
pub fn concern_regions(concern: &str) -> impl Iterator<Item = BodyRegion> + '_ {
    CONCERN_KEYWORDS
        .iter()
        .filter(move |(keyword, _)| concern.contains(keyword))
        .map(|(_, region)| *region)
}
