//! Occupation presets and their occupational skill lists.
//!
//! An investigator's occupation determines which skills may receive
//! occupation points. Occupations not in this table are custom: the player
//! selects the occupational skills explicitly, capped at
//! [`MAX_CUSTOM_OCCUPATIONAL_SKILLS`].

/// Maximum number of occupational skills a custom occupation may select.
pub const MAX_CUSTOM_OCCUPATIONAL_SKILLS: usize = 8;

const OCCUPATIONS: &[(&str, &[&str])] = &[
    (
        "Antiquarian",
        &[
            "Appraise",
            "Art/Craft",
            "History",
            "Library Use",
            "Language (Other)",
            "Occult",
            "Spot Hidden",
        ],
    ),
    (
        "Author",
        &[
            "Art/Craft",
            "History",
            "Library Use",
            "Natural World",
            "Occult",
            "Language (Other)",
            "Language (Own)",
            "Psychology",
        ],
    ),
    (
        "Detective",
        &[
            "Firearms (Handgun)",
            "Law",
            "Listen",
            "Psychology",
            "Spot Hidden",
            "Stealth",
            "Disguise",
        ],
    ),
    (
        "Doctor of Medicine",
        &[
            "First Aid",
            "Medicine",
            "Psychology",
            "Science",
            "Language (Other)",
            "Psychoanalysis",
        ],
    ),
    (
        "Journalist",
        &[
            "Art/Craft",
            "History",
            "Library Use",
            "Language (Own)",
            "Fast Talk",
            "Psychology",
        ],
    ),
    (
        "Police Officer",
        &[
            "Fighting (Brawl)",
            "Firearms (Handgun)",
            "First Aid",
            "Intimidate",
            "Law",
            "Psychology",
            "Spot Hidden",
            "Drive Auto",
        ],
    ),
    (
        "Professor",
        &[
            "Library Use",
            "Language (Other)",
            "Language (Own)",
            "Psychology",
            "History",
            "Occult",
        ],
    ),
    (
        "Private Investigator",
        &[
            "Art/Craft",
            "Disguise",
            "Law",
            "Library Use",
            "Listen",
            "Psychology",
            "Spot Hidden",
            "Stealth",
        ],
    ),
];

/// Look up the occupational skill list for a preset occupation.
pub fn occupational_skills(occupation: &str) -> Option<&'static [&'static str]> {
    OCCUPATIONS
        .iter()
        .find(|(name, _)| *name == occupation)
        .map(|(_, skills)| *skills)
}

/// Names of all preset occupations.
pub fn occupation_names() -> impl Iterator<Item = &'static str> {
    OCCUPATIONS.iter().map(|(name, _)| *name)
}
