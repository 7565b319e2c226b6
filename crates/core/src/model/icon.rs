use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Icon vocabulary shown next to topics in the list view.
///
/// Serialized as the platform icon key so cached documents stay readable by
/// the presentation layer. Unrecognized keys map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicIcon {
    Function,
    Bolt,
    Atom,
    Book,
    Tv,
    Music,
    Sports,
    Unknown,
}

// First match wins: a title matching several keyword sets resolves to the
// earliest rule.
const CLASSIFICATION_RULES: &[(&[&str], TopicIcon)] = &[
    (&["math", "science"], TopicIcon::Function),
    (&["marvel", "hero", "comic"], TopicIcon::Bolt),
    (&["science", "physics", "chemistry"], TopicIcon::Atom),
    (&["history", "world"], TopicIcon::Book),
    (&["movie", "film", "tv"], TopicIcon::Tv),
    (&["music", "song"], TopicIcon::Music),
    (&["sport", "game"], TopicIcon::Sports),
];

impl TopicIcon {
    /// Classify a free-text topic title into an icon.
    ///
    /// Case-insensitive substring matching against the ordered rule table,
    /// falling back to `Unknown` when no keyword matches.
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        let lowered = title.to_lowercase();
        for (keywords, icon) in CLASSIFICATION_RULES {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return *icon;
            }
        }
        Self::Unknown
    }

    /// The platform icon key this variant serializes to.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Bolt => "bolt.fill",
            Self::Atom => "atom",
            Self::Book => "book.fill",
            Self::Tv => "tv.fill",
            Self::Music => "music.note",
            Self::Sports => "sportscourt.fill",
            Self::Unknown => "questionmark.circle",
        }
    }

    /// Resolve an icon key back to its variant, `Unknown` for anything
    /// outside the vocabulary.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "function" => Self::Function,
            "bolt.fill" => Self::Bolt,
            "atom" => Self::Atom,
            "book.fill" => Self::Book,
            "tv.fill" => Self::Tv,
            "music.note" => Self::Music,
            "sportscourt.fill" => Self::Sports,
            _ => Self::Unknown,
        }
    }
}

impl Serialize for TopicIcon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for TopicIcon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}
