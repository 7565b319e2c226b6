use crate::model::icon::TopicIcon;
use crate::model::question::Question;

/// A named quiz category shown in the topic list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    title: String,
    description: String,
    icon: TopicIcon,
}

impl Topic {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, icon: TopicIcon) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon,
        }
    }

    /// Build a topic whose icon is classified from the title.
    ///
    /// Used for wire documents that carry no icon key of their own.
    #[must_use]
    pub fn classified(title: impl Into<String>, description: impl Into<String>) -> Self {
        let title = title.into();
        let icon = TopicIcon::for_title(&title);
        Self {
            title,
            description: description.into(),
            icon,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> TopicIcon {
        self.icon
    }
}

/// A topic paired with its questions. Pairing is positional; topics carry no
/// stable identifier in the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    pub topic: Topic,
    pub questions: Vec<Question>,
}

/// The full ordered collection of topics and questions, as fetched from the
/// remote source or read from the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicSet {
    entries: Vec<TopicEntry>,
}

impl TopicSet {
    #[must_use]
    pub fn new(entries: Vec<TopicEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TopicEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TopicEntry> {
        self.entries.iter()
    }

    /// The built-in topics written to a fresh install before the first
    /// successful fetch.
    #[must_use]
    pub fn default_seed() -> Self {
        Self::new(vec![
            TopicEntry {
                topic: Topic::new(
                    "Mathematics",
                    "Test your math knowledge with algebra, geometry, and more",
                    TopicIcon::Function,
                ),
                questions: vec![
                    seed_question("What is 15% of 200?", &["25", "30", "35", "40"], 1),
                    seed_question(
                        "What is the next prime number after 7?",
                        &["9", "10", "11", "13"],
                        2,
                    ),
                    seed_question("What is the value of 2^3?", &["6", "8", "9", "12"], 1),
                ],
            },
            TopicEntry {
                topic: Topic::new(
                    "Marvel Super Heroes",
                    "How well do you know your favorite Marvel characters?",
                    TopicIcon::Bolt,
                ),
                questions: vec![
                    seed_question(
                        "What is the name of Thor's hammer?",
                        &["Stormbreaker", "Gungnir", "Mjolnir", "Aegis"],
                        2,
                    ),
                    seed_question(
                        "Which Marvel character turns green when angry?",
                        &["Hawkeye", "Hulk", "Wolverine", "Cyclops"],
                        1,
                    ),
                    seed_question(
                        "Which superhero is from Wakanda?",
                        &["Black Panther", "Doctor Strange", "Iron Fist", "Falcon"],
                        0,
                    ),
                ],
            },
            TopicEntry {
                topic: Topic::new(
                    "Science",
                    "Challenge yourself with questions about physics, chemistry, and biology",
                    TopicIcon::Atom,
                ),
                questions: vec![
                    seed_question(
                        "What gas do plants absorb from the atmosphere?",
                        &["Oxygen", "Carbon Dioxide", "Nitrogen", "Helium"],
                        1,
                    ),
                    seed_question(
                        "What part of the cell contains genetic material?",
                        &["Cytoplasm", "Ribosome", "Nucleus", "Mitochondria"],
                        2,
                    ),
                    seed_question(
                        "At what temperature does water boil at sea level (in Celsius)?",
                        &["90°C", "95°C", "100°C", "105°C"],
                        2,
                    ),
                ],
            },
        ])
    }
}

impl<'a> IntoIterator for &'a TopicSet {
    type Item = &'a TopicEntry;
    type IntoIter = std::slice::Iter<'a, TopicEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn seed_question(text: &str, options: &[&str], correct_index: usize) -> Question {
    let options = options.iter().map(|&option| option.to_string()).collect();
    Question::new(text, options, correct_index).expect("seed questions are valid")
}
