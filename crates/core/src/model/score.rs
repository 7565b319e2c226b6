use std::fmt;

/// Qualitative bucket for a session score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Perfect,
    Great,
    Good,
    Practice,
}

impl ScoreTier {
    /// Classify a correct/total ratio, checked in order: all correct,
    /// at least 70%, at least 50%, everything else.
    ///
    /// Callers guarantee `total > 0`; sessions reject empty question sets at
    /// start.
    #[must_use]
    pub fn classify(correct: usize, total: usize) -> Self {
        debug_assert!(total > 0, "sessions never hold zero questions");
        if total == 0 {
            return Self::Practice;
        }
        if correct == total {
            return Self::Perfect;
        }

        let ratio = correct as f64 / total as f64;
        if ratio >= 0.7 {
            Self::Great
        } else if ratio >= 0.5 {
            Self::Good
        } else {
            Self::Practice
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Great => "great",
            Self::Good => "good",
            Self::Practice => "practice",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final or in-progress tally for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    pub tier: ScoreTier,
}

impl ScoreSummary {
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        Self {
            correct,
            total,
            tier: ScoreTier::classify(correct, total),
        }
    }
}
