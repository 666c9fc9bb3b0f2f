/// Subject used when the client sends none or a blank one.
pub const DEFAULT_SUBJECT: &str = "general";
/// Difficulty used when the client sends none or a blank one.
pub const DEFAULT_DIFFICULTY: &str = "medium";
/// Count asked of the model when the client did not ask for one.
pub const DEFAULT_QUESTION_COUNT: usize = 5;
/// Count of placeholder questions when the client did not ask for one.
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 3;
/// Upper bound for any requested count.
pub const MAX_QUESTION_COUNT: usize = 50;

/// Per-request generation knobs with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub subject: String,
    pub difficulty: String,
    /// Count requested by the client, clamped to `1..=MAX_QUESTION_COUNT`.
    pub requested_count: Option<usize>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            requested_count: None,
        }
    }
}

impl GenerationOptions {
    /// Blank strings count as absent.
    pub fn new(subject: Option<&str>, difficulty: Option<&str>, count: Option<u32>) -> Self {
        let pick = |v: Option<&str>, dflt: &str| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(dflt)
                .to_string()
        };

        Self {
            subject: pick(subject, DEFAULT_SUBJECT),
            difficulty: pick(difficulty, DEFAULT_DIFFICULTY),
            requested_count: count.map(|c| (c as usize).clamp(1, MAX_QUESTION_COUNT)),
        }
    }

    /// How many questions the prompt asks for.
    pub fn prompt_count(&self) -> usize {
        self.requested_count.unwrap_or(DEFAULT_QUESTION_COUNT)
    }

    /// How many placeholder questions to fabricate if everything else fails.
    pub fn placeholder_count(&self) -> usize {
        self.requested_count.unwrap_or(DEFAULT_PLACEHOLDER_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_and_blank_values() {
        let o = GenerationOptions::new(None, Some("  "), None);
        assert_eq!(o.subject, "general");
        assert_eq!(o.difficulty, "medium");
        assert_eq!(o.prompt_count(), 5);
        assert_eq!(o.placeholder_count(), 3);
        assert_eq!(o, GenerationOptions::default());
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(GenerationOptions::new(None, None, Some(0)).prompt_count(), 1);
        assert_eq!(
            GenerationOptions::new(None, None, Some(10_000)).placeholder_count(),
            MAX_QUESTION_COUNT
        );
        let o = GenerationOptions::new(Some(" biology "), Some("hard"), Some(7));
        assert_eq!(o.subject, "biology");
        assert_eq!(o.prompt_count(), 7);
        assert_eq!(o.placeholder_count(), 7);
    }
}
