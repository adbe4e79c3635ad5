//! Batch result collection and the pass/fail verdict.

use crate::catalog::Category;

/// Outcome of testing one discovered model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Model name as reported by discovery
    pub model: String,
    /// Category the prompt was chosen from
    pub category: Category,
    /// Whether the generation succeeded
    pub success: bool,
}

impl TestResult {
    /// Create a result.
    pub fn new(model: impl Into<String>, category: Category, success: bool) -> Self {
        Self {
            model: model.into(),
            category,
            success,
        }
    }
}

/// Qualitative summary of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every test passed
    AllPassed,
    /// At least one passed, at least one failed
    SomePassed,
    /// Nothing passed
    AllFailed,
}

impl Verdict {
    /// Closing line printed under the tally.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AllPassed => "All tests passed!",
            Self::SomePassed => "Some tests failed",
            Self::AllFailed => "All tests failed",
        }
    }
}

/// Results of a batch run, in test order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    results: Vec<TestResult>,
}

impl BatchSummary {
    /// Empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    pub fn record(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// All results in the order they were recorded.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Number of successful tests.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of tests run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// `passed/total`, e.g. `2/3`.
    #[must_use]
    pub fn tally(&self) -> String {
        format!("{}/{}", self.passed(), self.total())
    }

    /// Overall verdict.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let passed = self.passed();
        if passed == self.total() {
            Verdict::AllPassed
        } else if passed > 0 {
            Verdict::SomePassed
        } else {
            Verdict::AllFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcomes: &[bool]) -> BatchSummary {
        let mut s = BatchSummary::new();
        for (i, ok) in outcomes.iter().enumerate() {
            s.record(TestResult::new(format!("model-{i}"), Category::General, *ok));
        }
        s
    }

    #[test]
    fn test_all_passed() {
        let s = summary(&[true, true]);
        assert_eq!(s.tally(), "2/2");
        assert_eq!(s.verdict(), Verdict::AllPassed);
    }

    #[test]
    fn test_some_passed() {
        let s = summary(&[true, false, true]);
        assert_eq!(s.passed(), 2);
        assert_eq!(s.total(), 3);
        assert_eq!(s.tally(), "2/3");
        assert_eq!(s.verdict(), Verdict::SomePassed);
    }

    #[test]
    fn test_all_failed() {
        let s = summary(&[false, false]);
        assert_eq!(s.tally(), "0/2");
        assert_eq!(s.verdict(), Verdict::AllFailed);
    }

    #[test]
    fn test_results_keep_order() {
        let s = summary(&[false, true]);
        let names: Vec<_> = s.results().iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, ["model-0", "model-1"]);
    }

    #[test]
    fn test_verdict_messages() {
        assert!(Verdict::AllPassed.message().contains("passed"));
        assert!(Verdict::AllFailed.message().contains("failed"));
    }
}
