//! Console output for probe runs

use crate::config::{CliConfig, ColorChoice};
use console::{style, Term};
use ollama_probe::{BatchSummary, TestResult, Verdict};

/// Width of the separator rules
const RULE_WIDTH: usize = 60;

/// Line prefix kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Passed check
    Success,
    /// Failed check
    Failure,
    /// Non-fatal problem
    Warning,
    /// Neutral information
    Info,
}

/// Line-oriented reporter writing to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Create a reporter honoring the configured color and verbosity
    ///
    /// `--color always` also forces styling when stdout is not a terminal.
    #[must_use]
    pub fn from_config(config: &CliConfig) -> Self {
        if config.color == ColorChoice::Always {
            console::set_colors_enabled(true);
        }
        Self::new(config.color.should_color(), config.verbosity.is_quiet())
    }

    /// Render a prefixed line without printing it
    #[must_use]
    pub fn format_line(&self, level: Level, message: &str) -> String {
        let prefix = if self.use_color {
            match level {
                Level::Success => style("✓").green().bold().to_string(),
                Level::Failure => style("✗").red().bold().to_string(),
                Level::Warning => style("⚠").yellow().bold().to_string(),
                Level::Info => style("ℹ").blue().bold().to_string(),
            }
        } else {
            match level {
                Level::Success => "PASS",
                Level::Failure => "FAIL",
                Level::Warning => "WARN",
                Level::Info => "INFO",
            }
            .to_string()
        };
        format!("{prefix} {message}")
    }

    fn write(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(&self.format_line(Level::Success, message));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        self.write(&self.format_line(Level::Failure, message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(&self.format_line(Level::Warning, message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(&self.format_line(Level::Info, message));
    }

    /// Print an indented detail line under a failure; shown in quiet mode too
    pub fn detail(&self, message: &str) {
        self.write(&format!("   {message}"));
    }

    /// Print unprefixed text
    pub fn plain(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(message);
    }

    /// Print a blank line
    pub fn blank(&self) {
        self.plain("");
    }

    /// Print a dashed separator
    pub fn rule(&self) {
        self.plain(&"-".repeat(RULE_WIDTH));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).bold().to_string()
        } else {
            title.to_string()
        };
        self.write(&styled);
        self.write(&"=".repeat(title.chars().count().max(RULE_WIDTH / 2)));
    }

    /// Render one batch result line
    #[must_use]
    pub fn format_result(&self, result: &TestResult) -> String {
        let level = if result.success {
            Level::Success
        } else {
            Level::Failure
        };
        self.format_line(level, &format!("{} ({})", result.model, result.category))
    }

    /// Print the per-model lines, tally and verdict of a batch run
    pub fn batch_summary(&self, summary: &BatchSummary) {
        let failed = summary.passed() < summary.total();
        if self.quiet && !failed {
            return;
        }

        self.write("");
        self.write(&"=".repeat(RULE_WIDTH));
        self.write("TEST SUMMARY");
        self.write(&"=".repeat(RULE_WIDTH));
        for result in summary.results() {
            self.write(&self.format_result(result));
        }
        self.write("");
        self.write(&format!("Results: {} tests successful", summary.tally()));

        let verdict = summary.verdict();
        let level = match verdict {
            Verdict::AllPassed => Level::Success,
            Verdict::SomePassed => Level::Warning,
            Verdict::AllFailed => Level::Failure,
        };
        self.write(&self.format_line(level, verdict.message()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};
    use ollama_probe::Category;

    #[test]
    fn test_new_reporter() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_from_config() {
        let config = CliConfig::new()
            .with_color(ColorChoice::Never)
            .with_verbosity(Verbosity::Quiet);
        let reporter = Reporter::from_config(&config);
        assert!(!reporter.use_color);
        assert!(reporter.quiet);
    }

    #[test]
    fn test_color_always_emits_ansi_when_piped() {
        let config = CliConfig::new().with_color(ColorChoice::Always);
        let reporter = Reporter::from_config(&config);
        assert!(reporter.use_color);
        assert!(reporter.format_line(Level::Success, "ok").contains("\u{1b}["));
    }

    #[test]
    fn test_plain_prefixes() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.format_line(Level::Success, "ok"), "PASS ok");
        assert_eq!(reporter.format_line(Level::Failure, "bad"), "FAIL bad");
        assert_eq!(reporter.format_line(Level::Warning, "hmm"), "WARN hmm");
        assert_eq!(reporter.format_line(Level::Info, "fyi"), "INFO fyi");
    }

    #[test]
    fn test_colored_prefix_contains_symbol() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.format_line(Level::Success, "ok").contains('✓'));
        assert!(reporter.format_line(Level::Failure, "bad").contains('✗'));
    }

    #[test]
    fn test_format_result() {
        let reporter = Reporter::new(false, false);
        let ok = TestResult::new("opencoder:1.5b", Category::OpenCoder, true);
        let bad = TestResult::new("llama3", Category::General, false);
        assert_eq!(reporter.format_result(&ok), "PASS opencoder:1.5b (opencoder)");
        assert_eq!(reporter.format_result(&bad), "FAIL llama3 (general)");
    }

    #[test]
    fn test_output_methods_do_not_panic() {
        let reporter = Reporter::new(false, false);
        reporter.header("Header");
        reporter.success("passed");
        reporter.failure("failed");
        reporter.warning("warning");
        reporter.info("info");
        reporter.detail("detail");
        reporter.rule();
        reporter.blank();
    }

    #[test]
    fn test_batch_summary_prints() {
        let reporter = Reporter::new(false, true);
        let mut summary = BatchSummary::new();
        summary.record(TestResult::new("a", Category::General, true));
        summary.record(TestResult::new("b", Category::General, false));
        reporter.batch_summary(&summary);
    }
}
