//! Static model catalog: category markers, test profiles, example prompts
//! and the command-line alias table.

use crate::result::{ProbeError, ProbeResult};
use std::fmt;

/// Model used when no key is given on the command line.
pub const DEFAULT_MODEL: &str = "deepseek-r1:1.5b";

/// Substring identifying image-prompt generator models.
pub const IMAGE_PROMPT_MARKER: &str = "genaiimagecsprompt";

/// Test profile category derived from a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// OpenCoder family
    OpenCoder,
    /// DeepSeek Coder family
    DeepseekCoder,
    /// DeepSeek-R1 reasoning family
    DeepseekR1,
    /// Image-prompt generator
    ImagePrompt,
    /// Anything else
    General,
}

/// Categories with a marker, in match order.
const MARKED_CATEGORIES: [Category; 4] = [
    Category::OpenCoder,
    Category::DeepseekCoder,
    Category::DeepseekR1,
    Category::ImagePrompt,
];

impl Category {
    /// Stable category key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenCoder => "opencoder",
            Self::DeepseekCoder => "deepseek-coder",
            Self::DeepseekR1 => "deepseek-r1",
            Self::ImagePrompt => IMAGE_PROMPT_MARKER,
            Self::General => "general",
        }
    }

    /// Substring that selects this category, if any.
    #[must_use]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::General => None,
            other => Some(other.key()),
        }
    }

    /// Configured test profile, if this category has one.
    #[must_use]
    pub fn profile(self) -> Option<&'static TestProfile> {
        match self {
            Self::OpenCoder => Some(&OPENCODER_PROFILE),
            Self::DeepseekCoder => Some(&DEEPSEEK_CODER_PROFILE),
            Self::DeepseekR1 => Some(&DEEPSEEK_R1_PROFILE),
            Self::ImagePrompt => Some(&IMAGE_PROMPT_PROFILE),
            Self::General => None,
        }
    }

    /// Configured profile, or the generic fallback.
    #[must_use]
    pub fn profile_or_fallback(self) -> &'static TestProfile {
        self.profile().unwrap_or(&FALLBACK_PROFILE)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Map a model name to its category. First marker match wins.
#[must_use]
pub fn categorize(model_name: &str) -> Category {
    MARKED_CATEGORIES
        .into_iter()
        .find(|c| c.marker().is_some_and(|m| model_name.contains(m)))
        .unwrap_or(Category::General)
}

/// Prompt and human-readable description for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestProfile {
    /// Prompt text
    pub prompt: &'static str,
    /// What the prompt exercises
    pub description: &'static str,
}

static OPENCODER_PROFILE: TestProfile = TestProfile {
    prompt: "Write a Python function that implements the quicksort sorting algorithm.",
    description: "Programming test",
};

static DEEPSEEK_CODER_PROFILE: TestProfile = TestProfile {
    prompt: "Explain how recursion works in programming and give a practical example.",
    description: "Programming test",
};

static DEEPSEEK_R1_PROFILE: TestProfile = TestProfile {
    prompt: "If a train leaves Madrid at 10:00 AM travelling at 120 km/h, and another train \
             leaves Barcelona at 11:00 AM towards Madrid at 100 km/h, at what time will they \
             meet if the distance between the cities is 500 km? Explain your reasoning step \
             by step.",
    description: "Mathematical reasoning test",
};

static IMAGE_PROMPT_PROFILE: TestProfile = TestProfile {
    prompt: "Generate a detailed prompt for an image of a robot chef cooking in a futuristic \
             kitchen with steampunk elements.",
    description: "Image prompt generation test",
};

/// Used for models that match no category marker.
pub static FALLBACK_PROFILE: TestProfile = TestProfile {
    prompt: "Briefly explain what artificial intelligence is.",
    description: "General test",
};

/// Example prompt families for interactive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Code generation
    Coding,
    /// Step-by-step reasoning
    Reasoning,
    /// Image-prompt generation
    ImagePrompt,
    /// General knowledge
    General,
}

impl PromptKind {
    /// Pick the prompt family for a resolved model name.
    ///
    /// Any `coder` name counts as coding; `r1` as reasoning.
    #[must_use]
    pub fn for_model(model_name: &str) -> Self {
        if model_name.contains("coder") {
            Self::Coding
        } else if model_name.contains("r1") {
            Self::Reasoning
        } else if model_name.contains(IMAGE_PROMPT_MARKER) {
            Self::ImagePrompt
        } else {
            Self::General
        }
    }

    /// Example prompt text.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Coding => {
                "Write a Python function that computes the factorial of a number using recursion."
            }
            Self::Reasoning => {
                "If I have 3 apples and eat 1, then buy 2 more, how many apples do I have? \
                 Explain your reasoning step by step."
            }
            Self::ImagePrompt => {
                "Generate a detailed prompt for an image of a space cat travelling in a \
                 futuristic spaceship."
            }
            Self::General => {
                "Briefly explain what artificial intelligence is and its main applications."
            }
        }
    }
}

/// Command-line shorthand for an installable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelAlias {
    /// Key accepted on the command line
    pub key: &'static str,
    /// Model name as the server knows it
    pub model: &'static str,
    /// One-line description for help output
    pub description: &'static str,
}

/// Known model aliases, in help order.
pub static MODEL_ALIASES: &[ModelAlias] = &[
    ModelAlias { key: "opencoder-8b", model: "opencoder:8b", description: "OpenCoder 8B (code)" },
    ModelAlias { key: "opencoder-1.5b", model: "opencoder:1.5b", description: "OpenCoder 1.5B (lightweight code)" },
    ModelAlias { key: "deepseek-coder-6.7b", model: "deepseek-coder:6.7b", description: "DeepSeek Coder 6.7B" },
    ModelAlias { key: "deepseek-coder-1.3b", model: "deepseek-coder:1.3b", description: "DeepSeek Coder 1.3B" },
    ModelAlias { key: "deepseek-r1", model: "deepseek-r1", description: "DeepSeek-R1 (reasoning)" },
    ModelAlias { key: "deepseek-r1-1.5b", model: "deepseek-r1:1.5b", description: "DeepSeek-R1 1.5B (lightweight reasoning)" },
    ModelAlias { key: "deepseek-r1-7b", model: "deepseek-r1:7b", description: "DeepSeek-R1 7B" },
    ModelAlias { key: "deepseek-r1-8b", model: "deepseek-r1:8b", description: "DeepSeek-R1 8B" },
    ModelAlias { key: "deepseek-r1-14b", model: "deepseek-r1:14b", description: "DeepSeek-R1 14B" },
    ModelAlias { key: "deepseek-r1-32b", model: "deepseek-r1:32b", description: "DeepSeek-R1 32B" },
    ModelAlias { key: "deepseek-r1-70b", model: "deepseek-r1:70b", description: "DeepSeek-R1 70B" },
    ModelAlias { key: "genaiimagecsprompt", model: "alientelligence/genaiimagecsprompt", description: "Image prompt generator" },
];

/// Resolve a command-line key to a server model name.
pub fn resolve_alias(key: &str) -> ProbeResult<&'static str> {
    MODEL_ALIASES
        .iter()
        .find(|alias| alias.key == key)
        .map(|alias| alias.model)
        .ok_or_else(|| ProbeError::UnknownModel {
            key: key.to_string(),
        })
}

/// Whether a model should be driven through the image-prompt path.
#[must_use]
pub fn is_image_prompt_model(model_name: &str) -> bool {
    model_name.contains(IMAGE_PROMPT_MARKER)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_categorize_known_markers() {
        assert_eq!(categorize("opencoder:1.5b"), Category::OpenCoder);
        assert_eq!(categorize("deepseek-coder:6.7b"), Category::DeepseekCoder);
        assert_eq!(categorize("deepseek-r1:7b"), Category::DeepseekR1);
        assert_eq!(
            categorize("alientelligence/genaiimagecsprompt"),
            Category::ImagePrompt
        );
    }

    #[test]
    fn test_categorize_falls_back_to_general() {
        assert_eq!(categorize("llama3.2:3b"), Category::General);
        assert_eq!(categorize(""), Category::General);
    }

    #[test]
    fn test_categorize_first_marker_wins() {
        // Contains both markers; opencoder is checked first
        assert_eq!(categorize("opencoder-deepseek-r1"), Category::OpenCoder);
        assert_eq!(categorize("deepseek-coder-r1"), Category::DeepseekCoder);
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(Category::OpenCoder.to_string(), "opencoder");
        assert_eq!(Category::ImagePrompt.key(), "genaiimagecsprompt");
        assert_eq!(Category::General.key(), "general");
        assert!(Category::General.marker().is_none());
    }

    #[test]
    fn test_profiles() {
        assert!(Category::OpenCoder.profile().unwrap().prompt.contains("quicksort"));
        assert!(Category::DeepseekR1.profile().unwrap().prompt.contains("500 km"));
        assert!(Category::General.profile().is_none());
        assert_eq!(Category::General.profile_or_fallback(), &FALLBACK_PROFILE);
        assert_eq!(
            Category::DeepseekCoder.profile_or_fallback().description,
            "Programming test"
        );
    }

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve_alias("deepseek-r1-1.5b").unwrap(), "deepseek-r1:1.5b");
        assert_eq!(
            resolve_alias("genaiimagecsprompt").unwrap(),
            "alientelligence/genaiimagecsprompt"
        );
        assert_eq!(resolve_alias("deepseek-r1").unwrap(), "deepseek-r1");
    }

    #[test]
    fn test_resolve_unknown_alias() {
        let err = resolve_alias("nonexistent-model").unwrap_err();
        assert!(matches!(err, ProbeError::UnknownModel { ref key } if key == "nonexistent-model"));
    }

    #[test]
    fn test_alias_keys_unique() {
        for (i, a) in MODEL_ALIASES.iter().enumerate() {
            assert!(MODEL_ALIASES[i + 1..].iter().all(|b| b.key != a.key));
        }
    }

    #[test]
    fn test_default_model_is_aliased() {
        assert!(MODEL_ALIASES.iter().any(|a| a.model == DEFAULT_MODEL));
    }

    #[test]
    fn test_prompt_kind_for_model() {
        assert_eq!(PromptKind::for_model("opencoder:8b"), PromptKind::Coding);
        assert_eq!(PromptKind::for_model("deepseek-coder:1.3b"), PromptKind::Coding);
        assert_eq!(PromptKind::for_model("deepseek-r1:1.5b"), PromptKind::Reasoning);
        assert_eq!(
            PromptKind::for_model("alientelligence/genaiimagecsprompt"),
            PromptKind::ImagePrompt
        );
        assert_eq!(PromptKind::for_model("llama3"), PromptKind::General);
        assert!(PromptKind::Coding.prompt().contains("factorial"));
    }

    #[test]
    fn test_is_image_prompt_model() {
        assert!(is_image_prompt_model("alientelligence/genaiimagecsprompt"));
        assert!(!is_image_prompt_model("deepseek-r1:7b"));
    }

    proptest! {
        #[test]
        fn prop_categorize_is_deterministic(name in ".*") {
            prop_assert_eq!(categorize(&name), categorize(&name));
        }

        #[test]
        fn prop_categorize_general_iff_no_marker(name in "[a-z0-9:./-]{0,40}") {
            let has_marker = MARKED_CATEGORIES
                .iter()
                .filter_map(|c| c.marker())
                .any(|m| name.contains(m));
            prop_assert_eq!(categorize(&name) == Category::General, !has_marker);
        }

        #[test]
        fn prop_categorize_matches_own_marker(prefix in "[a-z]{0,8}", suffix in "[:a-z0-9]{0,8}") {
            let name = format!("{prefix}deepseek-r1{suffix}");
            let category = categorize(&name);
            prop_assert!(category.marker().is_some_and(|m| name.contains(m)));
        }
    }
}
