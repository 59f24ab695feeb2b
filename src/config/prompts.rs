//! Prompt templates for the completion stage.
//!
//! Each mode has a system instruction and a user template. Templates can be
//! overridden by placing `summarize.toml` or `translate.toml` in the custom
//! prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub summarize: ModePrompts,
    pub translate: ModePrompts,
}

/// System instruction and user template for one completion mode.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModePrompts {
    pub system: String,
    /// User message template; `{{text}}` is replaced with the input.
    pub user: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            summarize: ModePrompts {
                system: r#"You are an expert in summarizing university lectures.
The following transcript comes from a YouTube lecture video.

Goal: Clearly summarize the overall structure and key arguments of the lecture.

Output format:
1. Overview - one paragraph describing the lecture's theme and purpose
2. Main Points (5-10 items)
   - For each item: include the main idea and short supporting example or note (if any)
3. Key Messages - the lecturer's emphasized takeaways or conclusions
4. Learning Points - what the audience should understand or remember after watching

Guidelines:
- Preserve the logical order and structure of explanation
- Keep concrete examples only when they clarify key ideas
- Briefly explain technical terms in simple language (e.g., "cohort = a group born in the same period")"#
                    .to_string(),
                user: "Summarize the following English text:\n\n{{text}}".to_string(),
            },
            translate: ModePrompts {
                system: r#"You are a professional translator who translates English into natural Japanese.
Please ensure the output is fluent and natural, not literal."#
                    .to_string(),
                user: "Translate the following English summary into Japanese:\n\n{{text}}"
                    .to_string(),
            },
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from `custom_dir` when present.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summarize_path = custom_path.join("summarize.toml");
            if summarize_path.exists() {
                let content = std::fs::read_to_string(&summarize_path)?;
                prompts.summarize = toml::from_str(&content)?;
            }

            let translate_path = custom_path.join("translate.toml");
            if translate_path.exists() {
                let content = std::fs::read_to_string(&translate_path)?;
                prompts.translate = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summarize.system.contains("summarizing university lectures"));
        assert!(prompts.translate.system.contains("Japanese"));
        assert!(prompts.summarize.user.contains("{{text}}"));
        assert!(prompts.translate.user.contains("{{text}}"));
    }

    #[test]
    fn test_render_template() {
        let mut vars = HashMap::new();
        vars.insert("text".to_string(), "Hello world.".to_string());

        let result = Prompts::render(&Prompts::default().summarize.user, &vars);
        assert_eq!(result, "Summarize the following English text:\n\nHello world.");
    }

    #[test]
    fn test_custom_dir_overrides_one_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("translate.toml"),
            "system = \"Translate into French.\"\nuser = \"{{text}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str()).unwrap();
        assert_eq!(prompts.translate.system, "Translate into French.");
        assert_eq!(prompts.translate.user, "{{text}}");
        assert_eq!(prompts.summarize.user, Prompts::default().summarize.user);
    }
}
