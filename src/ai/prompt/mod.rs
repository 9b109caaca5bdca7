//! Prompt Builder System
//!
//! Standardized prompt construction for the generation endpoint.
//!
//! ## Design Principles
//!
//! 1. **Context First**: Static product description before the task
//! 2. **Single Topic**: One angle per prompt
//! 3. **Exact Output Contract**: Key set and example values spelled out
//! 4. **Explicit Prohibitions**: No markdown, no code fences

use crate::constants::{generation::DOMAIN_CONTEXT, markup::ALLOWED_TAGS};
use crate::types::Category;

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Single JSON object the model must return, as (key, example) pairs
    OutputObject(Vec<(String, String)>),
    /// Hard rules the answer must follow
    Rules(Vec<String>),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add text section
    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add the output object contract
    pub fn output_object(mut self, fields: Vec<(&str, &str)>) -> Self {
        self.sections.push(PromptSection::OutputObject(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self
    }

    /// Add rules section
    pub fn rules(mut self, rules: Vec<String>) -> Self {
        self.sections.push(PromptSection::Rules(rules));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    if !content.is_empty() {
                        prompt.push_str(&content);
                        prompt.push_str("\n\n");
                    }
                }
                PromptSection::OutputObject(fields) => {
                    prompt.push_str(
                        "Return ONLY a single JSON object with exactly these keys:\n{\n",
                    );
                    let last = fields.len().saturating_sub(1);
                    for (i, (key, example)) in fields.iter().enumerate() {
                        prompt.push_str(&format!("  \"{}\": {}", key, json_string(example)));
                        prompt.push_str(if i < last { ",\n" } else { "\n" });
                    }
                    prompt.push_str("}\n\n");
                }
                PromptSection::Rules(rules) => {
                    prompt.push_str("<RULES>\n");
                    for rule in rules {
                        prompt.push_str(&format!("- {}\n", rule));
                    }
                    prompt.push_str("</RULES>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Preset prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Blog post prompt for a pre-selected category
    pub fn blog_post(category: Category) -> PromptBuilder {
        PromptBuilder::new()
            .text(DOMAIN_CONTEXT)
            .text(&format!(
                "Write a high-quality blog post about: {}",
                category.angle()
            ))
            .section("Output Format", "")
            .output_object(vec![
                ("title", "catchy title"),
                ("summary", "1-2 sentence summary"),
                (
                    "html_content",
                    "<h3>Headline</h3><p>Detailed paragraph about Piggybank...</p>",
                ),
                ("category", category.as_str()),
            ])
            .rules(vec![
                format!(
                    "html_content may only use these HTML tags: {}",
                    ALLOWED_TAGS.join(", ")
                ),
                "Every opened tag in html_content must be closed".to_string(),
                "Use bare tags with no attributes; write line breaks as <br>".to_string(),
                "Escape &, < and > in text as &amp;, &lt; and &gt;".to_string(),
                "Do NOT use markdown syntax (#, **, -, [text](url)) anywhere".to_string(),
                "Do NOT use markdown code blocks like ```json around the object".to_string(),
                "Do NOT add keys beyond the four listed".to_string(),
            ])
    }
}
