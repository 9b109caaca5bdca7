//! AI Integration Layer
//!
//! Everything needed to turn a category into a validated `GeneratedPost`.

pub mod generator;
pub mod prompt;
pub mod provider;
pub mod selection;
pub mod timeout;
pub mod validation;

pub use generator::ContentGenerator;
pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{GeminiClient, TextGenerator};
pub use selection::{
    CategorySelector, FixedSelector, RandomSelector, ScheduleSelector, selector_for,
};
pub use timeout::{TimeoutConfig, with_timeout};
pub use validation::{parse_post, reject_markdown, strip_code_fences, validate_fragment};
