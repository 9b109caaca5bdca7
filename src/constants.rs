//! Global Constants
//!
//! Centralized constants for endpoints, timeouts, and content rules.

/// Generation endpoint constants
pub mod generation {
    /// Gemini REST API base
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default model for `generateContent`
    pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

    /// Method name a model must support to be usable
    pub const GENERATE_METHOD: &str = "generateContent";

    /// Static product description opening every prompt
    pub const DOMAIN_CONTEXT: &str = "Piggybank is a Web3 mini-app by 'Propaganda'. It lives on Farcaster and Zora. It's about on-chain social interactions.";
}

/// CMS constants
pub mod cms {
    /// Webflow Data API base
    pub const DEFAULT_API_BASE: &str = "https://api.webflow.com/v2";

    /// Value of the `accept-version` header
    pub const DEFAULT_API_VERSION: &str = "2.0.0";
}

/// Network timeouts
pub mod network {
    /// Generation requests (seconds)
    pub const GENERATION_TIMEOUT_SECS: u64 = 60;

    /// CMS requests (seconds)
    pub const PUBLISH_TIMEOUT_SECS: u64 = 30;

    /// TCP connect (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
}

/// HTML content rules
pub mod markup {
    /// Tags a generated body may use
    pub const ALLOWED_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "strong", "em", "br"];
}

/// Environment variables holding secrets
pub mod env {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const WEBFLOW_API_TOKEN: &str = "WEBFLOW_API_TOKEN";
    pub const WEBFLOW_COLLECTION_ID: &str = "WEBFLOW_COLLECTION_ID";

    /// Prefix for non-secret config overrides (`AUTOBLOG_CMS__PUBLISH_MODE`)
    pub const CONFIG_PREFIX: &str = "AUTOBLOG_";
}
