pub mod error;
pub mod post;

pub use error::{
    AppError, ErrorCategory, GenerationError, PublishError, Result, TimeoutError,
    ValidationError, ValidationErrorKind,
};
pub use post::{Category, GeneratedPost, RawPost};
