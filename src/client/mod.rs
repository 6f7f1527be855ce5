//! Generation service seam.

pub mod image;
pub mod openai;

pub use image::ProductImage;
pub use openai::OpenAiClient;

use crate::errors::AppResult;

/// Everything the service needs for one post.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub image: &'a ProductImage,
    pub product_name: &'a str,
    pub style: &'a str,
}

/// A text-generation backend. One blocking call, no retries.
pub trait Generator {
    fn generate(&self, req: &GenerationRequest<'_>) -> AppResult<String>;
}
