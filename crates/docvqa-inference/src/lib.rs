//! DocVQA Inference Library
//!
//! Client for the hosted VQA model. The API layer depends only on the
//! `VqaModel` trait so tests can substitute an in-process stub; the real
//! implementation talks to the HuggingFace Inference API.

pub mod huggingface;
pub mod traits;

pub use huggingface::HuggingFaceVqa;
pub use traits::{InferenceError, InferenceResult, VqaAnswer, VqaModel};
