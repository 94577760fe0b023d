//! Quiz service client.

mod client;

pub use client::{ApiError, HttpQuizApi, QuizApi};
