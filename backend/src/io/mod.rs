//! # IO Module
//!
//! Adapter layer between the outside world and the domain services:
//!
//! - **rest**: axum handlers exposing every store operation and the view router
//! - **guide_client**: the Gemini-backed [`GuideGenerator`](crate::domain::GuideGenerator)

pub mod guide_client;
pub mod rest;

pub use guide_client::GeminiGuideClient;
pub use rest::*;
