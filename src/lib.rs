//! docqa - a client for a document question-answering and demand-letter service
//!
//! Answers are streamed as Server-Sent Events; [`sse`] turns the raw byte
//! stream into frames and [`chat`] applies them to a transcript.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod traits;
