//! Hosted-model suggestion adapter.

mod dto;
mod http_source;

pub use http_source::{AssistCredentials, AssistHttpSource, AssistHttpSourceBuildError};
