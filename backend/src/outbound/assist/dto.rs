//! DTOs for decoding hosted-model chat completion responses.
//!
//! The adapter decodes the completion envelope first, then parses the
//! message content as the suggestion schema in a second pass.

use serde::{Deserialize, Serialize};

/// One chat message in the completion request.
#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: Vec<ChatMessageDto<'a>>,
    pub(super) response_format: ResponseFormatDto,
}

/// Forces the model to emit a single JSON object.
#[derive(Debug, Serialize)]
pub(super) struct ResponseFormatDto {
    #[serde(rename = "type")]
    pub(super) format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    choices: Vec<ChatChoiceDto>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceDto {
    message: ChatChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessageDto {
    content: String,
}

impl ChatCompletionResponseDto {
    /// Content of the first choice, or a description of what was missing.
    pub(super) fn into_content(self) -> Result<String, String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "completion contained no choices".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let decoded: ChatCompletionResponseDto = serde_json::from_str(
            r#"{ "choices": [{ "message": { "role": "assistant", "content": "{}" } }] }"#,
        )
        .expect("valid envelope");
        assert_eq!(decoded.into_content().expect("content"), "{}");
    }

    #[test]
    fn empty_choice_list_is_reported() {
        let decoded: ChatCompletionResponseDto =
            serde_json::from_str(r#"{ "choices": [] }"#).expect("valid envelope");
        assert!(decoded.into_content().is_err());
    }
}
