/// Backend used for chat completions.
///
/// Only the hosted OpenAI API is wired today. New providers extend this enum
/// and get their own service under `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI-compatible `/v1/chat/completions` API.
    OpenAI,
}
