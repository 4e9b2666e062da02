//! Fixed prompt text and fallback replies.

pub const SYSTEM_PROMPT: &str = "You are a supportive but assertive accountability coach. \
A user is on a focus and discipline challenge. Respond to their message in 2-3 concise \
sentences. Give them a short, actionable tip. Do not be overly friendly.";

/// Used when the service answers without any reply text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm processing that. Stay strong.";

/// Used when the service cannot be reached at all.
pub const UNREACHABLE_FALLBACK: &str =
  "I can't connect to the AI. Is the Ollama server running?";

/// Used for every other failure.
pub const ERROR_FALLBACK: &str =
  "I had an error processing that. Let's just refocus. What's your next small step?";

/// The user turn sent to the model.
pub fn user_message(streak: i64, user_input: &str) -> String {
  format!("I'm on a {streak}-day streak. {user_input}")
}
