//! The objects passed between the agent engine, the model gateway and the
//! tool registry.
//!
//! Several wire formats meet here: the OpenAI-style chat completion shape
//! (used by Groq and OpenAI), the Anthropic messages shape, and Ollama's
//! native chat endpoint. Backend payloads are converted to and from these
//! internal structs at the provider boundary, so nothing above the gateway
//! ever sees a backend-specific field.
pub mod message;
pub mod tool;
