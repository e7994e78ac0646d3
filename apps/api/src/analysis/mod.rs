// Resume analysis: prompt building, the model call, and reply normalization.
// All LLM calls go through llm_client — no direct Groq HTTP calls here.

pub mod form;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod service;
