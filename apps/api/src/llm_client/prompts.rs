// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output for resume analysis.
pub const ANALYZER_JSON_SYSTEM: &str = "You are an expert resume analyzer and career coach. \
    You must respond with valid JSON only.";

/// Output rules appended to every prompt that expects a raw JSON object back.
pub const RAW_JSON_ONLY_RULES: &str = "\
    - Do NOT include any markdown, code block, XML, or HTML tags. Output only the raw JSON object, nothing else.
    - Do NOT include any explanations or extra text before or after the JSON.";
