// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::RAW_JSON_ONLY_RULES;

/// Resume analysis prompt template.
/// Replace: {job_description}, {resume_text}, {json_rules}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert resume analyzer and career coach. Analyze the following resume against the given job description.
Provide a detailed analysis in the following JSON format:
{
    "strengths": "List the candidate's key strengths that match the job requirements. Format as bullet points.",
    "weaknesses": "List areas where the resume could be improved to better match the job requirements. Format as bullet points.",
    "suggestions": "Provide specific, actionable suggestions to improve the resume and increase chances of selection. Format as bullet points.",
    "assessment": "Provide a brief overall assessment of the candidate's fit for the position (2-3 sentences).",
    "Match Percentage": "Percentage match to the job description, as a number between 0 and 100"
}

Resume:
{resume_text}

Job Description:
{job_description}

Focus on:
1. Skills and qualifications match
2. Experience relevance
3. Achievements and impact
4. Overall presentation and formatting
5. Specific improvements that would make the candidate more competitive
6. Match percentage

Important:
- Your response must be a valid JSON object with exactly these keys: strengths, weaknesses, suggestions, and assessment. "Match Percentage" is optional.
{json_rules}
- If you cannot analyze, return a JSON object with empty strings for all fields."#;

/// Builds the user message for one analysis. Both inputs are embedded verbatim.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{json_rules}", RAW_JSON_ONLY_RULES),
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    )
}

/// Substitutes placeholders in a single left-to-right pass over the template.
/// Inserted values are never scanned again, so placeholder-looking text in
/// either input comes through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|&(placeholder, value)| {
                rest.find(placeholder).map(|at| (at, placeholder, value))
            })
            .min_by_key(|&(at, _, _)| at);

        match next {
            Some((at, placeholder, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + placeholder.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::REQUIRED_KEYS;

    const RESUME: &str = "John Doe\nSoftware Engineer\nSkills:\n- Python, JavaScript, React\n- AWS, Docker";
    const JOB: &str = "Senior Software Engineer\nRequirements:\n- 5+ years of experience\n- Experience with containerization";

    #[test]
    fn test_prompt_embeds_both_inputs_verbatim() {
        let prompt = build_analysis_prompt(RESUME, JOB);
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JOB));
        assert!(prompt.find(RESUME).unwrap() < prompt.find(JOB).unwrap());
    }

    #[test]
    fn test_prompt_names_all_output_fields() {
        let prompt = build_analysis_prompt(RESUME, JOB);
        for key in REQUIRED_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(prompt.contains("\"Match Percentage\""));
    }

    #[test]
    fn test_prompt_demands_raw_json_and_empty_fallback() {
        let prompt = build_analysis_prompt(RESUME, JOB);
        assert!(prompt.contains("Do NOT include any markdown, code block, XML, or HTML tags"));
        assert!(prompt.contains("Do NOT include any explanations or extra text"));
        assert!(prompt.contains("empty strings for all fields"));
        assert!(!prompt.contains("{json_rules}"));
    }

    #[test]
    fn test_placeholder_text_in_resume_is_left_alone() {
        let resume = "Built templating engine supporting {job_description} tokens";
        let prompt = build_analysis_prompt(resume, "Rust developer");
        assert!(prompt.contains(resume));
    }

    #[test]
    fn test_placeholder_text_in_job_description_is_left_alone() {
        let job = "We template offers as {resume_text} placeholders";
        let prompt = build_analysis_prompt("RESUME BODY", job);
        assert!(prompt.contains(job));
        assert_eq!(prompt.matches("RESUME BODY").count(), 1);
    }

    #[test]
    fn test_placeholders_in_both_inputs_survive() {
        let resume = "Maintains {json_rules} and {job_description} macros";
        let job = "Must know {resume_text}";
        let prompt = build_analysis_prompt(resume, job);
        assert!(prompt.contains(&format!("Resume:\n{resume}\n")));
        assert!(prompt.contains(&format!("Job Description:\n{job}\n")));
    }

    #[test]
    fn test_fill_template_replaces_each_occurrence() {
        let filled = fill_template("{a}-{b}-{a}", &[("{a}", "x{b}"), ("{b}", "y")]);
        assert_eq!(filled, "x{b}-y-x{b}");
    }

    #[test]
    fn test_empty_inputs_still_produce_prompt() {
        let prompt = build_analysis_prompt("", "");
        assert!(prompt.contains("Resume:\n\n\nJob Description:\n"));
    }
}
