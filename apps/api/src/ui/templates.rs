//! Server-rendered HTML for the upload form and the results page.

use crate::analysis::form::{JOB_DESCRIPTION_FIELD, RESUME_FIELD};
use crate::analysis::models::AnalysisResult;

const STYLES: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
h1 { margin-bottom: 0.25rem; }
form { display: grid; gap: 1rem; margin: 1.5rem 0; }
textarea { width: 100%; min-height: 200px; font: inherit; padding: 0.5rem; box-sizing: border-box; }
button { justify-self: start; padding: 0.6rem 1.4rem; background: #ff4b4b; color: #fff; border: 0; border-radius: 6px; font-size: 1rem; cursor: pointer; }
.error { background: #fde8e8; color: #9b1c1c; padding: 0.75rem 1rem; border-radius: 6px; }
.section { margin: 1.5rem 0; }
.section-body { white-space: pre-wrap; line-height: 1.5; }
.match { font-size: 1.1rem; font-weight: 600; }
details { margin-top: 2rem; }
"#;

const HOW_TO_USE: &str = r#"<details>
<summary>ℹ️ How to use this tool</summary>
<ol>
<li>Upload your resume in PDF or DOCX format</li>
<li>Paste the job description you want to analyze against</li>
<li>Click 'Analyze Resume' to get detailed feedback</li>
<li>Review the overall assessment, strengths, weaknesses, and suggestions for improvement</li>
</ol>
<p>The analysis will help you:</p>
<ul>
<li>Get an overall assessment of your fit for the position</li>
<li>Identify your key strengths for the position</li>
<li>Find areas where your resume could be improved</li>
<li>Get specific suggestions to increase your chances of selection</li>
</ul>
</details>"#;

/// The upload form, optionally with an error banner and the previously
/// entered job description.
pub fn render_form_page(error: Option<&str>, job_description: &str) -> String {
    let error_banner = error
        .map(|msg| format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(msg)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Resume Analyzer 📄</h1>
<p>Upload your resume and job description to get personalized analysis and improvement suggestions.</p>
{error_banner}
<form method="post" action="/analyze" enctype="multipart/form-data">
<label>Upload your resume (PDF or DOCX)<br>
<input type="file" name="{RESUME_FIELD}" accept=".pdf,.docx" required></label>
<label>Paste the job description here<br>
<textarea name="{JOB_DESCRIPTION_FIELD}" placeholder="Enter the job description to analyze your resume against..." required>{job}</textarea></label>
<button type="submit">Analyze Resume</button>
</form>
{HOW_TO_USE}"#,
        job = escape_html(job_description),
    );

    layout("Resume Analyzer", &body)
}

/// The four analysis sections, plus the match score when the model gave one.
pub fn render_results_page(result: &AnalysisResult) -> String {
    let match_line = result
        .match_percentage()
        .map(|pct| format!(r#"<p class="match">🎯 Match Percentage: {}</p>"#, escape_html(&pct)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Resume Analyzer 📄</h1>
<h2>Analysis Results</h2>
{match_line}
{assessment}
{strengths}
{weaknesses}
{suggestions}
<p><a href="/">Analyze another resume</a></p>"#,
        assessment = section("📊 Overall Assessment", &result.assessment),
        strengths = section("💪 Strengths", &result.strengths),
        weaknesses = section("⚠️ Areas for Improvement", &result.weaknesses),
        suggestions = section("💡 Suggestions for Improvement", &result.suggestions),
    );

    layout("Analysis Results | Resume Analyzer", &body)
}

fn section(title: &str, content: &str) -> String {
    format!(
        r#"<div class="section"><h3>{title}</h3><div class="section-body">{}</div></div>"#,
        escape_html(content.trim())
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLES}</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_form_page_has_upload_fields() {
        let html = render_form_page(None, "");
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"name="resume""#));
        assert!(html.contains(r#"name="job_description""#));
        assert!(html.contains("How to use this tool"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_form_page_shows_escaped_error_and_keeps_input() {
        let html = render_form_page(Some("Please upload a resume file."), "Rust <senior>");
        assert!(html.contains("Please upload a resume file."));
        assert!(html.contains("Rust &lt;senior&gt;</textarea>"));
    }

    #[test]
    fn test_results_page_renders_all_sections() {
        let result = AnalysisResult::new(
            "- Strong Rust",
            "- No Kubernetes",
            "- Add metrics",
            "Good fit overall.",
        );
        let html = render_results_page(&result);
        for heading in [
            "Overall Assessment",
            "Strengths",
            "Areas for Improvement",
            "Suggestions for Improvement",
        ] {
            assert!(html.contains(heading), "missing {heading}");
        }
        assert!(html.contains("- Strong Rust"));
        assert!(html.contains("Good fit overall."));
        assert!(!html.contains("Match Percentage"));
    }

    #[test]
    fn test_results_page_shows_match_percentage_when_present() {
        let mut result = AnalysisResult::new("A", "B", "C", "D");
        result.extra.insert("Match Percentage".into(), json!(85));
        let html = render_results_page(&result);
        assert!(html.contains("Match Percentage: 85"));
    }

    #[test]
    fn test_results_page_escapes_model_output() {
        let result = AnalysisResult::new("<b>bold</b>", "B", "C", "D");
        let html = render_results_page(&result);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
