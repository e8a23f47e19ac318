//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use interviewer_core::summary::{ScoreColor, SummaryView};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report for a session summary.
pub fn generate_html(view: &SummaryView) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Interview results: {}</title>\n",
        html_escape(&view.position)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str(&color_rules());
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Interview Complete</h1>\n");
    let candidate = view
        .candidate_name
        .as_deref()
        .map(|n| format!("{} | ", html_escape(n)))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">{}Position: <strong>{}</strong> | Difficulty: {} | Session #{}</p>\n",
        candidate,
        html_escape(&view.position),
        view.difficulty,
        view.session_id
    ));
    html.push_str("</header>\n");

    // Overall score
    html.push_str("<section class=\"overall\">\n");
    html.push_str(&format!(
        "<div class=\"score-circle {}\">{:.1}<span>/10</span></div>\n",
        view.color.css_class(),
        view.score
    ));
    html.push_str(&format!(
        "<p class=\"performance\">{}</p>\n",
        view.performance
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} questions answered</p>\n",
        view.answered(),
        view.rows.len()
    ));
    html.push_str("</section>\n");

    if !view.warnings.is_empty() {
        html.push_str("<section class=\"warnings\">\n<ul>\n");
        for w in &view.warnings {
            html.push_str(&format!("<li>{}</li>\n", html_escape(w)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Per-question breakdown
    html.push_str("<section class=\"breakdown\">\n");
    html.push_str("<h2>Question Breakdown</h2>\n");
    for row in &view.rows {
        html.push_str("<article class=\"question\">\n");
        let score = match (row.score, row.score_color) {
            (Some(s), Some(c)) => format!(
                "<span class=\"badge {}\">{:.1}/10</span>",
                c.css_class(),
                s
            ),
            _ => "<span class=\"badge missing\">no score</span>".to_string(),
        };
        html.push_str(&format!(
            "<h3>Question {} <span class=\"type\">{}</span> {}</h3>\n",
            row.ordinal,
            html_escape(&row.question_type),
            score
        ));
        html.push_str(&format!(
            "<p class=\"question-text\">{}</p>\n",
            html_escape(&row.question_text)
        ));
        if row.missing_response {
            html.push_str("<p class=\"missing\">No response recorded.</p>\n");
        } else {
            html.push_str(&format!(
                "<h4>Your Answer</h4>\n<pre>{}</pre>\n",
                html_escape(&row.answer)
            ));
            html.push_str(&format!(
                "<h4>Feedback</h4>\n<p>{}</p>\n",
                html_escape(&row.feedback)
            ));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    html.push_str(&format!(
        "<footer class=\"meta\">Generated {}</footer>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(view: &SummaryView, path: &Path) -> Result<()> {
    let html = generate_html(view);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn color_rules() -> String {
    [ScoreColor::High, ScoreColor::Medium, ScoreColor::Low]
        .iter()
        .map(|c| {
            format!(
                ".{} {{ color: {}; border-color: {}; }}\n",
                c.css_class(),
                c.hex(),
                c.hex()
            )
        })
        .collect()
}

const CSS: &str = r#"
:root { --bg: #0d0d0d; --fg: #e5e5e5; --border: #333; --muted: #888; }
body { font-family: 'JetBrains Mono', 'Fira Code', monospace; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
.overall { text-align: center; margin: 2rem 0; }
.score-circle { display: inline-block; font-size: 3rem; border: 4px solid; border-radius: 50%; padding: 2rem; }
.score-circle span { font-size: 1rem; color: var(--muted); }
.performance { font-size: 1.5rem; font-weight: bold; }
.warnings { border: 1px solid #ff4444; padding: 0.5rem 1rem; border-radius: 8px; }
.question { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.type { font-size: 0.8rem; color: var(--muted); text-transform: uppercase; }
.badge { float: right; border: 1px solid; border-radius: 4px; padding: 0 0.5rem; }
.missing { color: var(--muted); font-style: italic; }
pre { white-space: pre-wrap; padding: 1rem; background: #1a1a1a; border-radius: 8px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use interviewer_core::model::{
        Difficulty, InterviewRecord, Question, QuestionId, Response, ResponseId, SessionId,
        SessionSnapshot, SessionStatus,
    };
    use interviewer_core::summary::project;

    fn make_view(answer: &str) -> SummaryView {
        let snapshot = SessionSnapshot {
            interview: InterviewRecord {
                id: SessionId::new(42),
                candidate_name: Some("Ada".into()),
                candidate_email: Some("ada@example.com".into()),
                position: "Backend Engineer".into(),
                difficulty: Difficulty::Medium,
                status: SessionStatus::Completed,
                score: Some(8.5),
                started_at: None,
                completed_at: None,
            },
            questions: vec![
                Question {
                    id: QuestionId::new(1),
                    question_type: "technical".into(),
                    question_text: "Explain ownership.".into(),
                },
                Question {
                    id: QuestionId::new(2),
                    question_type: "behavioral".into(),
                    question_text: "Tell me about a deadline.".into(),
                },
            ],
            responses: vec![Response {
                id: ResponseId::new(1),
                question_id: QuestionId::new(1),
                response_text: answer.into(),
                score: Some(8.5),
                feedback: "Clear.".into(),
                created_at: None,
            }],
        };
        project(&snapshot)
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_view("Each value has one owner."));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Backend Engineer"));
        assert!(html.contains("Excellent"));
        assert!(html.contains("8.5"));
        assert!(html.contains("#00ff41"));
        assert!(html.contains("No response recorded."));
        assert!(html.contains("question 2 has no response"));
    }

    #[test]
    fn answers_are_escaped() {
        let html = generate_html(&make_view("<script>alert('x')</script>"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }

    #[test]
    fn html_report_write_to_file() {
        let view = make_view("answer");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&view, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
