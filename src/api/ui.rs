//! HTML for the chat page.
//!
//! Pages are assembled from string fragments; every piece of user or model
//! text goes through [`escape_html`] before it lands in the markup.

use std::time::Duration;

use chrono::Local;
use uuid::Uuid;

use super::hub::{DisplayMessage, WebSession};
use crate::config::ConfigError;
use crate::mentor::TurnRole;

/// Quick-action buttons: label and the question they prefill.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    (
        "📚 Learn Python",
        "I want to learn Python programming from scratch. Can you give me a complete roadmap?",
    ),
    (
        "💼 Find Internships",
        "Help me find internships in software engineering",
    ),
    (
        "✉️ Draft Email",
        "Help me draft an email to a professor for research opportunity",
    ),
    (
        "📅 Track Deadlines",
        "What are the important academic deadlines I should track?",
    ),
];

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "📚",
        "Learning Roadmaps",
        "Get complete learning paths for any skill with curated resources and timelines",
    ),
    (
        "💼",
        "Career Opportunities",
        "Discover internships, scholarships, and networking events tailored for you",
    ),
    (
        "✉️",
        "Communication Coach",
        "Draft professional emails, optimize LinkedIn, and ace interviews",
    ),
    (
        "📅",
        "College Navigation",
        "Understand processes, track deadlines, and manage your academic journey",
    ),
];

const READY_BADGE: &str = "<span class='status-badge status-ready'>✓ AI Mentor Ready</span>";
const LOADING_BADGE: &str = "<span class='status-badge status-loading'>⟳ Initializing...</span>";

const STYLE: &str = r#"<style>
body { font-family: system-ui, sans-serif; background: #f7fafc; margin: 0; }
.app-container { max-width: 1200px; margin: 10px auto; padding: 0 16px; }
.header { display:flex; justify-content:space-between; align-items:center; margin-bottom:15px; }
.title { font-size:28px; font-weight:700; color:#5a67d8; }
.subtitle { color:#7b8794; font-size:14px; margin-top:5px; }
.session-id { color:#718096; font-size:11px; text-align:right; }
#chatbox { border-radius:16px; padding:24px; background:#fff; box-shadow:0 10px 40px rgba(2,6,23,0.08); max-height:65vh; overflow-y:auto; margin-bottom:20px; }
.row { display:flex; }
.row-user { justify-content:flex-end; }
.row-assistant { justify-content:flex-start; }
.msg-user, .msg-assistant { margin-bottom:16px; padding:14px 18px; border-radius:18px; max-width:75%; line-height:1.5; }
.msg-user { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color:#fff; }
.msg-assistant { background:#edf2f7; color:#1a202c; }
.meta { font-size:11px; opacity:0.7; margin-top:6px; }
.welcome { text-align:center; padding:60px 20px; color:#718096; }
.feature-grid { display:grid; grid-template-columns:repeat(auto-fit, minmax(220px, 1fr)); gap:16px; margin:20px 0; }
.feature-card { background:#fff; border-radius:12px; padding:20px; box-shadow:0 4px 12px rgba(0,0,0,0.06); }
.feature-icon { font-size:32px; }
.feature-title { font-weight:700; margin:8px 0 4px; }
.feature-desc { font-size:13px; color:#4a5568; }
.quick-actions { display:flex; gap:10px; flex-wrap:wrap; margin-bottom:16px; }
.quick-actions a { padding:8px 14px; border-radius:10px; background:#fff; border:1px solid #e2e8f0; text-decoration:none; color:#2d3748; }
.status-badge { padding:4px 12px; border-radius:12px; font-size:12px; font-weight:600; }
.status-ready { background: linear-gradient(135deg, #84fab0 0%, #8fd3f4 100%); color:#047857; }
.status-loading { background: linear-gradient(135deg, #ffeaa7 0%, #fdcb6e 100%); color:#92400e; }
.error-panel { border:2px solid #e53e3e; border-radius:12px; padding:20px; background:#fff5f5; color:#9b2c2c; }
textarea { width:100%; min-height:100px; border-radius:12px; padding:12px; box-sizing:border-box; }
.actions { display:flex; gap:10px; margin-top:10px; }
.elapsed { text-align:right; color:#a0aec0; font-size:12px; }
footer { text-align:center; margin-top:30px; padding:20px; color:#a0aec0; font-size:12px; }
</style>"#;

const TEXTAREA_PLACEHOLDER: &str = "Examples:\n• 'I want to learn Data Science from scratch'\n• 'Help me find internships in marketing'\n• 'Draft an email to request a recommendation letter'\n• 'Explain the course registration process'\n• 'How can I optimize my LinkedIn profile?'";

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Question for a quick-action index, if it exists.
pub fn quick_action_text(index: usize) -> Option<&'static str> {
    QUICK_ACTIONS.get(index).map(|(_, text)| *text)
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>🎓 AI Mentor - First-Gen Students</title>\n{STYLE}\n</head>\n<body>\n<div class=\"app-container\">\n{body}\n<footer>\n<div>🔐 Keep API keys secure in .env file</div>\n<div>Made with ❤️ for first-generation students • Your success is our mission</div>\n</footer>\n</div>\n</body>\n</html>\n"
    )
}

fn header(session_id: Option<Uuid>) -> String {
    let session = session_id
        .map(|id| {
            let id = id.to_string();
            format!("<div class=\"session-id\">Session: {}</div>", &id[..8])
        })
        .unwrap_or_default();
    format!(
        "<div class=\"header\">\n<div>\n<div class=\"title\">🎓 AI Mentor for First-Generation Students</div>\n<div class=\"subtitle\">Your personal guide for college success • Internships • Networking • Learning Roadmaps</div>\n</div>\n{session}\n</div>\n<hr>"
    )
}

fn bubble(message: &DisplayMessage) -> String {
    let (row, class, label) = match message.role {
        TurnRole::Human => ("row-user", "msg-user", "You"),
        TurnRole::Assistant => ("row-assistant", "msg-assistant", "AI Mentor"),
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    format!(
        "<div class=\"row {row}\"><div class=\"{class}\">{}<div class=\"meta\">{label} • {time}</div></div></div>",
        escape_html(&message.text).replace('\n', "<br>")
    )
}

fn chatbox(transcript: &[DisplayMessage]) -> String {
    if transcript.is_empty() {
        return "<div id=\"chatbox\"><div class=\"welcome\">\n<div style=\"font-size:48px\">🎓</div>\n<div style=\"font-size:18px; font-weight:600\">Welcome to Your AI Mentor!</div>\n<div>I'm here to guide you through college, career planning, and learning new skills.</div>\n<div style=\"font-size:13px; margin-top:15px\">Ask me anything - from finding internships to learning a new programming language!</div>\n</div></div>".to_string();
    }
    let bubbles: Vec<String> = transcript.iter().map(bubble).collect();
    format!("<div id=\"chatbox\">\n{}\n</div>", bubbles.join("\n"))
}

fn feature_grid() -> String {
    let cards: Vec<String> = FEATURES
        .iter()
        .map(|(icon, title, desc)| {
            format!(
                "<div class=\"feature-card\"><div class=\"feature-icon\">{icon}</div><div class=\"feature-title\">{title}</div><div class=\"feature-desc\">{desc}</div></div>"
            )
        })
        .collect();
    format!("<div class=\"feature-grid\">\n{}\n</div>", cards.join("\n"))
}

fn quick_actions(session_id: Uuid) -> String {
    let links: Vec<String> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, (label, _))| format!("<a href=\"/chat/{session_id}?prefill={i}\">{label}</a>"))
        .collect();
    format!(
        "<div style=\"font-weight:600; color:#4a5568; margin-bottom:10px\">Quick Actions:</div>\n<div class=\"quick-actions\">{}</div>",
        links.join("")
    )
}

fn error_details(error: &str, dev_mode: bool) -> String {
    if dev_mode {
        format!(
            "<details><summary>🔍 Error Details</summary><pre>{}</pre></details>",
            escape_html(error)
        )
    } else {
        String::new()
    }
}

fn elapsed(duration: Duration) -> String {
    format!(
        "<div class=\"elapsed\">⚡ Response time: {:.2}s</div>",
        duration.as_secs_f64()
    )
}

/// The chat page for one session.
pub fn chat_page(web: &WebSession, prefill: Option<&str>, dev_mode: bool) -> String {
    let id = web.session.id();
    let mut body = header(Some(id));

    body.push('\n');
    body.push_str(if web.session.is_ready() {
        READY_BADGE
    } else {
        LOADING_BADGE
    });
    body.push('\n');

    if let Some(error) = &web.last_error {
        body.push_str("<div class=\"error-panel\">❌ Mentor initialization failed. Check your API keys in .env file.</div>\n");
        body.push_str(&error_details(error, dev_mode));
    }

    if web.transcript.is_empty() {
        body.push_str(&feature_grid());
        body.push('\n');
    }
    body.push_str(&quick_actions(id));
    body.push('\n');
    body.push_str(&chatbox(&web.transcript));
    body.push('\n');

    if let Some(duration) = web.last_response_time {
        body.push_str(&elapsed(duration));
        body.push('\n');
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/chat/{id}/send\">\n<label for=\"message\">Ask your AI Mentor:</label>\n<textarea id=\"message\" name=\"message\" placeholder=\"{}\">{}</textarea>\n<div class=\"actions\">\n<button type=\"submit\">🚀 Ask Mentor</button>\n<button type=\"submit\" formaction=\"/chat/{id}/reset\">🗑️ Clear</button>\n</div>\n</form>\n<script>const cb = document.getElementById('chatbox'); if (cb) {{ cb.scrollTop = cb.scrollHeight; }}</script>",
        escape_html(TEXTAREA_PLACEHOLDER),
        escape_html(prefill.unwrap_or_default()),
    ));

    layout(&body)
}

/// Blocking page shown when the credentials are missing.
pub fn config_error_page(error: &ConfigError) -> String {
    let body = format!(
        "{}\n<div class=\"error-panel\">\n<h2>⚠️ AI Mentor is not configured</h2>\n<p>{}</p>\n<pre>{}</pre>\n</div>",
        header(None),
        escape_html(&error.to_string()),
        escape_html(&error.remediation()),
    );
    layout(&body)
}

/// Page for an unknown session id.
pub fn not_found_page() -> String {
    let body = format!(
        "{}\n<div class=\"error-panel\">This chat session does not exist or has expired. <a href=\"/\">Start a new conversation</a>.</div>",
        header(None)
    );
    layout(&body)
}
