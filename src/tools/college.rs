//! College administrative processes and academic deadlines.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{optional_str, required_str, select_first, title_case, truncate_snippet, Tool};
use crate::search::{SearchQuery, WebSearch};

const MAX_EXCERPTS: usize = 3;
const EXCERPT_LIMIT: usize = 300;

const GENERAL_TIPS: &[&str] = &[
    "Read your college handbook/website thoroughly",
    "Contact your academic advisor for personalized guidance",
    "Mark important deadlines in your calendar",
    "Keep copies of all important documents",
    "Don't hesitate to ask for help from college staff",
];

/// Explain a college process from search excerpts.
pub struct ExplainCollegeProcess {
    search: Arc<dyn WebSearch>,
}

impl ExplainCollegeProcess {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for ExplainCollegeProcess {
    fn name(&self) -> &str {
        "explain_college_process"
    }

    fn description(&self) -> &str {
        "Explain college administrative processes and systems (registration, grades, financial aid, etc.) step by step."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "process": {
                    "type": "string",
                    "description": "Process to explain (registration, grades, financial aid, etc.)"
                },
                "context": {
                    "type": "string",
                    "description": "Educational context (default: India)"
                }
            },
            "required": ["process"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let process = required_str(&args, "process")?;
        let context = optional_str(&args, "context", "India");

        let query = SearchQuery::advanced(
            format!(
                "college {} process guide for students {} step by step how to",
                process, context
            ),
            MAX_EXCERPTS,
        );
        let results = match self.search.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, process, "College process search failed");
                return Ok(format!(
                    "For information about {}, please check your college's official website or contact the administrative office. They can provide specific guidance for your situation.",
                    process
                ));
            }
        };

        let mut out = format!("📋 Understanding: {}\n\n", title_case(process));
        for result in results
            .iter()
            .take(MAX_EXCERPTS)
            .filter(|r| !r.content.is_empty())
        {
            out.push_str(&format!(
                "{}\n\nSource: {}\n\n",
                truncate_snippet(&result.content, EXCERPT_LIMIT),
                result.url
            ));
        }

        out.push_str("💡 General Tips:\n");
        for tip in GENERAL_TIPS {
            out.push_str(&format!("✓ {}\n", tip));
        }
        Ok(out)
    }
}

static REGISTRATION: [&str; 4] = [
    "Course Registration: Usually 2-4 weeks before semester starts",
    "Add/Drop Period: First 1-2 weeks of semester",
    "Late Registration Fee Deadline: Check your college calendar",
    "Major Declaration: Typically end of sophomore year",
];

static FINANCIAL_AID: [&str; 4] = [
    "Scholarship Applications: Varies by scholarship (often fall semester)",
    "FAFSA/Government Aid: Check national/state deadlines",
    "Tuition Payment: Before semester starts",
    "Work-Study Applications: Early in semester",
];

static CAREER: [&str; 4] = [
    "Career Fair Registration: 2-3 weeks before event",
    "Summer Internship Applications: October - February",
    "Resume Review Sessions: Ongoing, check career center",
    "On-Campus Recruitment: Varies by company",
];

static APPLICATIONS: [&str; 4] = [
    "Graduate School Applications: September - December",
    "Study Abroad Programs: 6-12 months in advance",
    "Research Opportunities: Rolling basis",
    "Leadership Positions: Varies by organization",
];

static DEADLINES: &[(&str, &[&str])] = &[
    ("registration", &REGISTRATION),
    ("financial_aid", &FINANCIAL_AID),
    ("career", &CAREER),
    ("applications", &APPLICATIONS),
];

const MANAGEMENT_TIPS: &[&str] = &[
    "Use a digital calendar (Google Calendar) with notifications",
    "Set multiple reminders (1 month, 1 week, 1 day before)",
    "Create a semester timeline at the start",
    "Subscribe to college newsletter/announcements",
    "Join student groups for peer reminders",
    "Check your college portal weekly",
];

/// Deadlines for an exact event key; unknown keys get the registration list.
pub fn deadlines_for(event_type: &str) -> &'static [&'static str] {
    select_first(DEADLINES, |key| key == event_type, &REGISTRATION[..])
}

/// Common academic deadlines with tracking tips.
pub struct DeadlineReminders;

impl DeadlineReminders {
    pub fn reminders(event_type: &str) -> String {
        let mut out = format!(
            "📅 Important Deadlines & Reminders ({})\n\n",
            title_case(event_type)
        );
        for deadline in deadlines_for(event_type) {
            out.push_str(&format!("• {}\n", deadline));
        }
        out.push_str("\n\n🔔 Deadline Management Tips:\n");
        for (i, tip) in MANAGEMENT_TIPS.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, tip));
        }
        out
    }
}

#[async_trait]
impl Tool for DeadlineReminders {
    fn name(&self) -> &str {
        "get_deadline_reminders"
    }

    fn description(&self) -> &str {
        "Get common academic deadlines (registration, financial_aid, career, applications) and tips for tracking them."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "event_type": {
                    "type": "string",
                    "description": "Type of deadline: registration, financial_aid, career, applications (default: general)"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let event_type = optional_str(&args, "event_type", "general");
        Ok(Self::reminders(event_type))
    }
}
