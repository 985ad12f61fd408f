//! Professional email templates.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{optional_str, required_str, select_first, Tool};

const CONTEXT_SLOT: &str = "{context_section}";

pub struct EmailTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

static INTERNSHIP: EmailTemplate = EmailTemplate {
    subject: "Application for [Position Name] - [Your Name]",
    body: "Dear [Recipient Name],

I hope this email finds you well. My name is [Your Name], and I am a [Year] year student pursuing [Your Degree] at [Your College]. I am writing to express my strong interest in the [Position Name] position at [Company Name].

{context_section}

I am particularly drawn to [Company Name] because [specific reason related to company/role]. Through my coursework and projects, I have developed skills in [relevant skills], which I believe align well with the requirements of this position.

I have attached my resume for your review. I would be grateful for the opportunity to discuss how I can contribute to your team. I am available for an interview at your convenience.

Thank you for considering my application. I look forward to hearing from you.

Best regards,
[Your Name]
[Your Phone Number]
[Your Email]
[LinkedIn Profile]",
};

static PROFESSOR: EmailTemplate = EmailTemplate {
    subject: "Request for Meeting - [Your Name] from [Course Name]",
    body: "Dear Professor [Last Name],

I hope you are doing well. My name is [Your Name], and I am a student in your [Course Name] class ([Section/Time]).

{context_section}

I was wondering if you might have time for a brief meeting to discuss [specific topic]. I am available [mention your availability] and would be happy to meet at your convenience, whether in person during office hours or via video call.

Thank you very much for your time and consideration.

Respectfully,
[Your Name]
[Student ID]
[Your Email]",
};

static NETWORKING: EmailTemplate = EmailTemplate {
    subject: "Seeking Advice from [Industry] Professional - [Your Name]",
    body: "Dear [Recipient Name],

I hope this message finds you well. My name is [Your Name], and I am a [Year] year student at [Your College] studying [Your Major]. I came across your profile on [LinkedIn/other platform] and was impressed by your work in [specific area].

{context_section}

I am eager to learn more about [specific field/topic] and would greatly appreciate the opportunity to hear about your experiences and any advice you might have for someone starting their career in this field.

Would you be available for a brief 15-20 minute informational interview, either via phone or video call? I am flexible with timing and happy to work around your schedule.

Thank you for considering my request. I understand you have a busy schedule and would be grateful for any time you could spare.

Best regards,
[Your Name]
[Your Email]
[LinkedIn Profile]",
};

/// Tried in order against the lowercased purpose; internship is the default.
static TEMPLATES: &[(&str, &EmailTemplate)] = &[
    ("internship", &INTERNSHIP),
    ("professor", &PROFESSOR),
    ("networking", &NETWORKING),
];

const EMAIL_TIPS: &[&str] = &[
    "Keep it concise (under 200 words)",
    "Proofread for grammar and spelling",
    "Use a professional email address",
    "Follow up after 5-7 days if no response",
    "Be respectful of their time",
];

/// Template for a free-text purpose.
pub fn template_for(purpose: &str) -> &'static EmailTemplate {
    let purpose = purpose.to_lowercase();
    select_first(TEMPLATES, |key| purpose.contains(key), &INTERNSHIP)
}

pub struct DraftProfessionalEmail;

impl DraftProfessionalEmail {
    pub fn draft(purpose: &str, recipient: &str, context: &str) -> String {
        let template = template_for(purpose);
        let context_section = if context.trim().is_empty() {
            "\n[Mention relevant experience, skills, or why you're reaching out]\n".to_string()
        } else {
            format!("\n{}\n", context.trim())
        };

        tracing::debug!(recipient, subject = template.subject, "Drafting email");

        let mut out = String::from("📧 Professional Email Template\n\n");
        out.push_str(&format!("Subject: {}\n\n", template.subject));
        out.push_str(&template.body.replace(CONTEXT_SLOT, &context_section));
        out.push_str("\n\n💡 Email Tips:\n");
        for tip in EMAIL_TIPS {
            out.push_str(&format!("✓ {}\n", tip));
        }
        out
    }
}

#[async_trait]
impl Tool for DraftProfessionalEmail {
    fn name(&self) -> &str {
        "draft_professional_email"
    }

    fn description(&self) -> &str {
        "Draft a professional email template (internship application, professor meeting, or networking request) with etiquette tips."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "purpose": {
                    "type": "string",
                    "description": "Purpose of the email (internship inquiry, professor meeting, networking, etc.)"
                },
                "recipient": {
                    "type": "string",
                    "description": "Who you're emailing (professor, recruiter, professional, etc.)"
                },
                "context": {
                    "type": "string",
                    "description": "Additional context or specific points to include"
                }
            },
            "required": ["purpose", "recipient"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let purpose = required_str(&args, "purpose")?;
        let recipient = required_str(&args, "recipient")?;
        let context = optional_str(&args, "context", "");

        Ok(Self::draft(purpose, recipient, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn professor_in_any_case_selects_professor_template() {
        assert!(std::ptr::eq(template_for("Meeting with my PROFESSOR"), &PROFESSOR));
        assert!(std::ptr::eq(template_for("networking coffee chat"), &NETWORKING));
    }

    #[test]
    fn unknown_purpose_defaults_to_internship() {
        assert!(std::ptr::eq(template_for("recommendation letter"), &INTERNSHIP));
    }

    #[test]
    fn first_declared_key_wins_when_several_match() {
        assert!(std::ptr::eq(
            template_for("professor asked about my internship"),
            &INTERNSHIP
        ));
    }

    #[test]
    fn context_fills_slot_or_placeholder() {
        let with_context = DraftProfessionalEmail::draft(
            "professor meeting",
            "Professor Rao",
            "I enjoyed your lecture on graph theory.",
        );
        assert!(with_context.contains("Subject: Request for Meeting - [Your Name] from [Course Name]"));
        assert!(with_context.contains(
            "([Section/Time]).\n\n\nI enjoyed your lecture on graph theory.\n\n\nI was wondering"
        ));
        assert!(!with_context.contains(CONTEXT_SLOT));

        let without = DraftProfessionalEmail::draft("internship", "recruiter", "");
        assert!(without.contains(
            "[Company Name].\n\n\n[Mention relevant experience, skills, or why you're reaching out]\n\n\nI am particularly drawn"
        ));
        assert!(without.ends_with("✓ Be respectful of their time\n"));
    }

    #[tokio::test]
    async fn execute_requires_purpose_and_recipient() {
        let tool = DraftProfessionalEmail;
        assert!(tool.execute(json!({"purpose": "networking"})).await.is_err());
        assert!(tool
            .execute(json!({"purpose": "networking", "recipient": "alumni"}))
            .await
            .unwrap()
            .contains("Seeking Advice from [Industry] Professional"));
    }
}
