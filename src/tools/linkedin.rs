//! LinkedIn profile section guidance.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{optional_str, required_str, select_first, Tool};

const FIELD_SLOT: &str = "{field}";

const HEADLINE: &str = "🎯 LinkedIn Headline Optimization for {field}:

Your headline should be more than just your title. Use this formula:
[Your Role/Status] | [Key Skills] | [What You're Passionate About]

Examples:
• Computer Science Student | Python & Machine Learning | Aspiring Data Scientist
• Business Major | Marketing & Analytics | Passionate About Digital Strategy
• Engineering Student | IoT & Robotics Enthusiast | Building Smart Solutions

Tips:
✓ Include relevant keywords for your field
✓ Show what makes you unique
✓ Keep it under 120 characters
✓ Update it as you grow
";

const SUMMARY: &str = "📝 LinkedIn Summary Guide for {field}:

Your summary should tell your story in 3-5 paragraphs:

Paragraph 1: Who you are and your current focus
\"I'm a [year] year [major] student at [college], passionate about [field]...\"

Paragraph 2: Your key experiences and skills
\"Through my coursework and projects, I've developed expertise in...\"

Paragraph 3: What you're looking for
\"I'm currently seeking [internships/opportunities] in [specific area]...\"

Paragraph 4: Your values/interests
\"I'm particularly interested in [specific topic] and enjoy [relevant activities]...\"

Closing: Call to action
\"Feel free to connect if you'd like to discuss [topic] or explore collaboration opportunities!\"

Tips:
✓ Write in first person
✓ Use short paragraphs
✓ Include keywords naturally
✓ Show personality
✓ Update regularly
";

const EXPERIENCE: &str = "💼 Experience Section Tips for {field}:

For each position/project, use this structure:

Title: [Be specific and professional]
Example: \"Software Development Intern\" not just \"Intern\"

Description: Use the STAR method
• Situation: Brief context
• Task: What you needed to do
• Action: What you actually did (use action verbs)
• Result: Quantifiable outcomes

Action Verbs for {field}:
Developed, Created, Implemented, Analyzed, Designed, Managed, Led, Optimized, Improved, Collaborated

Example:
\"Developed a web application using React and Node.js that improved user engagement by 40%. Collaborated with a team of 4 to implement features and conducted code reviews.\"

Tips:
✓ Quantify achievements with numbers
✓ Start each point with an action verb
✓ Include relevant technologies/tools
✓ List most recent first
";

const SKILLS: &str = "🛠️ Skills Section Optimization for {field}:

Organize skills by category:

Technical Skills:
• List programming languages, tools, frameworks
• Get endorsed by classmates and colleagues

Soft Skills:
• Communication, Leadership, Problem-solving, Teamwork

Domain Skills:
• Field-specific competencies

Priority Order:
1. Most relevant skills for your target role (top 3)
2. Skills you're currently developing
3. Foundational skills

Tips:
✓ Add 10-50 skills (sweet spot: 25-30)
✓ Take skill assessments
✓ Reorder based on job applications
✓ Request endorsements from peers
✓ Include both technical and soft skills
";

const SECTION_GUIDES: &[(&str, &str)] = &[
    ("headline", HEADLINE),
    ("summary", SUMMARY),
    ("experience", EXPERIENCE),
    ("skills", SKILLS),
];

const GENERIC_TIP: &str = "LinkedIn profile tip: Focus on making your profile complete, professional, and keyword-rich for {field}. Update all sections regularly!";

pub struct OptimizeLinkedinProfile;

impl OptimizeLinkedinProfile {
    /// Guidance for the first section key contained in `section`, or a generic tip.
    pub fn guidance(section: &str, field: &str) -> String {
        let section = section.to_lowercase();
        select_first(SECTION_GUIDES, |key| section.contains(key), GENERIC_TIP)
            .replace(FIELD_SLOT, field)
    }
}

#[async_trait]
impl Tool for OptimizeLinkedinProfile {
    fn name(&self) -> &str {
        "optimize_linkedin_profile"
    }

    fn description(&self) -> &str {
        "Get tips and examples to optimize a LinkedIn profile section (headline, summary, experience, skills)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "section": {
                    "type": "string",
                    "description": "Profile section: headline, summary, experience, skills"
                },
                "field": {
                    "type": "string",
                    "description": "Your field of study or interest (default: general)"
                }
            },
            "required": ["section"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let section = required_str(&args, "section")?;
        let field = optional_str(&args, "field", "general");
        Ok(Self::guidance(section, field))
    }
}
