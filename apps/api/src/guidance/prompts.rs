// Oracle prompt constants for application guidance.

use serde_json::json;

use crate::llm_client::OutputSchema;

pub const GUIDANCE_TOOL: &str = "record_guidance";

pub const GUIDANCE_SYSTEM: &str = "You are a professional scholarship advisor who provides \
    detailed, actionable guidance to help students succeed in their applications. \
    Always answer by calling the record_guidance tool.";

/// Replace `{profile_block}` and `{scholarship_block}`.
pub const GUIDANCE_PROMPT_TEMPLATE: &str = r#"Generate personalized application guidance for this student and scholarship opportunity.

Student Profile:
{profile_block}

Scholarship Details:
{scholarship_block}

Record the guidance with the record_guidance tool:
- essayTips: detailed essay writing tips specific to this scholarship
- checklist: the specific steps and documents this application needs, one per item
- improvementSuggestions: how the student can strengthen their profile for this opportunity"#;

pub fn guidance_output_schema() -> OutputSchema {
    OutputSchema {
        tool_name: GUIDANCE_TOOL,
        description: "Record application guidance for one student and one scholarship.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "essayTips": { "type": "string" },
                "checklist": { "type": "array", "items": { "type": "string" } },
                "improvementSuggestions": { "type": "string" }
            },
            "required": ["essayTips", "checklist", "improvementSuggestions"]
        }),
    }
}

pub const GENERIC_ESSAY_TIPS: &str =
    "Focus on your unique experiences and how they align with the scholarship's mission.";

pub const GENERIC_CHECKLIST: [&str; 3] = [
    "Complete application form",
    "Submit transcripts",
    "Write personal statement",
];

pub const GENERIC_IMPROVEMENT_SUGGESTIONS: &str =
    "Continue developing your skills and gaining relevant experience.";
