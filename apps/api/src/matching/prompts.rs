// Oracle prompt constants for match scoring.

use serde_json::json;

use crate::llm_client::OutputSchema;

/// Tool the model fills in with its scores.
pub const MATCH_TOOL: &str = "record_matches";

/// System prompt for match scoring.
pub const MATCH_SYSTEM: &str = "You are an expert scholarship counselor who helps \
    students find the best funding opportunities. \
    Provide accurate, helpful match scores and detailed reasoning. \
    Always answer by calling the record_matches tool.";

/// Match scoring prompt. Replace `{profile_block}` and `{catalog_block}`.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the following student profile and provide match scores (0-100) for each scholarship opportunity.
Consider factors like academic requirements, field of study alignment, financial need, extracurricular activities, and eligibility criteria.

Student Profile:
{profile_block}

Scholarships to evaluate:
{catalog_block}

Record your scores with the record_matches tool.

Rules:
1. Return exactly one entry per scholarship listed above
2. `matchScore` is an integer from 0 to 100
3. `scholarshipId` must be copied verbatim from the ID line of the scholarship
4. `reasoning` is one or two sentences addressed to the student"#;

/// `{"matches":[{"scholarshipId","matchScore","reasoning"}]}`
pub fn match_output_schema() -> OutputSchema {
    OutputSchema {
        tool_name: MATCH_TOOL,
        description: "Record a match score and reasoning for every scholarship in the catalog.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "matches": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "scholarshipId": { "type": "string" },
                            "matchScore": { "type": "integer", "minimum": 0, "maximum": 100 },
                            "reasoning": { "type": "string" }
                        },
                        "required": ["scholarshipId", "matchScore", "reasoning"]
                    }
                }
            },
            "required": ["matches"]
        }),
    }
}

/// Sentinel for an empty eligibility list.
pub const ANY: &str = "Any";

/// Sentinel for a scholarship without a minimum GPA.
pub const NOT_SPECIFIED: &str = "Not specified";
