//! Response schema handed to Gemini for schema-constrained output.
//!
//! Uses the Gemini OpenAPI subset: upper-case type names, no `required`.
//! Keep in sync with [`crate::review::models::CvReview`].

use serde_json::{json, Value};

pub fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overall_score": {
                "type": "NUMBER",
                "description": "Overall score from 0-100 combining every factor."
            },
            "scores": {
                "type": "OBJECT",
                "properties": {
                    "ats": {"type": "NUMBER", "description": "ATS (Applicant Tracking System) friendliness score from 0-100."},
                    "format": {"type": "NUMBER", "description": "Format and readability score from 0-100."},
                    "content": {"type": "NUMBER", "description": "Content quality and completeness score from 0-100."},
                    "impact": {"type": "NUMBER", "description": "Impact and quantified achievement score from 0-100."}
                }
            },
            "issues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING", "description": "Short title of the issue found."},
                        "description": {"type": "STRING", "description": "Detailed description of the issue."},
                        "impact": {"type": "STRING", "description": "Severity of the issue (High, Medium, Low)."}
                    }
                }
            },
            "strengths": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING", "description": "Short title of the strength found."},
                        "description": {"type": "STRING", "description": "Detailed description of the strength."}
                    }
                }
            },
            "keywords": {
                "type": "OBJECT",
                "properties": {
                    "well_used": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "Keywords already used well."},
                    "missing": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "Relevant keywords that are missing."},
                    "suggestions": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "Additional keyword suggestions."}
                }
            },
            "line_by_line": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": {"type": "STRING", "description": "CV section analysed (e.g. Summary, Work Experience)."},
                        "whats_working": {"type": "STRING", "description": "What already works in this section."},
                        "needs_improvement": {"type": "STRING", "description": "What should be improved in this section."}
                    }
                }
            },
            "action_plan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "week": {"type": "NUMBER", "description": "Week number of the action plan."},
                        "focus": {"type": "STRING", "description": "Main focus for that week."},
                        "steps": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "Concrete steps to take."}
                    }
                }
            }
        }
    })
}
