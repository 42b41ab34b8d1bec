use serde::Serialize;
use serde_json::{json, Value};

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

pub fn build_request(query: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: build_prompt(query),
            }],
        }],
        tools: vec![Tool {
            google_search: GoogleSearch {},
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    }
}

/// Instruction sent to the model. The query is embedded verbatim.
pub fn build_prompt(query: &str) -> String {
    format!(
        "Recommend movies based on this request: \"{query}\".\n\
         Use Google Search to find official high-quality poster image URLs \
         (preferably from TMDB, IMDb, or Wikipedia) and current ratings.\n\
         Provide a concise introduction explaining the mood of these choices.\n\
         For each movie, provide:\n\
         - title\n\
         - year\n\
         - a list of genres\n\
         - rating (out of 10)\n\
         - a compelling description\n\
         - posterUrl (a direct, high-quality URL to the movie's official poster)\n\
         - reasoning on why this fits the user's search query."
    )
}

/// Output schema the service must follow.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "intro": { "type": "STRING" },
            "movies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "year": { "type": "STRING" },
                        "genre": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "rating": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "posterUrl": { "type": "STRING" },
                        "reasoning": { "type": "STRING" }
                    },
                    "required": [
                        "title", "year", "genre", "rating",
                        "description", "posterUrl", "reasoning"
                    ]
                }
            }
        },
        "required": ["intro", "movies"]
    })
}
