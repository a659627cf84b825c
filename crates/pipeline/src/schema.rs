//! Validation of raw model output into an [`Analysis`].
//!
//! ## Rules
//! - The text must be a JSON object, optionally wrapped in a ```json fence
//! - `title`, `compatibilityScore` and `blendedPost` are required; a missing
//!   or mistyped core field is a `GenerationParse` error
//! - Every other field falls back to an empty value when absent or mistyped
//! - Scores accept integers, floats and numeric strings; they are rounded
//!   and clamped to 0-100

use domain::{Analysis, BlendError, IrlPotentials, Result, Utterance};
use serde_json::{Map, Value};

const MAX_SCORE: f64 = 100.0;

/// Parse the model's raw answer
pub fn parse_analysis(raw: &str) -> Result<Analysis> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BlendError::parse(format!("response is not valid JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(BlendError::parse("response is not a JSON object"));
    };

    let title = required_string(&fields, &["title"])?;
    let compatibility_score = fields
        .get("compatibilityScore")
        .and_then(score)
        .ok_or_else(|| BlendError::parse("missing or invalid field: compatibilityScore"))?;
    let blended_post = required_string(&fields, &["blendedPost", "blendedTweet"])?;

    Ok(Analysis {
        title,
        compatibility_score,
        common_themes: string_list(fields.get("commonThemes")),
        differences: string_list(fields.get("differences")),
        blended_post,
        debate_question: optional_string(fields.get("debateQuestion")),
        conversation: conversation(fields.get("conversation")),
        blend_persona: optional_string(fields.get("blendPersona")).unwrap_or_default(),
        irl_potentials: irl_potentials(fields.get("irlPotentials")),
        summary: optional_string(fields.get("summary")).unwrap_or_default(),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// =============================================================================
// Field Helpers
// =============================================================================

/// First non-blank string among `keys`
fn required_string(fields: &Map<String, Value>, keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| optional_string(fields.get(*key)))
        .ok_or_else(|| BlendError::parse(format!("missing or invalid field: {}", keys[0])))
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| optional_string(Some(item)))
                .collect()
        })
        .unwrap_or_default()
}

fn score(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, MAX_SCORE) as u8)
}

fn optional_score(value: Option<&Value>) -> u8 {
    value.and_then(score).unwrap_or(0)
}

fn irl_potentials(value: Option<&Value>) -> IrlPotentials {
    let Some(fields) = value.and_then(Value::as_object) else {
        return IrlPotentials::default();
    };

    IrlPotentials {
        dating: optional_score(fields.get("dating")),
        friendship: optional_score(fields.get("friendship")),
        enemy: optional_score(fields.get("enemy")),
        might_just_kill: optional_score(fields.get("mightJustKill")),
    }
}

fn conversation(value: Option<&Value>) -> Vec<Utterance> {
    value
        .and_then(Value::as_array)
        .map(|lines| lines.iter().filter_map(utterance).collect())
        .unwrap_or_default()
}

fn utterance(value: &Value) -> Option<Utterance> {
    match value {
        Value::String(line) => {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let (speaker, text) = match line.split_once(':') {
                Some((speaker, text)) if !speaker.trim().is_empty() => {
                    (speaker.trim().to_string(), text.trim().to_string())
                }
                _ => (String::new(), line.to_string()),
            };
            Some(Utterance { speaker, text })
        }
        Value::Object(fields) => {
            let text = optional_string(fields.get("text"))?;
            let speaker = optional_string(fields.get("speaker")).unwrap_or_default();
            Some(Utterance { speaker, text })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ErrorKind;

    const FULL: &str = r#"{
        "title": "The Caffeinated Compilers",
        "compatibilityScore": 72,
        "commonThemes": ["Rust", "Coffee", "Open source", "Cats"],
        "differences": ["Tabs vs spaces", "Morning vs night", "Memes vs essays"],
        "blendedPost": "Just rewrote my espresso machine in Rust.",
        "debateQuestion": "Is a hot dog a sandwich?",
        "conversation": ["alice: ship it", "bob: after coffee", "alice: fine"],
        "blendPersona": "A sleep-deprived systems programmer",
        "irlPotentials": { "dating": 20, "friendship": 85, "enemy": 10, "mightJustKill": 5 },
        "summary": "They would get along, eventually."
    }"#;

    #[test]
    fn test_full_response_parses() {
        let analysis = parse_analysis(FULL).unwrap();

        assert_eq!(analysis.title, "The Caffeinated Compilers");
        assert_eq!(analysis.compatibility_score, 72);
        assert_eq!(analysis.common_themes.len(), 4);
        assert_eq!(analysis.differences.len(), 3);
        assert_eq!(analysis.debate_question.as_deref(), Some("Is a hot dog a sandwich?"));
        assert_eq!(analysis.conversation.len(), 3);
        assert_eq!(analysis.conversation[0].speaker, "alice");
        assert_eq!(analysis.conversation[0].text, "ship it");
        assert_eq!(analysis.irl_potentials.friendship, 85);
        assert_eq!(analysis.irl_potentials.might_just_kill, 5);
        assert_eq!(analysis.summary, "They would get along, eventually.");
    }

    #[test]
    fn test_not_json_is_parse_error() {
        let err = parse_analysis("Sure! Here is your analysis").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationParse);
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let err = parse_analysis("[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationParse);
    }

    #[test]
    fn test_missing_core_fields_are_parse_errors() {
        let no_title = r#"{"compatibilityScore": 50, "blendedPost": "x"}"#;
        let no_score = r#"{"title": "t", "blendedPost": "x"}"#;
        let no_post = r#"{"title": "t", "compatibilityScore": 50}"#;

        for raw in [no_title, no_score, no_post] {
            let err = parse_analysis(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::GenerationParse, "input: {raw}");
        }
    }

    #[test]
    fn test_mistyped_core_field_is_parse_error() {
        let raw = r#"{"title": 42, "compatibilityScore": 50, "blendedPost": "x"}"#;
        assert!(parse_analysis(raw).is_err());

        let raw = r#"{"title": "t", "compatibilityScore": "very", "blendedPost": "x"}"#;
        assert!(parse_analysis(raw).is_err());
    }

    #[test]
    fn test_optional_fields_default() {
        let raw = r#"{"title": "t", "compatibilityScore": 10, "blendedPost": "x",
                      "commonThemes": "not a list", "irlPotentials": null}"#;
        let analysis = parse_analysis(raw).unwrap();

        assert!(analysis.common_themes.is_empty());
        assert!(analysis.differences.is_empty());
        assert!(analysis.conversation.is_empty());
        assert!(analysis.debate_question.is_none());
        assert_eq!(analysis.blend_persona, "");
        assert_eq!(analysis.irl_potentials, IrlPotentials::default());
    }

    #[test]
    fn test_scores_are_rounded_and_clamped() {
        let raw = r#"{"title": "t", "compatibilityScore": 140.2, "blendedPost": "x",
                      "irlPotentials": {"dating": -5, "friendship": "66.6", "enemy": 12.4}}"#;
        let analysis = parse_analysis(raw).unwrap();

        assert_eq!(analysis.compatibility_score, 100);
        assert_eq!(analysis.irl_potentials.dating, 0);
        assert_eq!(analysis.irl_potentials.friendship, 67);
        assert_eq!(analysis.irl_potentials.enemy, 12);
        assert_eq!(analysis.irl_potentials.might_just_kill, 0);
    }

    #[test]
    fn test_fenced_response_is_unwrapped() {
        let raw = format!("```json\n{FULL}\n```");
        assert_eq!(parse_analysis(&raw).unwrap().compatibility_score, 72);
    }

    #[test]
    fn test_blended_tweet_alias() {
        let raw = r#"{"title": "t", "compatibilityScore": 1, "blendedTweet": "legacy"}"#;
        assert_eq!(parse_analysis(raw).unwrap().blended_post, "legacy");
    }

    #[test]
    fn test_conversation_shapes() {
        let raw = r#"{"title": "t", "compatibilityScore": 1, "blendedPost": "x",
                      "conversation": [
                          {"speaker": "User1", "text": "hello"},
                          "no label here",
                          "User2: time: 5pm",
                          7,
                          {"speaker": "User1"}
                      ]}"#;
        let lines = parse_analysis(raw).unwrap().conversation;

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].speaker, "User1");
        assert_eq!(lines[1].speaker, "");
        assert_eq!(lines[1].text, "no label here");
        assert_eq!(lines[2].speaker, "User2");
        assert_eq!(lines[2].text, "time: 5pm");
    }
}
