use crate::domain::model::{PointValue, TeamRecord};
use crate::utils::error::FetchError;
use serde::Deserialize;
use serde_json::Value;

/// A team document as stored by the leaderboard backend. Member names are
/// presentation data and are not read.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    pub team_name: String,
    /// Checked by the standings builder, not here.
    #[serde(default)]
    pub points: PointValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Text(String),
    Number(i64),
}

impl From<TeamDocument> for TeamRecord {
    fn from(doc: TeamDocument) -> Self {
        let id = match doc.id {
            DocumentId::Text(id) => id,
            DocumentId::Number(id) => id.to_string(),
        };
        TeamRecord::with_points(id, doc.team_name, doc.points)
    }
}

/// Accepts `{"teams": [...]}` or a bare array of team documents.
pub fn parse_teams(body: &[u8]) -> Result<Vec<TeamRecord>, FetchError> {
    Ok(parse_documents(body)?
        .into_iter()
        .map(TeamRecord::from)
        .collect())
}

fn parse_documents(body: &[u8]) -> Result<Vec<TeamDocument>, FetchError> {
    let value: Value = serde_json::from_slice(body).map_err(malformed)?;

    let teams = match value {
        Value::Object(mut object) => object.remove("teams").ok_or_else(|| {
            FetchError::MalformedPayload {
                message: "response object has no 'teams' field".to_string(),
            }
        })?,
        array @ Value::Array(_) => array,
        other => {
            return Err(FetchError::MalformedPayload {
                message: format!("expected an object or array, got {}", json_kind(&other)),
            })
        }
    };

    if !teams.is_array() {
        return Err(FetchError::MalformedPayload {
            message: format!("'teams' must be an array, got {}", json_kind(&teams)),
        });
    }

    serde_json::from_value(teams).map_err(malformed)
}

fn malformed(e: serde_json::Error) -> FetchError {
    FetchError::MalformedPayload {
        message: e.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_backend_response() {
        let body = br#"{"teams": [
            {"_id": "65a1", "team_name": "Kraken", "team_member1": "Ana", "team_member2": "Bo", "points": 120},
            {"_id": "65a2", "team_name": "Gulls", "team_member1": "Cy"}
        ]}"#;

        let records = parse_teams(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TeamRecord::new("65a1", "Kraken", 120));
        // store default for missing points
        assert_eq!(records[1].points.as_points(), Some(0));
    }

    #[test]
    fn test_parse_bare_array_with_numeric_ids() {
        let body = br#"[{"id": 7, "team_name": "Otters", "points": 3}]"#;

        let records = parse_teams(body).unwrap();

        assert_eq!(records, vec![TeamRecord::new("7", "Otters", 3)]);
    }

    #[test]
    fn test_negative_points_pass_through_to_the_builder() {
        let body = br#"{"teams": [{"_id": "x", "team_name": "T", "points": -4}]}"#;

        let records = parse_teams(body).unwrap();

        assert_eq!(records[0].points.as_i64(), Some(-4));
    }

    #[test]
    fn test_fractional_points_pass_through_to_the_builder() {
        let body = br#"{"teams": [{"_id": "x", "team_name": "T", "points": 12.5}]}"#;

        let records = parse_teams(body).unwrap();

        assert_eq!(records[0].points.as_points(), None);
        assert_eq!(records[0].points.to_string(), "12.5");
    }

    #[test]
    fn test_missing_teams_field_is_malformed() {
        assert!(matches!(
            parse_teams(br#"{"message": "hello"}"#),
            Err(FetchError::MalformedPayload { .. })
        ));
        assert!(matches!(
            parse_teams(br#"{"teams": null}"#),
            Err(FetchError::MalformedPayload { .. })
        ));
        assert!(matches!(
            parse_teams(b"not json"),
            Err(FetchError::MalformedPayload { .. })
        ));
    }
}
