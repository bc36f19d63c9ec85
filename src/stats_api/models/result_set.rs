use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Envelope returned by every stats endpoint: a list of named tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", alias = "resultSet")]
    pub result_sets: Vec<ResultSet>,
}

/// One named table: column headers plus positional rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl StatsResponse {
    /// Looks up a result set by name. `url` is only used for the error message.
    pub fn result_set(&self, name: &str, url: &str) -> Result<&ResultSet, AppError> {
        self.result_sets
            .iter()
            .find(|set| set.name == name)
            .ok_or_else(|| {
                let available: Vec<&str> =
                    self.result_sets.iter().map(|set| set.name.as_str()).collect();
                AppError::api_unexpected_structure(
                    format!("missing result set '{name}' (available: {available:?})"),
                    url,
                )
            })
    }
}

impl ResultSet {
    /// Zips every row with the headers and deserializes it into `T`.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, AppError> {
        self.row_set
            .iter()
            .enumerate()
            .map(|(index, row)| {
                if row.len() != self.headers.len() {
                    return Err(AppError::result_set_row(
                        &self.name,
                        index,
                        format!(
                            "expected {} values, found {}",
                            self.headers.len(),
                            row.len()
                        ),
                    ));
                }
                let record: Map<String, Value> = self
                    .headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                serde_json::from_value(Value::Object(record))
                    .map_err(|e| AppError::result_set_row(&self.name, index, e.to_string()))
            })
            .collect()
    }

    /// Builds a result set from typed rows, the inverse of [`ResultSet::rows`].
    pub fn from_rows<T: Serialize>(name: &str, rows: &[T]) -> Result<Self, AppError> {
        let records = rows
            .iter()
            .map(|row| match serde_json::to_value(row)? {
                Value::Object(map) => Ok(map),
                other => Err(AppError::result_set_row(
                    name,
                    0,
                    format!("row serialized to {other}, expected an object"),
                )),
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let headers: Vec<String> = records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        let row_set = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|header| record.remove(header).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(ResultSet {
            name: name.to_string(),
            headers,
            row_set,
        })
    }
}

/// Treats a JSON `null` as the type's default (ids of absent players are sometimes null).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Row {
        #[serde(rename = "GAME_ID")]
        game_id: String,
        #[serde(rename = "PTS")]
        points: Option<i64>,
    }

    fn sample_response() -> StatsResponse {
        serde_json::from_value(json!({
            "resource": "boxscore",
            "resultSets": [
                {
                    "name": "PlayerStats",
                    "headers": ["GAME_ID", "PTS"],
                    "rowSet": [["0042200401", 12], ["0042200401", null]]
                },
                {
                    "name": "TeamStats",
                    "headers": ["GAME_ID"],
                    "rowSet": []
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_result_set_lookup_and_rows() {
        let response = sample_response();
        let rows: Vec<Row> = response
            .result_set("PlayerStats", "url")
            .unwrap()
            .rows()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].points, Some(12));
        assert_eq!(rows[1].points, None);
    }

    #[test]
    fn test_missing_result_set() {
        let response = sample_response();
        let error = response.result_set("PlayByPlay", "url").unwrap_err();
        assert!(matches!(error, AppError::ApiUnexpectedStructure { .. }));
        assert!(error.to_string().contains("PlayerStats"));
    }

    #[test]
    fn test_row_length_mismatch() {
        let set = ResultSet {
            name: "PlayerStats".to_string(),
            headers: vec!["GAME_ID".to_string(), "PTS".to_string()],
            row_set: vec![vec![json!("0042200401")]],
        };
        let error = set.rows::<Row>().unwrap_err();
        assert!(matches!(error, AppError::ResultSetRow { index: 0, .. }));
    }

    #[test]
    fn test_single_result_set_alias() {
        let response: StatsResponse = serde_json::from_value(json!({
            "resultSet": [{ "name": "LeagueGameLog", "headers": [], "rowSet": [] }]
        }))
        .unwrap();
        assert_eq!(response.result_sets[0].name, "LeagueGameLog");
    }

    #[test]
    fn test_from_rows_matches_headers() {
        let rows = vec![Row {
            game_id: "0042200405".to_string(),
            points: Some(3),
        }];
        let set = ResultSet::from_rows("PlayerStats", &rows).unwrap();

        assert_eq!(set.headers.len(), 2);
        assert_eq!(set.rows::<Row>().unwrap(), rows);
    }
}
