//! Structured filter builder.
//!
//! Turns loosely filled filter-form rows into typed clauses, renders each
//! clause as a short English phrase, and joins them into a candidate query
//! prompt. Rows that are incomplete build nothing rather than failing; only
//! malformed input (non-numeric years, unknown operators or proficiency
//! levels) is an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("{field} must be a number, got '{raw}'")]
    InvalidNumber { field: String, raw: String },

    #[error("Unsupported operator '{operator}' for {field}")]
    InvalidOperator { field: String, operator: String },

    #[error("Unknown proficiency '{0}' (expected BASIC, INTERMEDIATE or ADVANCED)")]
    InvalidProficiency(String),
}

/// One row of the filter form, exactly as the client sends it. Missing and
/// `null` fields both read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterRow {
    pub field: Option<String>,
    pub operator: Option<String>,
    pub value: Option<String>,
    pub value2: Option<String>,
    pub proficiency: Option<String>,
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("").trim()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceOperator {
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = "between")]
    Between,
}

impl ExperienceOperator {
    fn parse(raw: &str) -> Result<Self, FilterError> {
        match raw.trim() {
            "" | ">=" => Ok(ExperienceOperator::AtLeast),
            "<=" => Ok(ExperienceOperator::AtMost),
            "between" => Ok(ExperienceOperator::Between),
            other => Err(FilterError::InvalidOperator {
                field: "work_experience_years".to_string(),
                operator: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceOperator::AtLeast => ">=",
            ExperienceOperator::AtMost => "<=",
            ExperienceOperator::Between => "between",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchOperator {
    Equals,
    Contains,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillProficiency {
    Basic,
    Intermediate,
    Advanced,
}

impl SkillProficiency {
    fn parse(raw: &str) -> Result<Option<Self>, FilterError> {
        match raw.trim().to_uppercase().as_str() {
            "" => Ok(None),
            "BASIC" => Ok(Some(SkillProficiency::Basic)),
            "INTERMEDIATE" => Ok(Some(SkillProficiency::Intermediate)),
            "ADVANCED" => Ok(Some(SkillProficiency::Advanced)),
            _ => Err(FilterError::InvalidProficiency(raw.trim().to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillProficiency::Basic => "Basic",
            SkillProficiency::Intermediate => "Intermediate",
            SkillProficiency::Advanced => "Advanced",
        }
    }
}

/// A single typed filter condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FilterClause {
    WorkExperienceYears {
        operator: ExperienceOperator,
        value: f64,
        value2: Option<f64>,
    },
    Bench {
        operator: MatchOperator,
        value: bool,
    },
    Bucket {
        operator: MatchOperator,
        value: String,
    },
    Role {
        operator: MatchOperator,
        value: String,
    },
    Skill {
        operator: MatchOperator,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        proficiency: Option<SkillProficiency>,
    },
    Project {
        operator: MatchOperator,
        value: String,
    },
    Certification {
        operator: MatchOperator,
        value: String,
    },
}

/// How clauses combine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOp {
    #[default]
    And,
    Or,
}

impl JoinOp {
    fn joiner(self) -> &'static str {
        match self {
            JoinOp::And => " AND ",
            JoinOp::Or => " OR ",
        }
    }
}

/// Body for the candidate filter search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterQuery {
    pub op: JoinOp,
    pub filters: Vec<FilterClause>,
}

/// Builds a clause from a form row. Returns `Ok(None)` when the row is
/// incomplete or names a field the search does not support.
pub fn build_filter(row: &FilterRow) -> Result<Option<FilterClause>, FilterError> {
    let value = text(&row.value);
    let clause = match text(&row.field) {
        "work_experience_years" => {
            let operator = ExperienceOperator::parse(text(&row.operator))?;
            let value2 = text(&row.value2);
            if value.is_empty() || (operator == ExperienceOperator::Between && value2.is_empty())
            {
                return Ok(None);
            }
            FilterClause::WorkExperienceYears {
                operator,
                value: parse_years("value", value)?,
                value2: match operator {
                    ExperienceOperator::Between => Some(parse_years("value2", value2)?),
                    _ => None,
                },
            }
        }
        _ if value.is_empty() => return Ok(None),
        "bench" => FilterClause::Bench {
            operator: MatchOperator::Equals,
            value: value == "true",
        },
        "bucket" => FilterClause::Bucket {
            operator: MatchOperator::Equals,
            value: value.to_string(),
        },
        "role" => FilterClause::Role {
            operator: MatchOperator::Equals,
            value: value.to_string(),
        },
        "skill" => FilterClause::Skill {
            operator: MatchOperator::Contains,
            value: value.to_string(),
            proficiency: SkillProficiency::parse(text(&row.proficiency))?,
        },
        "project" => FilterClause::Project {
            operator: MatchOperator::Contains,
            value: value.to_string(),
        },
        "certification" => FilterClause::Certification {
            operator: MatchOperator::Contains,
            value: value.to_string(),
        },
        _ => return Ok(None),
    };
    Ok(Some(clause))
}

fn parse_years(field: &str, raw: &str) -> Result<f64, FilterError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FilterError::InvalidNumber {
            field: field.to_string(),
            raw: raw.to_string(),
        })
}

/// Short English rendering of a clause.
pub fn preview_clause(clause: &FilterClause) -> String {
    match clause {
        FilterClause::WorkExperienceYears {
            operator: ExperienceOperator::Between,
            value,
            value2,
        } => match value2 {
            Some(upper) => format!("work experience between {value} and {upper} years"),
            None => format!("work experience between {value} and (unset) years"),
        },
        FilterClause::WorkExperienceYears {
            operator, value, ..
        } => format!("work experience {} {} years", operator.as_str(), value),
        FilterClause::Bench { value, .. } => {
            format!("bench equals {}", if *value { "Yes" } else { "No" })
        }
        FilterClause::Skill {
            value, proficiency, ..
        } => match proficiency {
            Some(p) => format!("skill equals \"{value}\" (proficiency: {})", p.label()),
            None => format!("skill equals \"{value}\""),
        },
        FilterClause::Bucket { operator, value }
        | FilterClause::Role { operator, value }
        | FilterClause::Project { operator, value }
        | FilterClause::Certification { operator, value } => {
            let op = match operator {
                MatchOperator::Equals => "equals",
                MatchOperator::Contains => "contains",
            };
            format!("{} {op} \"{value}\"", clause.field_name())
        }
    }
}

impl FilterClause {
    pub fn field_name(&self) -> &'static str {
        match self {
            FilterClause::WorkExperienceYears { .. } => "work_experience_years",
            FilterClause::Bench { .. } => "bench",
            FilterClause::Bucket { .. } => "bucket",
            FilterClause::Role { .. } => "role",
            FilterClause::Skill { .. } => "skill",
            FilterClause::Project { .. } => "project",
            FilterClause::Certification { .. } => "certification",
        }
    }
}

/// Natural-language prompt for a set of clause previews.
pub fn compose_prompt(op: JoinOp, previews: &[String]) -> String {
    if previews.is_empty() {
        return "Show candidates where <add at least one filter>.".to_string();
    }
    format!("Show candidates where {}.", previews.join(op.joiner()))
}

/// Builds every complete row into a query, skipping incomplete ones.
pub fn build_query(op: JoinOp, rows: &[FilterRow]) -> Result<FilterQuery, FilterError> {
    let mut filters = Vec::new();
    for row in rows {
        if let Some(clause) = build_filter(row)? {
            filters.push(clause);
        }
    }
    Ok(FilterQuery { op, filters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(field: &str, operator: &str, value: &str) -> FilterRow {
        FilterRow {
            field: Some(field.to_string()),
            operator: Some(operator.to_string()),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_experience_defaults_to_at_least() {
        let clause = build_filter(&row("work_experience_years", "", "3")).unwrap();
        assert_eq!(
            clause,
            Some(FilterClause::WorkExperienceYears {
                operator: ExperienceOperator::AtLeast,
                value: 3.0,
                value2: None,
            })
        );
    }

    #[test]
    fn test_experience_between_needs_second_value() {
        let mut r = row("work_experience_years", "between", "2");
        assert_eq!(build_filter(&r).unwrap(), None);
        r.value2 = Some("5".to_string());
        let clause = build_filter(&r).unwrap().unwrap();
        assert_eq!(preview_clause(&clause), "work experience between 2 and 5 years");
    }

    #[test]
    fn test_between_without_upper_bound_is_not_invented() {
        let clause: FilterClause = serde_json::from_value(json!({
            "field": "work_experience_years",
            "operator": "between",
            "value": 2.0,
            "value2": null
        }))
        .unwrap();
        assert_eq!(
            preview_clause(&clause),
            "work experience between 2 and (unset) years"
        );
    }

    #[test]
    fn test_null_row_fields_read_as_empty() {
        let r: FilterRow = serde_json::from_value(json!({
            "field": "skill",
            "operator": null,
            "value": null,
            "proficiency": null
        }))
        .unwrap();
        assert_eq!(build_filter(&r).unwrap(), None);
    }

    #[test]
    fn test_experience_rejects_non_numeric() {
        let err = build_filter(&row("work_experience_years", ">=", "lots")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidNumber { .. }));
    }

    #[test]
    fn test_experience_rejects_unknown_operator() {
        let err = build_filter(&row("work_experience_years", "==", "2")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperator { .. }));
    }

    #[test]
    fn test_empty_value_builds_nothing() {
        for field in ["bench", "bucket", "role", "skill", "project", "certification"] {
            assert_eq!(build_filter(&row(field, "", "")).unwrap(), None, "{field}");
        }
        assert_eq!(build_filter(&row("work_experience_years", ">=", " ")).unwrap(), None);
    }

    #[test]
    fn test_unknown_or_missing_field_builds_nothing() {
        assert_eq!(build_filter(&row("salary", "", "100")).unwrap(), None);
        assert_eq!(build_filter(&row("", "", "100")).unwrap(), None);
    }

    #[test]
    fn test_bench_value_is_true_only_for_literal_true() {
        let yes = build_filter(&row("bench", "", "true")).unwrap().unwrap();
        let no = build_filter(&row("bench", "", "false")).unwrap().unwrap();
        assert_eq!(preview_clause(&yes), "bench equals Yes");
        assert_eq!(preview_clause(&no), "bench equals No");
    }

    #[test]
    fn test_skill_with_proficiency() {
        let mut r = row("skill", "contains", "Python");
        r.proficiency = Some("ADVANCED".to_string());
        let clause = build_filter(&r).unwrap().unwrap();
        assert_eq!(
            preview_clause(&clause),
            "skill equals \"Python\" (proficiency: Advanced)"
        );
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({
                "field": "skill",
                "operator": "contains",
                "value": "Python",
                "proficiency": "ADVANCED"
            })
        );
    }

    #[test]
    fn test_skill_without_proficiency_omits_key() {
        let clause = build_filter(&row("skill", "", "SQL")).unwrap().unwrap();
        let value = serde_json::to_value(&clause).unwrap();
        assert!(value.get("proficiency").is_none());
    }

    #[test]
    fn test_skill_rejects_unknown_proficiency() {
        let mut r = row("skill", "", "SQL");
        r.proficiency = Some("EXPERT".to_string());
        assert_eq!(
            build_filter(&r).unwrap_err(),
            FilterError::InvalidProficiency("EXPERT".to_string())
        );
    }

    #[test]
    fn test_equals_and_contains_previews() {
        let role = build_filter(&row("role", "", "Data Engineer")).unwrap().unwrap();
        let cert = build_filter(&row("certification", "", "AWS")).unwrap().unwrap();
        assert_eq!(preview_clause(&role), "role equals \"Data Engineer\"");
        assert_eq!(preview_clause(&cert), "certification contains \"AWS\"");
    }

    #[test]
    fn test_compose_prompt() {
        assert_eq!(
            compose_prompt(JoinOp::And, &[]),
            "Show candidates where <add at least one filter>."
        );
        let previews = vec![
            "work experience >= 3 years".to_string(),
            "bench equals Yes".to_string(),
        ];
        assert_eq!(
            compose_prompt(JoinOp::Or, &previews),
            "Show candidates where work experience >= 3 years OR bench equals Yes."
        );
    }

    #[test]
    fn test_build_query_skips_incomplete_rows() {
        let rows = vec![row("skill", "", "Rust"), row("project", "", "")];
        let query = build_query(JoinOp::And, &rows).unwrap();
        assert_eq!(query.filters.len(), 1);
        assert_eq!(
            serde_json::to_value(&query).unwrap()["op"],
            json!("AND")
        );
    }
}
