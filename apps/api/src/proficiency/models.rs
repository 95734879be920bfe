use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Project fields that may hold a technology list, checked in order.
pub const TECH_LIST_FIELDS: &[&str] = &["technical_tools", "technologies_used", "skills", "tools"];

/// Advanced tier starts at this many mentions.
pub const ADVANCED_MIN_COUNT: u32 = 4;
/// Intermediate tier starts at this many mentions.
pub const INTERMEDIATE_MIN_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyTier {
    Advanced,
    Intermediate,
    Beginner,
}

impl ProficiencyTier {
    pub fn for_count(count: u32) -> Self {
        match count {
            c if c >= ADVANCED_MIN_COUNT => ProficiencyTier::Advanced,
            c if c >= INTERMEDIATE_MIN_COUNT => ProficiencyTier::Intermediate,
            _ => ProficiencyTier::Beginner,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProficiencyTier::Advanced => "Advanced",
            ProficiencyTier::Intermediate => "Intermediate",
            ProficiencyTier::Beginner => "Beginner",
        }
    }

    /// Detail-view text shown when the tier has no skills.
    pub fn empty_message(self) -> &'static str {
        match self {
            ProficiencyTier::Advanced => "No skills reached the advanced threshold yet.",
            ProficiencyTier::Intermediate => "No intermediate skills found.",
            ProficiencyTier::Beginner => "No beginner skills found.",
        }
    }
}

/// A skill and the number of times it was mentioned across projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillCount {
    pub name: String,
    pub count: u32,
}

/// Skills grouped by tier, each list ordered by descending count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProficiencyBuckets {
    pub advanced: Vec<SkillCount>,
    pub intermediate: Vec<SkillCount>,
    pub beginner: Vec<SkillCount>,
}

impl ProficiencyBuckets {
    pub fn tier(&self, tier: ProficiencyTier) -> &[SkillCount] {
        match tier {
            ProficiencyTier::Advanced => &self.advanced,
            ProficiencyTier::Intermediate => &self.intermediate,
            ProficiencyTier::Beginner => &self.beginner,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.advanced.is_empty() && self.intermediate.is_empty() && self.beginner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.advanced.len() + self.intermediate.len() + self.beginner.len()
    }
}

/// A project's technology list as it arrives from the parser: either an
/// array of tokens or one comma-separated string. `Unsupported` is a present
/// value of any other JSON type; it claims the field but yields no tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechList {
    Scalar(String),
    List(Vec<String>),
    Unsupported,
}

impl TechList {
    /// Reads a technology list out of a JSON value.
    ///
    /// Returns `None` only for null, `""` and `[]`, so the caller moves on to
    /// the next field. Any other value wins the field even if it yields
    /// nothing. Array elements that are neither strings nor numbers are
    /// dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Array(items) if items.is_empty() => None,
            Value::String(s) => Some(TechList::Scalar(s.clone())),
            Value::Array(items) => Some(TechList::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => Some(TechList::Unsupported),
        }
    }

    /// Candidate skill strings, trimmed, with empty pieces removed.
    pub fn tokens(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            TechList::Scalar(s) => s.split(',').collect(),
            TechList::List(items) => items.iter().map(String::as_str).collect(),
            TechList::Unsupported => Vec::new(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ProficiencyTier::for_count(1), ProficiencyTier::Beginner);
        assert_eq!(ProficiencyTier::for_count(2), ProficiencyTier::Intermediate);
        assert_eq!(ProficiencyTier::for_count(3), ProficiencyTier::Intermediate);
        assert_eq!(ProficiencyTier::for_count(4), ProficiencyTier::Advanced);
        assert_eq!(ProficiencyTier::for_count(40), ProficiencyTier::Advanced);
    }

    #[test]
    fn test_scalar_and_list_tokens_agree() {
        let scalar = TechList::from_value(&json!("Python, SQL ,Spark")).unwrap();
        let list = TechList::from_value(&json!(["Python", "SQL", "Spark"])).unwrap();
        assert_eq!(scalar.tokens(), list.tokens());
    }

    #[test]
    fn test_only_null_and_empty_values_are_absent() {
        assert!(TechList::from_value(&json!(null)).is_none());
        assert!(TechList::from_value(&json!([])).is_none());
        assert!(TechList::from_value(&json!("")).is_none());
    }

    #[test]
    fn test_other_present_values_yield_no_tokens() {
        for value in [json!("   "), json!({"a": 1}), json!(7), json!(true)] {
            let list = TechList::from_value(&value).unwrap();
            assert!(list.tokens().is_empty(), "{value}");
        }
        assert_eq!(TechList::from_value(&json!(7)), Some(TechList::Unsupported));
    }

    #[test]
    fn test_list_keeps_numbers_drops_objects() {
        let list = TechList::from_value(&json!(["Go", 3, {"x": 1}, null, " "])).unwrap();
        assert_eq!(list.tokens(), vec!["Go", "3"]);
    }

    #[test]
    fn test_buckets_serialize_with_tier_keys() {
        let buckets = ProficiencyBuckets {
            advanced: vec![SkillCount {
                name: "Rust".to_string(),
                count: 5,
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&buckets).unwrap();
        assert_eq!(
            value,
            json!({
                "advanced": [{"name": "Rust", "count": 5}],
                "intermediate": [],
                "beginner": []
            })
        );
    }
}
