//! Skill proficiency classification.
//!
//! Tallies technology mentions across a candidate's projects and buckets every
//! distinct skill by how often it appears:
//! - advanced: 4+ mentions
//! - intermediate: 2–3 mentions
//! - beginner: 1 mention
//!
//! Counting is per mention, so a tool listed twice in one project counts twice.

use std::collections::HashMap;

use serde_json::Value;

use crate::proficiency::models::{
    ProficiencyBuckets, ProficiencyTier, SkillCount, TechList, TECH_LIST_FIELDS,
};

/// Classifies the skills found in `projects`.
///
/// Entries that are not JSON objects, or that carry no usable technology list,
/// contribute nothing.
pub fn classify(projects: &[Value]) -> ProficiencyBuckets {
    let mut tally = SkillTally::default();

    for project in projects {
        if let Some(list) = select_tech_list(project) {
            for token in list.tokens() {
                tally.add(token);
            }
        }
    }

    tally.into_buckets()
}

/// Classifies the `projects` array of a parsed resume. A missing or non-array
/// `projects` field yields empty buckets.
pub fn classify_parsed(parsed: &Value) -> ProficiencyBuckets {
    classify(projects_of(parsed))
}

pub fn projects_of(parsed: &Value) -> &[Value] {
    parsed
        .get("projects")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First present technology list on a project, in `TECH_LIST_FIELDS` order.
fn select_tech_list(project: &Value) -> Option<TechList> {
    let fields = project.as_object()?;
    TECH_LIST_FIELDS
        .iter()
        .find_map(|key| fields.get(*key).and_then(TechList::from_value))
}

fn skill_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Insertion-ordered tally scoped to a single classification.
#[derive(Default)]
struct SkillTally {
    index: HashMap<String, usize>,
    entries: Vec<SkillCount>,
}

impl SkillTally {
    fn add(&mut self, raw: &str) {
        let key = skill_key(raw);
        if key.is_empty() {
            return;
        }
        match self.index.get(&key) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(SkillCount {
                    name: raw.trim().to_string(),
                    count: 1,
                });
            }
        }
    }

    fn into_buckets(self) -> ProficiencyBuckets {
        let mut items = self.entries;
        // sort_by is stable: ties keep first-seen order
        items.sort_by(|a, b| b.count.cmp(&a.count));

        let mut buckets = ProficiencyBuckets::default();
        for item in items {
            match ProficiencyTier::for_count(item.count) {
                ProficiencyTier::Advanced => buckets.advanced.push(item),
                ProficiencyTier::Intermediate => buckets.intermediate.push(item),
                ProficiencyTier::Beginner => buckets.beginner.push(item),
            }
        }
        buckets
    }
}
