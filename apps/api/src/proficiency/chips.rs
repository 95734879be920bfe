//! Chip truncation and the two candidate views built on it.

use serde::Serialize;

use crate::proficiency::models::{ProficiencyBuckets, ProficiencyTier, SkillCount};

/// The chips to render for one group plus how many were collapsed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChipSelection {
    pub shown: Vec<SkillCount>,
    pub hidden_count: usize,
}

impl ChipSelection {
    /// `"+K"` indicator for collapsed chips, if any.
    pub fn overflow_label(&self) -> Option<String> {
        (self.hidden_count > 0).then(|| format!("+{}", self.hidden_count))
    }
}

/// Keeps the first `max_shown` items and counts the rest.
pub fn select_chips(items: &[SkillCount], max_shown: usize) -> ChipSelection {
    let take = max_shown.min(items.len());
    ChipSelection {
        shown: items[..take].to_vec(),
        hidden_count: items.len() - take,
    }
}

/// Tooltip text for a chip.
pub fn chip_title(item: &SkillCount) -> String {
    format!("{} • {} project(s)", item.name, item.count)
}

#[derive(Debug, Clone, Serialize)]
pub struct Chip {
    pub name: String,
    pub count: u32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChipGroup {
    pub label: String,
    pub total: usize,
    pub chips: Vec<Chip>,
    pub hidden_count: usize,
    pub overflow_label: Option<String>,
    pub empty_message: Option<String>,
}

impl ChipGroup {
    fn new(label: &str, items: &[SkillCount], max_shown: usize) -> Self {
        let selection = select_chips(items, max_shown);
        let overflow_label = selection.overflow_label();
        Self {
            label: label.to_string(),
            total: items.len(),
            chips: selection
                .shown
                .into_iter()
                .map(|item| Chip {
                    title: chip_title(&item),
                    name: item.name,
                    count: item.count,
                })
                .collect(),
            hidden_count: selection.hidden_count,
            overflow_label,
            empty_message: None,
        }
    }
}

/// Groups for the compact candidate row.
///
/// Only advanced and intermediate tiers are shown. When neither has skills the
/// candidate's `primary_skills` are shown instead, each as a count-1 chip.
pub fn compact_view(
    buckets: &ProficiencyBuckets,
    primary_skills: &[String],
    max_shown: usize,
) -> Vec<ChipGroup> {
    let mut groups = Vec::new();
    for tier in [ProficiencyTier::Advanced, ProficiencyTier::Intermediate] {
        let items = buckets.tier(tier);
        if !items.is_empty() {
            groups.push(ChipGroup::new(tier.label(), items, max_shown));
        }
    }

    if groups.is_empty() {
        let fallback: Vec<SkillCount> = primary_skills
            .iter()
            .map(|s| SkillCount {
                name: s.clone(),
                count: 1,
            })
            .collect();
        groups.push(ChipGroup::new("Skills", &fallback, max_shown));
    }

    groups
}

/// Groups for the expanded candidate detail. Empty when no skill was derived
/// at all; otherwise all three tiers, with an empty-state message for any
/// tier that has no skills.
pub fn detail_view(buckets: &ProficiencyBuckets, max_shown: usize) -> Vec<ChipGroup> {
    if buckets.is_empty() {
        return Vec::new();
    }

    [
        ProficiencyTier::Advanced,
        ProficiencyTier::Intermediate,
        ProficiencyTier::Beginner,
    ]
    .into_iter()
    .map(|tier| {
        let items = buckets.tier(tier);
        let mut group = ChipGroup::new(tier.label(), items, max_shown);
        if items.is_empty() {
            group.empty_message = Some(tier.empty_message().to_string());
        }
        group
    })
    .collect()
}
