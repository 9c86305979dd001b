//! The simulated player and every mutation the engine applies to it.

use std::collections::{BTreeMap, BTreeSet};

use qw_core::{Condition, ConditionRecord, ConditionType, Operator, RecordId, Reward, RewardKind};
use serde::{Deserialize, Serialize};

/// Reputation is clamped to `-REPUTATION_LIMIT..=REPUTATION_LIMIT`.
pub const REPUTATION_LIMIT: i64 = 100;

/// Health and mana never exceed this.
pub const RESOURCE_CAP: i64 = 100;

/// Experience needed per level.
pub const XP_PER_LEVEL: i64 = 100;

/// Core numeric stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Hit points.
    pub health: i64,
    /// Magic points.
    pub mana: i64,
    /// Total experience.
    pub experience: i64,
    /// Level derived from experience.
    pub level: i64,
    /// Currency.
    pub gold: i64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: 100,
            mana: 100,
            experience: 0,
            level: 1,
            gold: 50,
        }
    }
}

impl Stats {
    /// Look up a stat by name.
    pub fn get(&self, name: &str) -> Option<i64> {
        match name.trim().to_lowercase().as_str() {
            "health" | "hp" => Some(self.health),
            "mana" | "mp" => Some(self.mana),
            "experience" | "xp" => Some(self.experience),
            "level" => Some(self.level),
            "gold" => Some(self.gold),
            _ => None,
        }
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut i64> {
        match name.trim().to_lowercase().as_str() {
            "health" | "hp" => Some(&mut self.health),
            "mana" | "mp" => Some(&mut self.mana),
            "experience" | "xp" => Some(&mut self.experience),
            "level" => Some(&mut self.level),
            "gold" => Some(&mut self.gold),
            _ => None,
        }
    }
}

/// The good/neutral/evil split of the player's choices. Always sums to 100
/// once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// Good share.
    pub good: i64,
    /// Neutral share.
    pub neutral: i64,
    /// Evil share.
    pub evil: i64,
}

impl Default for Alignment {
    fn default() -> Self {
        Self {
            good: 0,
            neutral: 100,
            evil: 0,
        }
    }
}

impl Alignment {
    /// A triple of raw values, not normalized.
    pub fn new(good: i64, neutral: i64, evil: i64) -> Self {
        Self { good, neutral, evil }
    }

    /// No change in any component.
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Sum of the components.
    pub fn total(&self) -> i64 {
        self.good.saturating_add(self.neutral).saturating_add(self.evil)
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.good == 0 && self.neutral == 0 && self.evil == 0
    }

    /// Add a delta component-wise.
    pub fn add(&mut self, delta: Alignment) {
        self.good = self.good.saturating_add(delta.good);
        self.neutral = self.neutral.saturating_add(delta.neutral);
        self.evil = self.evil.saturating_add(delta.evil);
    }

    /// Component-wise `self - other`.
    pub fn diff(&self, other: &Alignment) -> Alignment {
        Alignment::new(
            self.good.saturating_sub(other.good),
            self.neutral.saturating_sub(other.neutral),
            self.evil.saturating_sub(other.evil),
        )
    }

    /// Scale proportionally so the components sum to exactly 100. Good and
    /// neutral are rounded down and evil takes the remainder. Negative
    /// components count as zero; an all-zero triple resets to neutral.
    pub fn renormalize(&mut self) {
        let good = i128::from(self.good.max(0));
        let neutral = i128::from(self.neutral.max(0));
        let evil = i128::from(self.evil.max(0));
        let total = good + neutral + evil;
        if total == 0 {
            *self = Self::default();
            return;
        }
        // Each share is at most 100, so the narrowing casts are exact.
        self.good = (good * 100 / total) as i64;
        self.neutral = (neutral * 100 / total) as i64;
        self.evil = 100 - self.good - self.neutral;
    }
}

/// Lifecycle of a quest within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Not yet attempted.
    #[default]
    NotStarted,
    /// Being played.
    InProgress,
    /// Finished successfully. Terminal.
    Completed,
    /// Finished unsuccessfully. Terminal.
    Failed,
}

impl QuestStatus {
    /// Whether the quest can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Per-quest progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    /// Lifecycle state.
    pub status: QuestStatus,
    /// Completion percentage.
    pub progress: u8,
    /// Named objectives and whether they are met.
    #[serde(default)]
    pub objectives: BTreeMap<String, bool>,
}

/// Partial player state supplied by the caller. Missing fields keep their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOverrides {
    /// Stat overrides.
    pub stats: StatOverrides,
    /// Starting reputation per faction.
    pub reputation: BTreeMap<String, i64>,
    /// Starting alignment.
    pub alignment: Option<Alignment>,
    /// Starting inventory.
    pub inventory: Vec<String>,
    /// Starting flags.
    pub flags: BTreeMap<String, bool>,
    /// Starting location.
    pub current_location: Option<String>,
}

/// Individual stat overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatOverrides {
    /// Hit points.
    pub health: Option<i64>,
    /// Magic points.
    pub mana: Option<i64>,
    /// Experience.
    pub experience: Option<i64>,
    /// Level.
    pub level: Option<i64>,
    /// Currency.
    pub gold: Option<i64>,
}

/// What applying a reward changed.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardEffect {
    /// A stat moved by `delta`.
    Stat {
        /// Stat name.
        name: String,
        /// Signed change.
        delta: i64,
    },
    /// An item was added.
    ItemGained(String),
    /// An item was removed.
    ItemLost(String),
    /// A flag was set to a value.
    Flag(String, bool),
    /// A faction's standing moved by `delta` after clamping.
    Reputation {
        /// Faction name.
        faction: String,
        /// Signed change actually applied.
        delta: i64,
    },
}

/// The full state of the simulated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Numeric stats.
    pub stats: Stats,
    /// Standing per faction, each within ±100.
    pub reputation: BTreeMap<String, i64>,
    /// Moral trajectory, summing to 100.
    pub alignment: Alignment,
    /// Carried items.
    pub inventory: BTreeSet<String>,
    /// Story flags.
    pub flags: BTreeMap<String, bool>,
    /// Progress per quest.
    pub quest_progress: BTreeMap<RecordId, QuestProgress>,
    /// Where the player is.
    pub current_location: String,
    /// The quest being played.
    pub current_quest: Option<RecordId>,
    /// The dialogue being played.
    pub current_dialogue: Option<RecordId>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            stats: Stats::default(),
            reputation: BTreeMap::new(),
            alignment: Alignment::default(),
            inventory: BTreeSet::new(),
            flags: BTreeMap::new(),
            quest_progress: BTreeMap::new(),
            current_location: "start".to_string(),
            current_quest: None,
            current_dialogue: None,
        }
    }
}

impl PlayerState {
    /// Defaults merged with caller overrides, normalized.
    pub fn with_overrides(overrides: &PlayerOverrides) -> Self {
        let mut state = Self::default();
        let o = &overrides.stats;
        if let Some(v) = o.health {
            state.stats.health = v;
        }
        if let Some(v) = o.mana {
            state.stats.mana = v;
        }
        if let Some(v) = o.experience {
            state.stats.experience = v;
        }
        if let Some(v) = o.level {
            state.stats.level = v;
        }
        if let Some(v) = o.gold {
            state.stats.gold = v;
        }
        for (faction, &value) in &overrides.reputation {
            state
                .reputation
                .insert(faction.clone(), value.clamp(-REPUTATION_LIMIT, REPUTATION_LIMIT));
        }
        if let Some(alignment) = overrides.alignment {
            state.alignment = alignment;
            state.alignment.renormalize();
        }
        state.inventory.extend(overrides.inventory.iter().cloned());
        state
            .flags
            .extend(overrides.flags.iter().map(|(k, v)| (k.clone(), *v)));
        if let Some(location) = &overrides.current_location {
            state.current_location = location.clone();
        }
        state
    }

    // -----------------------------------------------------------------------
    // Quests
    // -----------------------------------------------------------------------

    /// Status of a quest; unknown quests are not started.
    pub fn status(&self, quest: &str) -> QuestStatus {
        self.quest_progress
            .get(quest)
            .map(|p| p.status)
            .unwrap_or_default()
    }

    /// Move a quest to a new status.
    pub fn set_status(&mut self, quest: &RecordId, status: QuestStatus) {
        let entry = self.quest_progress.entry(quest.clone()).or_default();
        entry.status = status;
        entry.progress = match status {
            QuestStatus::NotStarted => 0,
            QuestStatus::InProgress => entry.progress,
            QuestStatus::Completed | QuestStatus::Failed => 100,
        };
    }

    // -----------------------------------------------------------------------
    // Conditions
    // -----------------------------------------------------------------------

    /// Whether a persisted condition holds, honoring its operator. Used to
    /// gate dialogue lines. Conditions outside the grammar never hold.
    pub fn meets(&self, record: &ConditionRecord) -> bool {
        Condition::parse(record).is_ok_and(|c| self.satisfies(&c))
    }

    /// Whether a quest prerequisite holds. The rule depends on the type
    /// alone and the operator is ignored:
    ///
    /// - `quest`: the quest is completed,
    /// - `stat`: the stat is at least the value,
    /// - `flag`: the flag is set and equals the value,
    /// - `reputation`: the standing is at least the value,
    /// - `inventory`: the item is held.
    ///
    /// Prerequisites outside the grammar never hold.
    pub fn meets_prerequisite(&self, record: &ConditionRecord) -> bool {
        let Ok(condition) = Condition::parse(record) else {
            return false;
        };
        let target = condition.target.as_str();
        match condition.kind {
            ConditionType::Quest => self.status(target) == QuestStatus::Completed,
            ConditionType::Stat => match (self.stats.get(target), condition.value.as_f64()) {
                (Some(stat), Some(v)) => stat as f64 >= v,
                _ => false,
            },
            ConditionType::Flag => {
                let expected = condition.value.as_bool().unwrap_or(true);
                self.flags.get(target) == Some(&expected)
            }
            ConditionType::Reputation => {
                let standing = self.reputation.get(target).copied().unwrap_or(0);
                condition
                    .value
                    .as_f64()
                    .is_some_and(|v| standing as f64 >= v)
            }
            ConditionType::Inventory => self.inventory.contains(target),
        }
    }

    /// Whether a parsed condition holds for this player.
    pub fn satisfies(&self, condition: &Condition) -> bool {
        let op = condition.operator;
        let target = condition.target.as_str();
        match condition.kind {
            ConditionType::Quest => {
                let expected = condition.value.as_bool().unwrap_or(true);
                let completed = self.status(target) == QuestStatus::Completed;
                present_check(op, completed, expected)
            }
            ConditionType::Flag => {
                let expected = condition.value.as_bool().unwrap_or(true);
                let set = self.flags.get(target).copied().unwrap_or(false);
                present_check(op, set, expected)
            }
            ConditionType::Inventory => {
                let held = self.inventory.contains(target);
                if op.is_membership() || condition.value.as_f64().is_none() {
                    let expected = condition.value.as_bool().unwrap_or(true);
                    present_check(op, held, expected)
                } else {
                    let count = if held { 1.0 } else { 0.0 };
                    condition.value.as_f64().is_some_and(|v| op.compare(count, v))
                }
            }
            ConditionType::Stat => match (self.stats.get(target), condition.value.as_f64()) {
                (Some(stat), Some(v)) => op.compare(stat as f64, v),
                _ => false,
            },
            ConditionType::Reputation => {
                let standing = self.reputation.get(target).copied().unwrap_or(0);
                condition
                    .value
                    .as_f64()
                    .is_some_and(|v| op.compare(standing as f64, v))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Apply one reward.
    pub fn apply_reward(&mut self, reward: &Reward) -> Option<RewardEffect> {
        let amount = reward.amount.round() as i64;
        match reward.kind {
            RewardKind::Experience => self.add_stat("experience", amount),
            RewardKind::Gold => self.add_stat("gold", amount),
            RewardKind::Stat => self.add_stat(&reward.value, amount),
            RewardKind::Item => {
                if reward.amount < 0.0 {
                    self.inventory
                        .remove(&reward.value)
                        .then(|| RewardEffect::ItemLost(reward.value.clone()))
                } else {
                    self.inventory
                        .insert(reward.value.clone())
                        .then(|| RewardEffect::ItemGained(reward.value.clone()))
                }
            }
            RewardKind::Flag => {
                let value = reward.amount >= 0.0;
                self.flags.insert(reward.value.clone(), value);
                Some(RewardEffect::Flag(reward.value.clone(), value))
            }
            RewardKind::Reputation => {
                let delta = self.adjust_reputation(&reward.value, amount);
                (delta != 0).then(|| RewardEffect::Reputation {
                    faction: reward.value.clone(),
                    delta,
                })
            }
        }
    }

    fn add_stat(&mut self, name: &str, delta: i64) -> Option<RewardEffect> {
        if delta == 0 {
            return None;
        }
        let stat = self.stats.get_mut(name)?;
        *stat = stat.saturating_add(delta);
        Some(RewardEffect::Stat {
            name: name.to_lowercase(),
            delta,
        })
    }

    /// Shift a faction's standing, clamped to ±100. Returns the change
    /// actually applied.
    pub fn adjust_reputation(&mut self, faction: &str, delta: i64) -> i64 {
        let entry = self.reputation.entry(faction.to_string()).or_insert(0);
        let before = *entry;
        *entry = before
            .saturating_add(delta)
            .clamp(-REPUTATION_LIMIT, REPUTATION_LIMIT);
        *entry - before
    }

    /// Apply an alignment delta and renormalize.
    pub fn shift_alignment(&mut self, delta: Alignment) {
        self.alignment.add(delta);
        self.alignment.renormalize();
    }

    /// Recompute the level from experience. On level-up health and mana
    /// recover by 10, capped. Returns `(old, new)` when the level rose.
    pub fn update_level(&mut self) -> Option<(i64, i64)> {
        let old = self.stats.level;
        let new = (self.stats.experience / XP_PER_LEVEL + 1).max(1);
        if new <= old {
            return None;
        }
        self.stats.level = new;
        self.stats.health = self.stats.health.saturating_add(10).min(RESOURCE_CAP);
        self.stats.mana = self.stats.mana.saturating_add(10).min(RESOURCE_CAP);
        Some((old, new))
    }
}

/// Membership-style evaluation shared by quest, flag, and inventory checks.
fn present_check(op: Operator, actual: bool, expected: bool) -> bool {
    match op {
        Operator::Has | Operator::Eq => actual == expected,
        Operator::NotHas | Operator::Ne => actual != expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qw_core::ConditionValue;

    #[test]
    fn defaults() {
        let state = PlayerState::default();
        assert_eq!(state.stats.health, 100);
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.stats.gold, 50);
        assert_eq!(state.alignment.total(), 100);
        assert_eq!(state.current_location, "start");
    }

    #[test]
    fn overrides_merge_and_normalize() {
        let overrides = PlayerOverrides {
            stats: StatOverrides {
                level: Some(5),
                ..StatOverrides::default()
            },
            reputation: BTreeMap::from([("guild".to_string(), 250)]),
            alignment: Some(Alignment::new(1, 1, 2)),
            inventory: vec!["rope".into()],
            ..PlayerOverrides::default()
        };
        let state = PlayerState::with_overrides(&overrides);
        assert_eq!(state.stats.level, 5);
        assert_eq!(state.stats.health, 100);
        assert_eq!(state.reputation["guild"], 100);
        assert_eq!(state.alignment, Alignment::new(25, 25, 50));
        assert!(state.inventory.contains("rope"));
    }

    #[test]
    fn overrides_parse_from_partial_json() {
        let overrides: PlayerOverrides =
            serde_json::from_str(r#"{"stats": {"gold": 5}, "flags": {"met_king": true}}"#).unwrap();
        let state = PlayerState::with_overrides(&overrides);
        assert_eq!(state.stats.gold, 5);
        assert_eq!(state.stats.mana, 100);
        assert_eq!(state.flags.get("met_king"), Some(&true));
    }

    #[test]
    fn renormalize_gives_remainder_to_evil() {
        let mut a = Alignment::new(1, 1, 1);
        a.renormalize();
        assert_eq!(a, Alignment::new(33, 33, 34));

        let mut a = Alignment::new(0, 0, 0);
        a.renormalize();
        assert_eq!(a, Alignment::default());
    }

    #[test]
    fn conditions_by_type() {
        let mut state = PlayerState::default();
        state.set_status(&RecordId::from("q1"), QuestStatus::Completed);
        state.flags.insert("door_open".into(), true);
        state.inventory.insert("key".into());
        state.reputation.insert("guild".into(), 20);

        assert!(state.meets(&ConditionRecord::quest_completed("q1")));
        assert!(!state.meets(&ConditionRecord::quest_completed("q2")));
        assert!(state.meets(&ConditionRecord::new(
            "stat",
            "gte",
            "gold",
            ConditionValue::Number(50.0)
        )));
        assert!(!state.meets(&ConditionRecord::new(
            "stat",
            "gt",
            "level",
            ConditionValue::Number(1.0)
        )));
        assert!(state.meets(&ConditionRecord::new(
            "flag",
            "eq",
            "door_open",
            ConditionValue::Bool(true)
        )));
        assert!(state.meets(&ConditionRecord::new(
            "inventory",
            "has",
            "key",
            ConditionValue::Bool(true)
        )));
        assert!(state.meets(&ConditionRecord::new(
            "item",
            "not_has",
            "sword",
            ConditionValue::Bool(true)
        )));
        assert!(state.meets(&ConditionRecord::new(
            "reputation",
            "gte",
            "guild",
            ConditionValue::Number(10.0)
        )));
        assert!(!state.meets(&ConditionRecord::new(
            "stat",
            "has",
            "gold",
            ConditionValue::Number(1.0)
        )));
    }

    #[test]
    fn prerequisites_follow_type_rules() {
        let mut state = PlayerState::default();
        state.flags.insert("door_open".into(), true);
        state.reputation.insert("guild".into(), 20);

        // Stats and reputation are "at least", whatever the operator says.
        assert!(state.meets_prerequisite(&ConditionRecord::new(
            "stat",
            "gt",
            "level",
            ConditionValue::Number(1.0)
        )));
        assert!(state.meets_prerequisite(&ConditionRecord::new(
            "stat",
            "lt",
            "gold",
            ConditionValue::Number(10.0)
        )));
        assert!(!state.meets_prerequisite(&ConditionRecord::new(
            "stat",
            "lte",
            "level",
            ConditionValue::Number(2.0)
        )));
        assert!(state.meets_prerequisite(&ConditionRecord::new(
            "reputation",
            "lt",
            "guild",
            ConditionValue::Number(20.0)
        )));
        assert!(!state.meets_prerequisite(&ConditionRecord::new(
            "reputation",
            "gte",
            "guild",
            ConditionValue::Number(21.0)
        )));

        // A quest prerequisite always needs the quest completed.
        let not_has = ConditionRecord {
            operator: Some("not_has".into()),
            ..ConditionRecord::quest_completed("q1")
        };
        assert!(!state.meets_prerequisite(&not_has));
        state.set_status(&RecordId::from("q1"), QuestStatus::Failed);
        assert!(!state.meets_prerequisite(&ConditionRecord::quest_completed("q1")));
        state.set_status(&RecordId::from("q1"), QuestStatus::Completed);
        assert!(state.meets_prerequisite(&not_has));

        // Flags compare against the value; an unset flag matches nothing.
        assert!(state.meets_prerequisite(&ConditionRecord::new(
            "flag",
            "ne",
            "door_open",
            ConditionValue::Bool(true)
        )));
        assert!(!state.meets_prerequisite(&ConditionRecord::new(
            "flag",
            "eq",
            "door_open",
            ConditionValue::Bool(false)
        )));
        assert!(!state.meets_prerequisite(&ConditionRecord::new(
            "flag",
            "eq",
            "bridge_down",
            ConditionValue::Bool(false)
        )));

        // Outside the grammar.
        assert!(!state.meets_prerequisite(&ConditionRecord::new(
            "weather",
            "eq",
            "rain",
            ConditionValue::Bool(true)
        )));
    }

    #[test]
    fn huge_values_saturate() {
        let overrides = PlayerOverrides {
            stats: StatOverrides {
                gold: Some(i64::MAX - 5),
                health: Some(i64::MAX),
                ..StatOverrides::default()
            },
            reputation: BTreeMap::from([("guild".to_string(), i64::MAX)]),
            alignment: Some(Alignment::new(i64::MAX, i64::MAX, 1)),
            ..PlayerOverrides::default()
        };
        let mut state = PlayerState::with_overrides(&overrides);
        assert_eq!(state.reputation["guild"], REPUTATION_LIMIT);
        assert_eq!(state.alignment.total(), 100);
        assert_eq!(state.alignment.good, 49);

        state.apply_reward(&Reward::new(RewardKind::Gold, "", 1e30));
        assert_eq!(state.stats.gold, i64::MAX);
        assert_eq!(state.adjust_reputation("guild", i64::MAX), 0);
        assert_eq!(state.adjust_reputation("guild", i64::MIN), -200);

        state.shift_alignment(Alignment::new(i64::MAX, 0, i64::MIN));
        assert_eq!(state.alignment.total(), 100);

        state.stats.experience = i64::MAX;
        assert!(state.update_level().is_some());
        assert_eq!(state.stats.health, RESOURCE_CAP);
    }

    #[test]
    fn item_rewards_add_and_remove() {
        let mut state = PlayerState::default();
        let gained = state.apply_reward(&Reward::new(RewardKind::Item, "lantern", 1.0));
        assert_eq!(gained, Some(RewardEffect::ItemGained("lantern".into())));
        let lost = state.apply_reward(&Reward::new(RewardKind::Item, "lantern", -1.0));
        assert_eq!(lost, Some(RewardEffect::ItemLost("lantern".into())));
        assert!(state.inventory.is_empty());
        assert_eq!(state.apply_reward(&Reward::new(RewardKind::Item, "lantern", -1.0)), None);
    }

    #[test]
    fn level_up_recovers_capped() {
        let mut state = PlayerState::default();
        state.stats.health = 95;
        state.stats.mana = 40;
        state.apply_reward(&Reward::new(RewardKind::Experience, "", 250.0));
        assert_eq!(state.update_level(), Some((1, 3)));
        assert_eq!(state.stats.health, 100);
        assert_eq!(state.stats.mana, 50);
        assert_eq!(state.update_level(), None);
    }

    proptest! {
        #[test]
        fn reputation_stays_clamped(deltas in prop::collection::vec(-400i64..400, 1..40)) {
            let mut state = PlayerState::default();
            for delta in deltas {
                state.adjust_reputation("guild", delta);
                let value = state.reputation["guild"];
                prop_assert!((-REPUTATION_LIMIT..=REPUTATION_LIMIT).contains(&value));
            }
        }

        #[test]
        fn alignment_always_sums_to_100(
            steps in prop::collection::vec((-20i64..20, -20i64..20, -20i64..20), 1..30),
        ) {
            let mut state = PlayerState::default();
            for (g, n, e) in steps {
                state.shift_alignment(Alignment::new(g, n, e));
                let a = state.alignment;
                prop_assert_eq!(a.total(), 100);
                prop_assert!(a.good >= 0 && a.neutral >= 0 && a.evil >= 0);
            }
        }
    }
}
