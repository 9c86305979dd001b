use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::condition::ConditionRecord;
use crate::error::{QwError, QwResult};

/// Identifier of a persisted record (story arc, quest, dialogue, character).
///
/// Identifiers are assigned by the authoring backend and are opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Wrap any string-like value as a record identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The gameplay category of a quest. Drives play-style selection and
/// type-specific simulation effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    /// Fights and confrontations.
    Combat,
    /// Conversation-driven quests.
    Dialogue,
    /// Discovering places and secrets.
    Exploration,
    /// Retrieve an object.
    Fetch,
    /// Riddles and mechanisms.
    Puzzle,
    /// Protect someone on a journey.
    Escort,
    /// A major enemy encounter.
    Boss,
    /// Negotiation between parties.
    Diplomacy,
    /// Deception and broken trust.
    Betrayal,
    /// Any category not listed above.
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Combat => "combat",
            Self::Dialogue => "dialogue",
            Self::Exploration => "exploration",
            Self::Fetch => "fetch",
            Self::Puzzle => "puzzle",
            Self::Escort => "escort",
            Self::Boss => "boss",
            Self::Diplomacy => "diplomacy",
            Self::Betrayal => "betrayal",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Authored difficulty of a quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Introductory content.
    Easy,
    /// Standard content.
    #[default]
    #[serde(alias = "normal")]
    Medium,
    /// Demanding content.
    Hard,
    /// Climactic content.
    Epic,
}

impl Difficulty {
    /// Reward scaling factor: 1 for easy up to 4 for epic.
    pub fn multiplier(self) -> i64 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Epic => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Epic => "epic",
        };
        write!(f, "{s}")
    }
}

/// What a reward grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Experience points.
    Experience,
    /// Currency.
    Gold,
    /// An inventory item named by `value`. A negative amount removes it.
    Item,
    /// A boolean flag named by `value`.
    Flag,
    /// A player stat named by `value`.
    Stat,
    /// Standing with the faction named by `value`.
    Reputation,
}

/// A reward granted when a quest or outcome succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    /// The kind of reward.
    #[serde(rename = "type")]
    pub kind: RewardKind,
    /// Kind-specific payload: item name, flag key, stat or faction name.
    #[serde(default)]
    pub value: String,
    /// Magnitude of the reward.
    #[serde(default)]
    pub amount: f64,
}

impl Reward {
    /// Create a reward of the given kind.
    pub fn new(kind: RewardKind, value: impl Into<String>, amount: f64) -> Self {
        Self {
            kind,
            value: value.into(),
            amount,
        }
    }
}

/// The shape of a quest outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The quest goal is achieved.
    Success,
    /// The quest goal is lost.
    Failure,
    /// The goal is partly achieved.
    Partial,
    /// The story forks.
    Branch,
}

/// One declared outcome of a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Outcome identifier, when the backend assigns one.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// The outcome shape.
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    /// Player-facing summary of the outcome.
    #[serde(default)]
    pub description: String,
    /// Conditions that must hold for this outcome.
    #[serde(default)]
    pub conditions: Vec<ConditionRecord>,
    /// Rewards attached to this outcome.
    #[serde(default)]
    pub rewards: Vec<Reward>,
    /// The quest this outcome leads to.
    #[serde(default)]
    pub next_quest_id: Option<RecordId>,
    /// Authored likelihood in percent (0..=100).
    #[serde(default)]
    pub probability: f64,
}

impl OutcomeRecord {
    /// Create an outcome with a description and probability.
    pub fn new(kind: OutcomeKind, description: impl Into<String>, probability: f64) -> Self {
        Self {
            id: None,
            kind,
            description: description.into(),
            conditions: Vec::new(),
            rewards: Vec::new(),
            next_quest_id: None,
            probability,
        }
    }

    /// Point this outcome at a follow-up quest.
    pub fn leading_to(mut self, quest: impl Into<RecordId>) -> Self {
        self.next_quest_id = Some(quest.into());
        self
    }
}

/// A top-level narrative arc grouping quests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryArcRecord {
    /// Arc identifier.
    pub id: RecordId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Free-text summary.
    #[serde(default)]
    pub description: String,
}

impl StoryArcRecord {
    /// Create a story arc with a title.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
        }
    }
}

/// A quest as persisted by the authoring backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRecord {
    /// Quest identifier.
    pub id: RecordId,
    /// The story arc this quest belongs to.
    #[serde(default)]
    pub story_arc_id: Option<RecordId>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Player-facing description.
    #[serde(default)]
    pub description: String,
    /// Gameplay category.
    #[serde(rename = "type", default)]
    pub quest_type: QuestType,
    /// Authored difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Expected play time in minutes.
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    /// Where the quest takes place.
    #[serde(default)]
    pub location: Option<String>,
    /// Conditions gating the quest, including references to other quests.
    #[serde(default)]
    pub prerequisites: Vec<ConditionRecord>,
    /// Rewards for completing the quest.
    #[serde(default)]
    pub rewards: Vec<Reward>,
    /// Declared outcomes.
    #[serde(default)]
    pub outcomes: Vec<OutcomeRecord>,
}

/// Play time assumed for quests without an estimate.
pub const DEFAULT_QUEST_MINUTES: u32 = 30;

impl QuestRecord {
    /// Create a quest with a title and an empty body.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            story_arc_id: None,
            title: title.into(),
            description: String::new(),
            quest_type: QuestType::default(),
            difficulty: Difficulty::default(),
            estimated_duration: None,
            location: None,
            prerequisites: Vec::new(),
            rewards: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Attach the quest to a story arc.
    pub fn in_arc(mut self, arc: impl Into<RecordId>) -> Self {
        self.story_arc_id = Some(arc.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the quest type.
    pub fn with_type(mut self, quest_type: QuestType) -> Self {
        self.quest_type = quest_type;
        self
    }

    /// Require another quest to be completed first.
    pub fn requires(mut self, quest: impl Into<RecordId>) -> Self {
        self.prerequisites.push(ConditionRecord::quest_completed(quest));
        self
    }

    /// Add a declared outcome.
    pub fn with_outcome(mut self, outcome: OutcomeRecord) -> Self {
        self.outcomes.push(outcome);
        self
    }

    /// Expected play time in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.estimated_duration.unwrap_or(DEFAULT_QUEST_MINUTES)
    }

    /// Ids of the quests this quest declares as prerequisites.
    pub fn prerequisite_quests(&self) -> impl Iterator<Item = &str> {
        self.prerequisites
            .iter()
            .filter_map(ConditionRecord::referenced_quest)
    }

    /// Ids of the quests declared outcomes lead to.
    pub fn next_quests(&self) -> impl Iterator<Item = &RecordId> {
        self.outcomes
            .iter()
            .filter_map(|o| o.next_quest_id.as_ref())
    }
}

/// A dialogue node attached to a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueRecord {
    /// Dialogue identifier.
    pub id: RecordId,
    /// The quest this dialogue belongs to.
    #[serde(default)]
    pub quest_id: Option<RecordId>,
    /// The speaking character.
    #[serde(default)]
    pub character_id: Option<RecordId>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Spoken text.
    #[serde(default)]
    pub content: String,
    /// Conditions gating the dialogue line.
    #[serde(default)]
    pub conditions: Vec<ConditionRecord>,
}

impl DialogueRecord {
    /// Create a dialogue attached to a quest.
    pub fn new(
        id: impl Into<RecordId>,
        quest: impl Into<RecordId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            quest_id: Some(quest.into()),
            character_id: None,
            title: title.into(),
            content: String::new(),
            conditions: Vec::new(),
        }
    }
}

/// A character that can appear in quests and dialogues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Character identifier.
    pub id: RecordId,
    /// Display name, matched against quest text.
    pub name: String,
    /// The faction credited with reputation changes.
    #[serde(default)]
    pub faction: Option<String>,
    /// Personality descriptors such as "friendly" or "hostile".
    #[serde(default)]
    pub personality: Vec<String>,
}

impl CharacterRecord {
    /// Create a character with a name.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            faction: None,
            personality: Vec::new(),
        }
    }

    /// Set the character's faction.
    pub fn in_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = Some(faction.into());
        self
    }

    /// Add a personality descriptor.
    pub fn with_trait(mut self, t: impl Into<String>) -> Self {
        self.personality.push(t.into());
        self
    }

    /// Whether any personality descriptor mentions `word` (case-insensitive).
    pub fn has_trait(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.personality
            .iter()
            .any(|p| p.to_lowercase().contains(&word))
    }

    /// The reputation bucket this character's standing is credited to.
    /// Characters without a faction stand for themselves.
    pub fn faction_key(&self) -> &str {
        self.faction.as_deref().unwrap_or(&self.name)
    }
}

/// All narrative content of one project, as handed over by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Story arcs.
    #[serde(default)]
    pub story_arcs: Vec<StoryArcRecord>,
    /// Quests.
    #[serde(default)]
    pub quests: Vec<QuestRecord>,
    /// Dialogues.
    #[serde(default)]
    pub dialogues: Vec<DialogueRecord>,
    /// Characters.
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
}

impl Project {
    /// Parse a project document.
    pub fn from_json(json: &str) -> QwResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a project document from disk.
    pub fn load(path: &Path) -> QwResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| QwError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up a quest by id.
    pub fn quest(&self, id: &str) -> QwResult<&QuestRecord> {
        self.quests
            .iter()
            .find(|q| q.id.as_str() == id)
            .ok_or_else(|| QwError::QuestNotFound(RecordId::from(id)))
    }

    /// Look up a story arc by id.
    pub fn story_arc(&self, id: &str) -> QwResult<&StoryArcRecord> {
        self.story_arcs
            .iter()
            .find(|a| a.id.as_str() == id)
            .ok_or_else(|| QwError::StoryArcNotFound(RecordId::from(id)))
    }

    /// Look up a character by id.
    pub fn character(&self, id: &str) -> QwResult<&CharacterRecord> {
        self.characters
            .iter()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| QwError::CharacterNotFound(RecordId::from(id)))
    }

    /// Quests attached to the given story arc, in document order.
    pub fn quests_in_arc(&self, arc: &str) -> Vec<QuestRecord> {
        self.quests
            .iter()
            .filter(|q| q.story_arc_id.as_ref().is_some_and(|a| a.as_str() == arc))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_display_is_verbatim() {
        assert_eq!(RecordId::from("quest-1").to_string(), "quest-1");
    }

    #[test]
    fn quest_deserializes_from_backend_shape() {
        let json = r#"{
            "id": "q2",
            "title": "Follow-up Quest",
            "description": "A quest that requires the first one",
            "story_arc_id": "arc",
            "type": "puzzle",
            "difficulty": "medium",
            "estimated_duration": 30,
            "prerequisites": [
                {"quest_id": "q1", "type": "quest", "operator": "has", "value": "completed"}
            ],
            "rewards": [{"type": "experience", "value": "advanced", "amount": 200}],
            "outcomes": [{"type": "success", "description": "Quest completed", "probability": 100}]
        }"#;
        let quest: QuestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(quest.quest_type, QuestType::Puzzle);
        assert_eq!(quest.prerequisite_quests().collect::<Vec<_>>(), vec!["q1"]);
        assert_eq!(quest.rewards[0].kind, RewardKind::Experience);
        assert_eq!(quest.outcomes[0].kind, OutcomeKind::Success);
    }

    #[test]
    fn unknown_quest_type_maps_to_other() {
        let quest: QuestRecord =
            serde_json::from_str(r#"{"id": "q", "type": "heist"}"#).unwrap();
        assert_eq!(quest.quest_type, QuestType::Other);
        assert_eq!(quest.duration_minutes(), DEFAULT_QUEST_MINUTES);
    }

    #[test]
    fn normal_difficulty_is_medium() {
        let d: Difficulty = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(d, Difficulty::Medium);
        assert_eq!(Difficulty::Epic.multiplier(), 4);
    }

    #[test]
    fn character_traits_are_case_insensitive() {
        let c = CharacterRecord::new("c1", "Mira").with_trait("Very Friendly");
        assert!(c.has_trait("friendly"));
        assert!(!c.has_trait("hostile"));
        assert_eq!(c.faction_key(), "Mira");
    }

    #[test]
    fn project_lookups_report_not_found() {
        let project = Project::default();
        assert!(matches!(project.quest("nope"), Err(QwError::QuestNotFound(_))));
        assert!(matches!(
            project.story_arc("nope"),
            Err(QwError::StoryArcNotFound(_))
        ));
    }

    #[test]
    fn quests_in_arc_filters_by_arc() {
        let project = Project {
            quests: vec![
                QuestRecord::new("q1", "One").in_arc("a"),
                QuestRecord::new("q2", "Two").in_arc("b"),
                QuestRecord::new("q3", "Three"),
            ],
            ..Project::default()
        };
        let ids: Vec<_> = project
            .quests_in_arc("a")
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![RecordId::from("q1")]);
    }
}
