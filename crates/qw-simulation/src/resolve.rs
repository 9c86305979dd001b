//! Success roll, rewards, choices, and duration for one quest attempt.

use qw_core::{QuestRecord, QuestType, Reward, RewardKind};
use rand::Rng;

use crate::player::PlayerState;

/// Success chance before bonuses.
pub const BASE_SUCCESS_RATE: f64 = 0.7;

/// Experience granted per difficulty step when a quest declares no rewards.
pub const XP_PER_DIFFICULTY: i64 = 50;

/// Gold granted per difficulty step when a quest declares no rewards.
pub const GOLD_PER_DIFFICULTY: i64 = 25;

/// Shortest possible attempt, in seconds.
pub const MIN_DURATION_SECONDS: u64 = 60;

/// The outcome of one quest attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Whether the quest was completed.
    pub success: bool,
    /// The chance the roll was made against.
    pub chance: f64,
    /// Simulated seconds the attempt took.
    pub duration_seconds: u64,
    /// Flavor choices the player made.
    pub choices: Vec<String>,
    /// Rewards to apply; empty on failure.
    pub rewards: Vec<Reward>,
}

/// Chance of completing a quest in the player's current state.
pub fn success_chance(quest: &QuestRecord, player: &PlayerState) -> f64 {
    let mut chance = BASE_SUCCESS_RATE;
    if quest.quest_type == QuestType::Combat && player.stats.health > 80 {
        chance += 0.1;
    }
    if quest.quest_type == QuestType::Dialogue && player.stats.level > 3 {
        chance += 0.1;
    }
    chance.min(1.0)
}

/// Choices the player makes during a quest. They flavor alignment and never
/// change the success roll.
pub fn generate_choices(quest: &QuestRecord, player: &PlayerState) -> Vec<String> {
    let stats = &player.stats;
    let mut choices = Vec::new();
    match quest.quest_type {
        QuestType::Combat => {
            choices.push("attack the enemy".to_string());
            if stats.level >= 5 {
                choices.push("protect the innocent".to_string());
            }
        }
        QuestType::Dialogue => {
            choices.push("listen carefully".to_string());
            if stats.level > 2 {
                choices.push("agree to help".to_string());
            }
            if stats.gold < 50 {
                choices.push("negotiate payment".to_string());
            }
        }
        QuestType::Exploration => {
            choices.push("explore the surroundings".to_string());
            if stats.mana > 50 {
                choices.push("study the ruins".to_string());
            }
        }
        _ => {}
    }
    choices
}

/// Rewards for completing a quest: the declared ones, or difficulty-scaled
/// experience and gold when none are declared, plus a type bonus.
pub fn quest_rewards(quest: &QuestRecord) -> Vec<Reward> {
    let mut rewards = if quest.rewards.is_empty() {
        let scale = quest.difficulty.multiplier();
        vec![
            Reward::new(RewardKind::Experience, "quest", (XP_PER_DIFFICULTY * scale) as f64),
            Reward::new(RewardKind::Gold, "quest", (GOLD_PER_DIFFICULTY * scale) as f64),
        ]
    } else {
        quest.rewards.clone()
    };

    let id = &quest.id;
    match quest.quest_type {
        QuestType::Combat => {
            rewards.push(Reward::new(RewardKind::Item, format!("trophy_{id}"), 1.0));
        }
        QuestType::Exploration => {
            rewards.push(Reward::new(RewardKind::Item, format!("map_fragment_{id}"), 1.0));
            rewards.push(Reward::new(RewardKind::Flag, format!("explored_{id}"), 1.0));
        }
        QuestType::Dialogue => {
            rewards.push(Reward::new(RewardKind::Flag, format!("spoke_{id}"), 1.0));
        }
        _ => {}
    }
    rewards
}

/// Simulated play time of an attempt: the estimate scaled by a random
/// factor in `0.75..=1.25`, at least one minute.
pub fn attempt_duration<R: Rng + ?Sized>(quest: &QuestRecord, rng: &mut R) -> u64 {
    let base = f64::from(quest.duration_minutes()) * 60.0;
    let factor: f64 = rng.random_range(0.75..=1.25);
    ((base * factor).round() as u64).max(MIN_DURATION_SECONDS)
}

/// Resolve one attempt with a single success roll.
pub fn resolve<R: Rng + ?Sized>(
    quest: &QuestRecord,
    player: &PlayerState,
    rng: &mut R,
) -> Resolution {
    let chance = success_chance(quest, player);
    let success = rng.random_bool(chance);
    let duration_seconds = attempt_duration(quest, rng);
    Resolution {
        success,
        chance,
        duration_seconds,
        choices: generate_choices(quest, player),
        rewards: if success { quest_rewards(quest) } else { Vec::new() },
    }
}
