//! Reputation and alignment consequences of a resolved quest.

use std::collections::BTreeMap;

use qw_core::{CharacterRecord, QuestRecord, QuestType};

use crate::player::Alignment;

/// Reputation change per involved character before personality scaling.
pub const BASE_REPUTATION_CHANGE: f64 = 5.0;

/// Characters whose name appears in the quest title or description.
///
/// Matching is a case-insensitive substring search. Every other part of the
/// engine asks this function which characters a quest involves.
pub fn characters_mentioned<'a>(
    quest: &QuestRecord,
    characters: &'a [CharacterRecord],
) -> Vec<&'a CharacterRecord> {
    let text = format!("{} {}", quest.title, quest.description).to_lowercase();
    characters
        .iter()
        .filter(|c| !c.name.trim().is_empty() && text.contains(&c.name.to_lowercase()))
        .collect()
}

/// Reputation deltas per faction for completing a quest. Betrayals cost
/// standing, everything else earns it; friendly characters amplify the
/// change and hostile ones dampen it.
pub fn reputation_deltas(
    quest: &QuestRecord,
    characters: &[CharacterRecord],
) -> BTreeMap<String, i64> {
    let sign = if quest.quest_type == QuestType::Betrayal {
        -1.0
    } else {
        1.0
    };
    let mut deltas = BTreeMap::new();
    for character in characters_mentioned(quest, characters) {
        let mut change = BASE_REPUTATION_CHANGE * sign;
        if character.has_trait("friendly") {
            change *= 1.2;
        } else if character.has_trait("hostile") {
            change *= 0.8;
        }
        *deltas
            .entry(character.faction_key().to_string())
            .or_insert(0) += change.round() as i64;
    }
    deltas.retain(|_, d| *d != 0);
    deltas
}

fn any_choice(choices: &[String], words: &[&str]) -> bool {
    choices.iter().any(|c| {
        let c = c.to_lowercase();
        words.iter().any(|w| c.contains(w))
    })
}

/// Raw alignment delta for a quest type and the choices made, before
/// renormalization.
pub fn alignment_delta(quest_type: QuestType, choices: &[String]) -> Alignment {
    match quest_type {
        QuestType::Combat => {
            if any_choice(choices, &["defend", "protect"]) {
                Alignment::new(5, 0, 0)
            } else if any_choice(choices, &["attack", "kill"]) {
                Alignment::new(0, 0, 5)
            } else {
                Alignment::zero()
            }
        }
        QuestType::Dialogue => {
            let good = if any_choice(choices, &["help", "agree"]) { 3 } else { 0 };
            Alignment::new(good, 2, 0)
        }
        QuestType::Exploration => Alignment::new(0, 3, 0),
        _ => Alignment::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast() -> Vec<CharacterRecord> {
        vec![
            CharacterRecord::new("c1", "Mira")
                .in_faction("Harbor Guild")
                .with_trait("Friendly"),
            CharacterRecord::new("c2", "Old Brann").with_trait("hostile, gruff"),
            CharacterRecord::new("c3", "Nobody"),
        ]
    }

    #[test]
    fn mentions_are_case_insensitive() {
        let quest = QuestRecord::new("q", "Help mira").with_description("old brann is watching");
        let cast = cast();
        let names: Vec<_> = characters_mentioned(&quest, &cast)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mira", "Old Brann"]);
    }

    #[test]
    fn personality_scales_reputation() {
        let quest = QuestRecord::new("q", "Mira and Old Brann");
        let deltas = reputation_deltas(&quest, &cast());
        assert_eq!(deltas["Harbor Guild"], 6);
        assert_eq!(deltas["Old Brann"], 4);
        assert!(!deltas.contains_key("Nobody"));
    }

    #[test]
    fn betrayal_costs_reputation() {
        let quest = QuestRecord::new("q", "Sell out Mira").with_type(QuestType::Betrayal);
        assert_eq!(reputation_deltas(&quest, &cast())["Harbor Guild"], -6);
    }

    #[test]
    fn combat_alignment_follows_choices() {
        let attack = vec!["attack the enemy".to_string()];
        assert_eq!(alignment_delta(QuestType::Combat, &attack), Alignment::new(0, 0, 5));
        let both = vec!["attack the enemy".to_string(), "protect the innocent".to_string()];
        assert_eq!(alignment_delta(QuestType::Combat, &both), Alignment::new(5, 0, 0));
    }

    #[test]
    fn dialogue_and_exploration_alignment() {
        let agree = vec!["agree to help".to_string()];
        assert_eq!(alignment_delta(QuestType::Dialogue, &agree), Alignment::new(3, 2, 0));
        assert_eq!(alignment_delta(QuestType::Dialogue, &[]), Alignment::new(0, 2, 0));
        assert_eq!(alignment_delta(QuestType::Exploration, &[]), Alignment::new(0, 3, 0));
        assert!(alignment_delta(QuestType::Fetch, &agree).is_zero());
    }
}
