use qw_core::{QuestRecord, QuestType};
use rand::Rng;

use crate::config::PlayStyle;

/// The quest type a play style goes looking for first.
pub fn preferred_type(style: PlayStyle) -> Option<QuestType> {
    match style {
        PlayStyle::Aggressive => Some(QuestType::Combat),
        PlayStyle::Diplomatic => Some(QuestType::Dialogue),
        PlayStyle::Exploration => Some(QuestType::Exploration),
        PlayStyle::Balanced => None,
    }
}

/// Pick one of the available quests (indices into `quests`).
///
/// Styles with a preferred type take the first available quest of that type,
/// else the first available quest. Balanced play picks uniformly at random.
pub fn select_quest<R: Rng + ?Sized>(
    quests: &[QuestRecord],
    available: &[usize],
    style: PlayStyle,
    rng: &mut R,
) -> Option<usize> {
    if available.is_empty() {
        return None;
    }
    match preferred_type(style) {
        Some(wanted) => available
            .iter()
            .copied()
            .find(|&i| quests[i].quest_type == wanted)
            .or_else(|| available.first().copied()),
        None => Some(available[rng.random_range(0..available.len())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quests() -> Vec<QuestRecord> {
        vec![
            QuestRecord::new("talk", "Talk").with_type(QuestType::Dialogue),
            QuestRecord::new("fight", "Fight").with_type(QuestType::Combat),
            QuestRecord::new("roam", "Roam").with_type(QuestType::Exploration),
        ]
    }

    #[test]
    fn styles_prefer_their_type() {
        let quests = quests();
        let mut rng = StdRng::seed_from_u64(1);
        let all = [0, 1, 2];
        assert_eq!(select_quest(&quests, &all, PlayStyle::Aggressive, &mut rng), Some(1));
        assert_eq!(select_quest(&quests, &all, PlayStyle::Diplomatic, &mut rng), Some(0));
        assert_eq!(select_quest(&quests, &all, PlayStyle::Exploration, &mut rng), Some(2));
    }

    #[test]
    fn falls_back_to_first_available() {
        let quests = quests();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_quest(&quests, &[0, 2], PlayStyle::Aggressive, &mut rng),
            Some(0)
        );
    }

    #[test]
    fn balanced_stays_within_available() {
        let quests = quests();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let pick = select_quest(&quests, &[1, 2], PlayStyle::Balanced, &mut rng);
            assert!(matches!(pick, Some(1 | 2)));
        }
        assert_eq!(select_quest(&quests, &[], PlayStyle::Balanced, &mut rng), None);
    }
}
