use serde::{Deserialize, Serialize};

use super::{rank::Rank, track::Track, SokujiError};

/// One 12-position race: the two teams' ranks plus the course it ran on,
/// when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    ranks: Vec<Rank>,
    pub track: Option<Track>,
}

impl Race {
    pub fn new(ranks: Vec<Rank>, track: Option<Track>) -> Self {
        Self { ranks, track }
    }

    pub fn from_text(text: &str, track: Option<Track>) -> Result<Self, SokujiError> {
        Ok(Self::new(Rank::get_ranks(text, Vec::new())?, track))
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn is_valid(&self) -> bool {
        self.ranks.len() == 2
    }

    pub fn scores(&self) -> [i32; 2] {
        [
            self.ranks.first().map_or(0, Rank::score),
            self.ranks.get(1).map_or(0, Rank::score),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_race_partitions_the_field() {
        let race = Race::from_text("123456", None).unwrap();
        assert!(race.is_valid());
        let mut all: Vec<u8> = race
            .ranks()
            .iter()
            .flat_map(|rank| rank.positions().iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=12).collect::<Vec<u8>>());
        assert_eq!(race.scores(), [61, 21]);
    }

    #[test]
    fn scores_always_sum_to_the_full_pot() {
        for text in ["135790", "1-6", "26+", "110a12"] {
            let race = Race::from_text(text, None).unwrap();
            let [a, b] = race.scores();
            assert_eq!(a + b, 82, "{text}");
        }
    }

    #[test]
    fn lone_rank_is_not_a_valid_race() {
        let race = Race::new(vec![Rank::from_positions(1..=6)], None);
        assert!(!race.is_valid());
    }
}
