#![allow(clippy::cast_possible_truncation)]

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::{SokujiError, FIELD_SIZE, TEAM_SIZE};

/// Points for finishing positions 1..=12.
const SCORES: [i32; 12] = [15, 12, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// The finishing positions one team took in a single race.
///
/// Positions are unique, within 1..=12, and kept sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    data: Vec<u8>,
}

impl Rank {
    /// Builds a rank from raw positions, dropping anything outside 1..=12.
    pub fn from_positions(positions: impl IntoIterator<Item = u8>) -> Self {
        let mut data: Vec<u8> = positions
            .into_iter()
            .filter(|r| (1..=FIELD_SIZE).contains(r))
            .collect();
        data.sort_unstable();
        data.dedup();
        Self { data }
    }

    pub fn positions(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn score(&self) -> i32 {
        self.data.iter().map(|&r| SCORES[usize::from(r) - 1]).sum()
    }

    /// Completes `self` against the ranks already committed for the same
    /// race, so that together they partition the field.
    ///
    /// Positions already claimed by a sibling are dropped (siblings win
    /// ties). An overfull rank is cut to its six best positions. A short
    /// rank takes every unclaimed position when that closes the gap; when
    /// more positions remain unclaimed than the rank needs, the worst ones
    /// are taken first, so unexplained finishes land at the bottom of the
    /// field. Returns whether the rank ended up with exactly six entries.
    pub fn validate(&mut self, ranks: &[Self]) -> bool {
        let filled: BTreeSet<u8> = ranks
            .iter()
            .flat_map(|rank| rank.data.iter().copied())
            .collect();
        self.data.retain(|r| !filled.contains(r));
        if self.data.len() == TEAM_SIZE {
            return true;
        }
        if self.data.len() > TEAM_SIZE {
            self.data.sort_unstable();
            self.data.truncate(TEAM_SIZE);
            return true;
        }
        let mut unfilled: BTreeSet<u8> = (1..=FIELD_SIZE)
            .filter(|r| !filled.contains(r) && !self.data.contains(r))
            .collect();
        if unfilled.len() + self.data.len() <= TEAM_SIZE {
            self.data.extend(unfilled);
        } else {
            while self.data.len() < TEAM_SIZE {
                let Some(worst) = unfilled.pop_last() else { break };
                self.data.push(worst);
            }
        }
        self.data.sort_unstable();
        self.data.len() == TEAM_SIZE
    }

    /// Parses one whitespace-free shorthand token into positions.
    ///
    /// `0` is 10th, `+` is 11th, and the two-digit clusters starting with
    /// `1` are matched longest-first; a leading `12` means 1st and 2nd. A
    /// `-` continues a range from the previously placed position, filling
    /// everything strictly between it and the next token (or up to 12th
    /// when the text ends there). Anything else is read as a single hex
    /// digit; a non-hex character is a hard parse failure.
    ///
    /// A token containing a space yields no rank at all rather than an
    /// error.
    pub fn from_text(text: &str) -> Result<Option<Self>, SokujiError> {
        if text.contains(' ') {
            return Ok(None);
        }
        let mut placed: Vec<u8> = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let mut range_from = None;
            if let Some(stripped) = rest.strip_prefix('-') {
                range_from = Some(placed.last().copied().unwrap_or(0));
                rest = stripped;
            }
            let step = if rest.is_empty() {
                Vec::new()
            } else {
                let (step, stripped) = next_step(rest, placed.is_empty())?;
                rest = stripped;
                step
            };
            if let Some(from) = range_from {
                let to = step.first().copied().unwrap_or(FIELD_SIZE);
                placed.extend(from + 1..to);
                if step.is_empty() {
                    placed.push(FIELD_SIZE);
                }
            }
            placed.extend(step);
        }
        Ok(Some(Self::from_positions(placed)))
    }

    /// Splits `text` on whitespace and parses each token into a completed
    /// rank. Tokens that parse to nothing are dropped silently. When only
    /// one rank comes out, the opposing rank is synthesized as the
    /// complement of the field.
    pub fn get_ranks(text: &str, mut ranks: Vec<Self>) -> Result<Vec<Self>, SokujiError> {
        for token in text.split_whitespace() {
            let Some(mut rank) = Self::from_text(token)? else {
                continue;
            };
            if rank.is_empty() {
                continue;
            }
            if rank.validate(&ranks) {
                ranks.push(rank);
            }
        }
        if ranks.len() == 1 {
            let mut opponent = Self::default();
            if opponent.validate(&ranks) {
                ranks.push(opponent);
            }
        }
        Ok(ranks)
    }

    /// Maps full-width digits, hyphen, plus and space to ASCII. Returns
    /// `None` when anything else but `[0-9- +]` remains.
    pub fn validate_text(text: &str) -> Option<String> {
        let translated: String = text
            .chars()
            .map(|c| match c {
                '０'..='９' => (b'0' + (u32::from(c) - u32::from('０')) as u8) as char,
                'ー' => '-',
                '＋' => '+',
                '　' => ' ',
                _ => c,
            })
            .collect();
        translated
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '+'))
            .then_some(translated)
    }
}

/// One tokenizer step: the next 1-2 positions and the remaining text.
///
/// `nothing_placed` disambiguates a leading "12" (1st and 2nd) from a
/// 12th-place finish later in the token.
fn next_step(rest: &str, nothing_placed: bool) -> Result<(Vec<u8>, &str), SokujiError> {
    const PATTERNS: [(&str, &[u8]); 8] = [
        ("0", &[10]),
        ("+", &[11]),
        ("10", &[10]),
        ("110", &[1, 10]),
        ("1112", &[11, 12]),
        ("111", &[1, 11]),
        ("112", &[1, 12]),
        ("11", &[11]),
    ];
    for (pattern, positions) in PATTERNS {
        if let Some(stripped) = rest.strip_prefix(pattern) {
            return Ok((positions.to_vec(), stripped));
        }
    }
    if let Some(stripped) = rest.strip_prefix("12") {
        let positions = if nothing_placed { vec![1, 2] } else { vec![12] };
        return Ok((positions, stripped));
    }
    let Some(c) = rest.chars().next() else {
        return Err(SokujiError::InvalidRankInput);
    };
    match c.to_digit(16) {
        Some(value) => Ok((vec![value as u8], &rest[c.len_utf8()..])),
        None => Err(SokujiError::InvalidRankInput),
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for r in &self.data {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{r}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<u8> {
        Rank::from_text(text)
            .expect("token should parse")
            .expect("token should yield a rank")
            .positions()
            .to_vec()
    }

    #[test]
    fn single_digits_and_shorthand() {
        assert_eq!(parse("123456"), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(parse("0"), vec![10]);
        assert_eq!(parse("+"), vec![11]);
        assert_eq!(parse("10"), vec![10]);
        assert_eq!(parse("110"), vec![1, 10]);
        assert_eq!(parse("1112"), vec![11, 12]);
        assert_eq!(parse("111"), vec![1, 11]);
        assert_eq!(parse("112"), vec![1, 12]);
        assert_eq!(parse("11"), vec![11]);
    }

    #[test]
    fn leading_twelve_is_two_singles() {
        assert_eq!(parse("12"), vec![1, 2]);
        assert_eq!(parse("912"), vec![9, 12]);
    }

    #[test]
    fn hex_fallback() {
        assert_eq!(parse("abc"), vec![10, 11, 12]);
        assert_eq!(parse("110a12"), vec![1, 10, 12]);
        // d-f map beyond 12th and are dropped.
        assert_eq!(parse("1d"), vec![1]);
        assert_eq!(
            Rank::from_text("1x"),
            Err(SokujiError::InvalidRankInput)
        );
    }

    #[test]
    fn ranges_backfill_between_endpoints() {
        assert_eq!(parse("3-7"), vec![3, 4, 5, 6, 7]);
        assert_eq!(parse("1-5"), vec![1, 2, 3, 4, 5]);
        assert_eq!(parse("-5"), vec![1, 2, 3, 4, 5]);
        assert_eq!(parse("6-"), vec![6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(parse("-"), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        // Descending endpoints fill nothing.
        assert_eq!(parse("5-3"), vec![3, 5]);
        assert_eq!(
            Rank::from_text("1--3"),
            Err(SokujiError::InvalidRankInput)
        );
    }

    #[test]
    fn embedded_space_yields_no_rank() {
        assert_eq!(Rank::from_text("1 2").unwrap(), None);
    }

    #[test]
    fn duplicates_collapse_and_out_of_field_drops() {
        assert_eq!(parse("11+"), vec![11]);
        assert_eq!(parse("00"), vec![10]);
    }

    #[test]
    fn score_table() {
        let top = Rank::from_positions(1..=6);
        let bottom = Rank::from_positions(7..=12);
        assert_eq!(top.score(), 61);
        assert_eq!(bottom.score(), 21);
        assert_eq!(top.score() + bottom.score(), 82);
    }

    #[test]
    fn validation_completes_to_complement() {
        let committed = vec![Rank::from_positions(1..=6)];
        let mut rank = Rank::default();
        assert!(rank.validate(&committed));
        assert_eq!(rank.positions(), &[7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn validation_prefers_worst_positions_for_gaps() {
        // Three explicit picks, nine unclaimed: the shortfall comes from
        // the bottom of the field.
        let mut rank = Rank::from_positions([1, 2, 3]);
        assert!(rank.validate(&[]));
        assert_eq!(rank.positions(), &[1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn validation_truncates_overfull_ranks() {
        let mut rank = Rank::from_positions(1..=8);
        assert!(rank.validate(&[]));
        assert_eq!(rank.positions(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn validation_drops_positions_claimed_by_siblings() {
        let committed = vec![Rank::from_positions(1..=6)];
        let mut rank = Rank::from_positions([1, 2, 7]);
        assert!(rank.validate(&committed));
        assert_eq!(rank.positions(), &[7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn get_ranks_infers_the_opponent() {
        let ranks = Rank::get_ranks("1-5", Vec::new()).unwrap();
        assert_eq!(ranks.len(), 2);
        // The single missing pick is filled from the bottom of what the
        // explicit range left: position 6.
        assert_eq!(ranks[0].positions(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(ranks[1].positions(), &[7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn get_ranks_partitions_the_field() {
        let ranks = Rank::get_ranks("123456 789012", Vec::new()).unwrap();
        assert_eq!(ranks.len(), 2);
        let mut all: Vec<u8> = ranks
            .iter()
            .flat_map(|rank| rank.positions().iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn completed_ranks_stay_in_field_without_duplicates() {
        for text in ["1-5", "110a12", "93-7", "12+0", "abc12", "-"] {
            let ranks = Rank::get_ranks(text, Vec::new()).unwrap();
            for rank in &ranks {
                let positions = rank.positions();
                assert!(positions.iter().all(|r| (1..=12).contains(r)), "{text}");
                let unique: BTreeSet<u8> = positions.iter().copied().collect();
                assert_eq!(unique.len(), positions.len(), "{text}");
            }
        }
    }

    #[test]
    fn full_width_text_is_normalized() {
        assert_eq!(
            Rank::validate_text("１２３ー６　＋").as_deref(),
            Some("123-6 +")
        );
        assert_eq!(Rank::validate_text("123a"), None);
        assert_eq!(Rank::validate_text("what"), None);
    }
}
