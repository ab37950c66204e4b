#![allow(clippy::cast_possible_truncation)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    race::Race,
    rank::Rank,
    summary::{integers, Summary},
    track::Track,
    Lang, SokujiError, FIELD_SIZE, MAX_SWING, RACE_COUNT, TEAM_SIZE,
};

/// Live match state for one channel.
///
/// This is the value persisted in the store and re-derivable from the
/// rendered summary; nothing about the owning channel or message lives
/// here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mogi {
    pub races: Vec<Race>,
    pub tags: [String; 2],
    pub banner_users: BTreeSet<String>,
    pub penalty: [i32; 2],
    pub repick: [i32; 2],
    pub is_archive: bool,
    pub lang: Lang,
    pub loaded_track: Option<Track>,
}

impl Mogi {
    pub fn new(tags: [String; 2], lang: Lang) -> Self {
        Self {
            tags,
            lang,
            ..Self::default()
        }
    }

    /// Running totals per side: race scores plus penalty and repick.
    pub fn total(&self) -> [i32; 2] {
        let mut scores = [0, 0];
        for race in &self.races {
            let race_scores = race.scores();
            scores[0] += race_scores[0];
            scores[1] += race_scores[1];
        }
        scores[0] += self.penalty[0] + self.repick[0];
        scores[1] += self.penalty[1] + self.repick[1];
        scores
    }

    /// Race slots still to be played.
    pub fn left(&self) -> usize {
        RACE_COUNT - self.races.len()
    }

    /// Whether the lead can no longer be overturned by the remaining races.
    pub fn winning(&self) -> bool {
        let total = self.total();
        total[0] - total[1] > self.left() as i32 * MAX_SWING
    }

    pub fn score_line(scores: [i32; 2], compact: bool) -> String {
        if compact {
            format!("{} : {}", scores[0], scores[1])
        } else {
            format!("{} : {}({:+})", scores[0], scores[1], scores[0] - scores[1])
        }
    }

    fn ensure_live(&self) -> Result<(), SokujiError> {
        if self.is_archive {
            Err(SokujiError::MogiArchived)
        } else {
            Ok(())
        }
    }

    /// Records one race from shorthand text. `race_num` is a 1-based
    /// insertion slot; the race is appended when it is omitted. A pending
    /// loaded-track hint is consumed when no course is named explicitly.
    pub fn add_race(
        &mut self,
        rank_text: &str,
        track_name: Option<&str>,
        race_num: Option<usize>,
    ) -> Result<(), SokujiError> {
        self.ensure_live()?;
        if self.races.len() == RACE_COUNT {
            return Err(SokujiError::NotAddable);
        }
        let normalized = Rank::validate_text(rank_text).ok_or(SokujiError::InvalidRankInput)?;
        let track = match track_name {
            Some(name) => Track::from_nick(name),
            None => self.loaded_track,
        };
        let race = Race::from_text(&normalized, track)?;
        if !race.is_valid() {
            return Err(SokujiError::InvalidRankInput);
        }
        self.loaded_track = None;
        match race_num {
            Some(slot) => {
                if slot == 0 || slot > self.races.len() + 1 {
                    return Err(SokujiError::OutOfRange);
                }
                self.races.insert(slot - 1, race);
            }
            None => self.races.push(race),
        }
        Ok(())
    }

    /// Removes the race at the given 1-based slot, or the last one.
    pub fn back(&mut self, race_num: Option<usize>) -> Result<Race, SokujiError> {
        self.ensure_live()?;
        if self.races.is_empty() {
            return Err(SokujiError::NotBackable);
        }
        let index = match race_num {
            None => self.races.len() - 1,
            Some(slot) => {
                if slot == 0 || slot > self.races.len() {
                    return Err(SokujiError::OutOfRange);
                }
                slot - 1
            }
        };
        Ok(self.races.remove(index))
    }

    /// Replaces the race at the given 1-based slot (default: the last),
    /// keeping whichever of ranks/track is not supplied.
    pub fn edit_race(
        &mut self,
        race_num: Option<usize>,
        rank_text: Option<&str>,
        track_name: Option<&str>,
    ) -> Result<(), SokujiError> {
        self.ensure_live()?;
        let index = match race_num {
            None => self
                .races
                .len()
                .checked_sub(1)
                .ok_or(SokujiError::OutOfRange)?,
            Some(slot) => {
                if slot == 0 || slot > self.races.len() {
                    return Err(SokujiError::OutOfRange);
                }
                slot - 1
            }
        };
        let old = self.races[index].clone();
        let ranks = match rank_text {
            Some(text) => {
                let normalized =
                    Rank::validate_text(text).ok_or(SokujiError::InvalidRankInput)?;
                Rank::get_ranks(&normalized, Vec::new())?
            }
            None => old.ranks().to_vec(),
        };
        let race = Race::new(ranks, track_name.and_then(Track::from_nick).or(old.track));
        if !race.is_valid() {
            return Err(SokujiError::InvalidRankInput);
        }
        self.races[index] = race;
        Ok(())
    }

    /// Renders the state into its summary form. The summary is the user's
    /// view and, via [`Mogi::from_summary`], a complete backup of the
    /// state.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            title: format!(
                "{} 6v6\n{} - {}",
                self.lang.title_marker(),
                self.tags[0],
                self.tags[1]
            ),
            description: format!("`{} @{}`", Self::score_line(self.total(), false), self.left()),
            ..Summary::default()
        };
        for (i, race) in self.races.iter().enumerate() {
            let name = match race.track {
                Some(track) => format!("{} - {}", i + 1, track.nick(self.lang)),
                None => format!("{} ", i + 1),
            };
            let rank = race.ranks().first().map(ToString::to_string).unwrap_or_default();
            summary.push_field(
                name,
                format!("`{}`|`{}`", Self::score_line(race.scores(), false), rank),
            );
        }
        if self.penalty != [0, 0] {
            summary.push_field("Penalty", format!("`{}`", Self::score_line(self.penalty, true)));
        }
        if self.repick != [0, 0] {
            summary.push_field("Repick", format!("`{}`", Self::score_line(self.repick, true)));
        }
        if !self.banner_users.is_empty() {
            let users: Vec<String> = self.banner_users.iter().map(|u| format!("@{u}")).collect();
            summary.push_field("Members", format!("> {}", users.join(", ")));
        }
        if self.is_archive {
            summary.author_name = Some(self.lang.archive_marker().to_owned());
        }
        summary
    }

    /// Rebuilds a mogi from a rendered summary. Penalty and Repick field
    /// values are summed into the vectors, so a summary carrying several
    /// such fields cannot double anything that is absent.
    pub fn from_summary(summary: &Summary) -> Result<Self, SokujiError> {
        if !summary.is_sokuji() {
            return Err(SokujiError::InvalidMessage);
        }
        let tag_line = summary.title.split_once('\n').map_or("", |(_, rest)| rest);
        let (tag_a, tag_b) = tag_line.split_once(" - ").unwrap_or((tag_line, ""));
        let mut mogi = Self {
            tags: [tag_a.to_owned(), tag_b.to_owned()],
            lang: if summary.title.contains(Lang::Ja.title_marker()) {
                Lang::Ja
            } else {
                Lang::En
            },
            is_archive: summary
                .author_name
                .as_deref()
                .is_some_and(|name| Lang::ALL.iter().any(|lang| lang.archive_marker() == name)),
            ..Self::default()
        };
        for field in &summary.fields {
            let numbers = integers(&field.value);
            match field.name.as_str() {
                "Penalty" => {
                    mogi.penalty[0] += numbers.first().copied().unwrap_or(0) as i32;
                    mogi.penalty[1] += numbers.get(1).copied().unwrap_or(0) as i32;
                }
                "Repick" => {
                    mogi.repick[0] += numbers.first().copied().unwrap_or(0) as i32;
                    mogi.repick[1] += numbers.get(1).copied().unwrap_or(0) as i32;
                }
                "Members" => {
                    let list = field
                        .value
                        .split_once("> @")
                        .map_or(field.value.as_str(), |(_, rest)| rest);
                    mogi.banner_users = list.split(", @").map(str::to_owned).collect();
                }
                name => {
                    let track = name
                        .split_once('-')
                        .and_then(|(_, rest)| Track::from_nick(rest));
                    let team: Vec<u8> = numbers
                        .iter()
                        .rev()
                        .take(TEAM_SIZE)
                        .rev()
                        .filter_map(|&n| u8::try_from(n).ok())
                        .collect();
                    let rank_a = Rank::from_positions(team);
                    let rank_b = Rank::from_positions(
                        (1..=FIELD_SIZE).filter(|p| !rank_a.positions().contains(p)),
                    );
                    mogi.races.push(Race::new(vec![rank_a, rank_b], track));
                }
            }
        }
        Ok(mogi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mogi_with_races(count: usize) -> Mogi {
        let mut mogi = Mogi::new([String::from("AB"), String::from("XY")], Lang::En);
        for i in 0..count {
            let text = if i % 2 == 0 { "123456" } else { "1-5" };
            mogi.add_race(text, None, None).unwrap();
        }
        mogi
    }

    #[test]
    fn totals_include_adjustments() {
        let mut mogi = mogi_with_races(2);
        assert_eq!(mogi.total(), [122, 42]);
        mogi.penalty[1] = -15;
        mogi.repick[0] = -10;
        assert_eq!(mogi.total(), [112, 27]);
    }

    #[test]
    fn thirteenth_race_is_rejected() {
        let mut mogi = mogi_with_races(12);
        assert_eq!(
            mogi.add_race("123456", None, None),
            Err(SokujiError::NotAddable)
        );
    }

    #[test]
    fn back_on_empty_is_rejected() {
        let mut mogi = mogi_with_races(0);
        assert_eq!(mogi.back(None), Err(SokujiError::NotBackable));
    }

    #[test]
    fn out_of_bounds_slots_are_rejected() {
        let mut mogi = mogi_with_races(3);
        assert_eq!(
            mogi.add_race("123456", None, Some(0)),
            Err(SokujiError::OutOfRange)
        );
        assert_eq!(
            mogi.add_race("123456", None, Some(13)),
            Err(SokujiError::OutOfRange)
        );
        assert_eq!(mogi.back(Some(0)), Err(SokujiError::OutOfRange));
        assert_eq!(mogi.back(Some(4)), Err(SokujiError::OutOfRange));
    }

    #[test]
    fn back_right_after_add_restores_the_race_list() {
        let mut mogi = mogi_with_races(4);
        let before = mogi.races.clone();
        mogi.add_race("135790", None, None).unwrap();
        mogi.back(None).unwrap();
        assert_eq!(mogi.races, before);
    }

    #[test]
    fn insertion_slot_places_the_race() {
        let mut mogi = mogi_with_races(2);
        mogi.add_race("789012", None, Some(1)).unwrap();
        assert_eq!(mogi.races[0].scores(), [21, 61]);
        assert_eq!(mogi.races.len(), 3);
    }

    #[test]
    fn archived_mogi_rejects_mutation() {
        let mut mogi = mogi_with_races(1);
        mogi.is_archive = true;
        assert_eq!(
            mogi.add_race("123456", None, None),
            Err(SokujiError::MogiArchived)
        );
        assert_eq!(mogi.back(None), Err(SokujiError::MogiArchived));
    }

    #[test]
    fn loaded_track_hint_is_consumed_by_the_next_race() {
        let mut mogi = mogi_with_races(0);
        mogi.loaded_track = Track::from_nick("rMP");
        mogi.add_race("123456", None, None).unwrap();
        assert_eq!(mogi.races[0].track, Track::from_nick("rMP"));
        assert_eq!(mogi.loaded_track, None);
        mogi.add_race("123456", None, None).unwrap();
        assert_eq!(mogi.races[1].track, None);
    }

    #[test]
    fn explicit_track_overrides_the_hint() {
        let mut mogi = mogi_with_races(0);
        mogi.loaded_track = Track::from_nick("rMP");
        mogi.add_race("123456", Some("dBB"), None).unwrap();
        assert_eq!(mogi.races[0].track, Track::from_nick("dBB"));
    }

    #[test]
    fn edit_race_keeps_unsupplied_parts() {
        let mut mogi = mogi_with_races(2);
        mogi.edit_race(Some(1), Some("789012"), None).unwrap();
        assert_eq!(mogi.races[0].scores(), [21, 61]);
        mogi.edit_race(Some(1), None, Some("MKS")).unwrap();
        assert_eq!(mogi.races[0].scores(), [21, 61]);
        assert_eq!(mogi.races[0].track, Track::from_nick("MKS"));
    }

    #[test]
    fn win_is_projected_once_the_lead_is_safe() {
        // Eleven 41:41 ties leave one race and a 40-point maximum swing.
        let mut mogi = Mogi::new([String::from("AB"), String::from("XY")], Lang::En);
        for _ in 0..11 {
            mogi.add_race("14670c", None, None).unwrap();
        }
        assert_eq!(mogi.total(), [451, 451]);
        mogi.penalty[0] = 40;
        assert!(!mogi.winning());
        mogi.penalty[0] = 41;
        assert!(mogi.winning());
    }

    #[test]
    fn summaries_round_trip() {
        for count in [0, 1, 6, 12] {
            let mut mogi = mogi_with_races(count);
            mogi.penalty = [-15, 0];
            mogi.repick = [0, -30];
            mogi.banner_users =
                ["alice", "bob"].iter().map(|s| (*s).to_owned()).collect();
            if count >= 6 {
                mogi.races[2].track = Track::from_nick("rMMM");
                mogi.is_archive = true;
            }
            let recovered = Mogi::from_summary(&mogi.summary()).unwrap();
            assert_eq!(recovered, mogi, "race count {count}");
        }
    }

    #[test]
    fn plain_summary_round_trips_without_adjustments() {
        let mogi = mogi_with_races(3);
        let summary = mogi.summary();
        // No Penalty/Repick/Members fields are rendered when empty.
        assert_eq!(summary.fields.len(), 3);
        assert_eq!(Mogi::from_summary(&summary).unwrap(), mogi);
    }

    #[test]
    fn foreign_embeds_are_rejected() {
        let summary = Summary {
            title: String::from("Tracking output for channel"),
            ..Summary::default()
        };
        assert_eq!(
            Mogi::from_summary(&summary),
            Err(SokujiError::InvalidMessage)
        );
    }
}
