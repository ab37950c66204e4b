use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod mogi;
pub mod race;
pub mod rank;
pub mod result_card;
pub mod session;
pub mod summary;
pub mod track;
pub mod viewer;

pub use mogi::Mogi;
pub use track::Track;

/// Finishing positions handed out per race.
pub const FIELD_SIZE: u8 = 12;
/// Positions one team takes in a 6v6 war.
pub const TEAM_SIZE: usize = 6;
/// Races in a full mogi.
pub const RACE_COUNT: usize = 12;
/// Largest score swing a single race can produce (61 - 21).
pub const MAX_SWING: i32 = 40;

/// Everything that can go wrong while scoring. All of these surface to the
/// user through the command boundary; the passive listener swallows them,
/// since most chat lines are not race results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SokujiError {
    /// Shorthand text failed to parse or did not produce a valid rank pair.
    #[error("Invalid rank input.")]
    InvalidRankInput,
    /// The mogi already has its full 12 races.
    #[error("This sokuji has already finished.")]
    NotAddable,
    /// There is no race left to remove.
    #[error("You cannot go back anymore.")]
    NotBackable,
    /// A race slot outside the current bounds was requested.
    #[error("Invalid race number.")]
    OutOfRange,
    /// No live mogi could be recovered for this channel.
    #[error("Mogi not found")]
    MogiNotFound,
    /// A mogi was recovered but it is archived.
    #[error("This sokuji has already finished.")]
    MogiArchived,
    /// The nominated message is not a sokuji summary.
    #[error("Invalid message.")]
    InvalidMessage,
}

impl SokujiError {
    fn message_ja(self) -> &'static str {
        match self {
            Self::InvalidRankInput => "順位の入力が不正です。",
            Self::NotAddable => "既に12レース終了しています。",
            Self::NotBackable => "レースを戻すことができません。",
            Self::OutOfRange => "存在しないレース番号です。",
            Self::MogiNotFound => "実施している即時が見つかりません。",
            Self::MogiArchived => "この即時は既に終了しています。",
            Self::InvalidMessage => "メッセージが不正です。",
        }
    }

    /// Both languages stacked, the form user-facing failures are shown in.
    pub fn bilingual(self) -> String {
        format!("{}\n{}", self.message_ja(), self)
    }
}

/// Display language of one mogi, recovered from which title variant the
/// summary carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

impl Lang {
    pub const ALL: [Self; 2] = [Self::Ja, Self::En];

    pub fn from_locale(locale: Option<&str>) -> Self {
        match locale {
            Some(locale) if locale.starts_with("ja") => Self::Ja,
            Some(_) => Self::En,
            None => Self::Ja,
        }
    }

    pub fn title_marker(self) -> &'static str {
        self.pick("即時集計", "Sokuji")
    }

    pub fn archive_marker(self) -> &'static str {
        self.pick("アーカイブ", "Archive")
    }

    pub fn pick<'a>(self, ja: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Ja => ja,
            Self::En => en,
        }
    }
}
