use poise::serenity_prelude::Colour;

pub const SUCCESS_COLOR: Colour = Colour(0x57F287);
pub const FAILURE_COLOR: Colour = Colour(0xED4245);
pub const INFO_COLOR: Colour = Colour(0x5865F2);
pub const SOKUJI_COLOR: Colour = Colour(0x6495ED);

pub const DATABASE_URL: &str = "sqlite://./sokuji.db?mode=rwc";

/// How far back the channel scan may look for a live summary.
pub const HISTORY_LOOKBACK_SECS: i64 = 60 * 60;
pub const HISTORY_FETCH_LIMIT: u8 = 100;

/// Overlay page each banner subscriber points their stream software at.
pub const BANNER_VIEW_URL: &str = "https://sokuji-view.pages.dev/";

/// Points added when no amount is given to a penalty command.
pub const DEFAULT_PENALTY: i32 = -15;
