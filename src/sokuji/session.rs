#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::collections::BTreeSet;

use backon::Retryable;
use poise::serenity_prelude::{
    ChannelId, Context, CreateAttachment, CreateEmbed, CreateEmbedAuthor, CreateMessage,
    EditAttachments, EditMessage, Embed, GetMessages, GuildId, MessageId, Timestamp, UserId,
};
use tracing::warn;

use crate::{
    commands::CommandError,
    constants::{
        BANNER_VIEW_URL, HISTORY_FETCH_LIMIT, HISTORY_LOOKBACK_SECS, INFO_COLOR, SOKUJI_COLOR,
    },
    database::db,
    retry_strategies::discord_retry_strategy,
};

use super::{
    mogi::Mogi,
    race::Race,
    result_card,
    summary::{Summary, SummaryField},
    track::Track,
    SokujiError, RACE_COUNT,
};

/// A mogi bound to the channel it runs in.
///
/// The store row (channel → state blob + current message id) is the system
/// of record; the rendered summary is presentation, and doubles as a
/// recovery source when no row exists yet.
pub struct SokujiSession {
    pub channel: ChannelId,
    pub guild: GuildId,
    pub message: Option<MessageId>,
    pub mogi: Mogi,
}

/// What the history fallback needs to know about one prior message.
pub struct ScannedMessage {
    pub id: MessageId,
    pub author: UserId,
    pub posted_at: i64,
    pub content: String,
    pub summary: Option<Summary>,
}

#[derive(Debug)]
struct FoundSokuji {
    message: MessageId,
    mogi: Mogi,
    loaded_track: Option<Track>,
}

impl SokujiSession {
    pub fn new(channel: ChannelId, guild: GuildId, mogi: Mogi) -> Self {
        Self {
            channel,
            guild,
            message: None,
            mogi,
        }
    }

    /// Loads the channel's mogi from the store, falling back to adopting
    /// one from the channel's recent history.
    pub async fn get(
        ctx: &Context,
        channel: ChannelId,
        guild: GuildId,
        include_archive: bool,
    ) -> Result<Self, CommandError> {
        let session = match db().await.load_sokuji(channel).await? {
            Some(stored) => {
                let mogi = serde_json::from_str(&stored.data)
                    .map_err(|err| CommandError::Unexpected(err.into()))?;
                Self {
                    channel,
                    guild: GuildId::new(stored.guild as u64),
                    message: stored.message.map(|id| MessageId::new(id as u64)),
                    mogi,
                }
            }
            None => Self::adopt_from_history(ctx, channel, guild).await?,
        };
        if session.mogi.is_archive && !include_archive {
            return Err(SokujiError::MogiArchived.into());
        }
        Ok(session)
    }

    async fn adopt_from_history(
        ctx: &Context,
        channel: ChannelId,
        guild: GuildId,
    ) -> Result<Self, CommandError> {
        let me = ctx.cache.current_user().id;
        let messages = (|| channel.messages(ctx, GetMessages::new().limit(HISTORY_FETCH_LIMIT)))
            .retry(discord_retry_strategy())
            .await?;
        let scanned = messages.iter().map(|message| ScannedMessage {
            id: message.id,
            author: message.author.id,
            posted_at: message.timestamp.unix_timestamp(),
            content: message.content.clone(),
            summary: message.embeds.first().map(summary_from_embed),
        });
        let found = find_sokuji(scanned, me, Timestamp::now().unix_timestamp())?;
        let mut session = Self {
            channel,
            guild,
            message: Some(found.message),
            mogi: found.mogi,
        };
        session.mogi.loaded_track = found.loaded_track;
        session.persist().await?;
        Ok(session)
    }

    /// Posts a fresh summary and deletes the superseded one, so the old
    /// state never stays resolvable next to the new one.
    pub async fn send(&mut self, ctx: &Context, content: Option<String>) -> Result<(), CommandError> {
        let mut embed = embed_from_summary(&self.mogi.summary()).colour(SOKUJI_COLOR);
        let mut message = CreateMessage::new();
        if let Some(content) = content {
            message = message.content(content);
        }
        if let Some(card) = self.result_card() {
            embed = embed.image("attachment://result.png");
            message = message.add_file(CreateAttachment::bytes(card, "result.png"));
        }
        let message = message.embed(embed);
        let posted = (|| self.channel.send_message(ctx, message.clone()))
            .retry(discord_retry_strategy())
            .await?;
        if let Some(old) = self.message {
            if let Err(err) = self.channel.delete_message(ctx, old).await {
                warn!("could not delete superseded summary {old}: {err}");
            }
        }
        self.message = Some(posted.id);
        self.persist().await
    }

    /// Re-renders the current summary in place, keeping message identity.
    pub async fn refresh(&mut self, ctx: &Context) -> Result<(), CommandError> {
        let Some(message_id) = self.message else {
            return Err(SokujiError::MogiNotFound.into());
        };
        let mut embed = embed_from_summary(&self.mogi.summary()).colour(SOKUJI_COLOR);
        let mut attachments = EditAttachments::new();
        if let Some(card) = self.result_card() {
            embed = embed.image("attachment://result.png");
            attachments = attachments.add(CreateAttachment::bytes(card, "result.png"));
        }
        let edit = EditMessage::new().embed(embed).attachments(attachments);
        (|| ctx.http.edit_message(self.channel, message_id, &edit, Vec::new()))
            .retry(discord_retry_strategy())
            .await?;
        self.persist().await
    }

    /// Writes the authoritative store row for this channel.
    pub async fn persist(&self) -> Result<(), CommandError> {
        let data = serde_json::to_string(&self.mogi)
            .map_err(|err| CommandError::Unexpected(err.into()))?;
        db().await
            .save_sokuji(self.channel, self.guild, self.message, data)
            .await?;
        Ok(())
    }

    /// Pushes current standings to every banner subscriber. Awaited so the
    /// command only returns once the overlays are told, but each delivery
    /// is best effort.
    pub async fn update_viewers(&self) {
        if self.mogi.banner_users.is_empty() {
            return;
        }
        super::viewer::push(
            &super::viewer::ViewerPayload::of(&self.mogi),
            &self.mogi.banner_users,
        )
        .await;
    }

    fn result_card(&self) -> Option<Vec<u8>> {
        if self.mogi.races.len() != RACE_COUNT {
            return None;
        }
        let mut history = vec![self.mogi.penalty, self.mogi.repick];
        history.extend(self.mogi.races.iter().map(Race::scores));
        match result_card::render(&history) {
            Ok(card) => Some(card),
            Err(err) => {
                warn!("could not render the result card: {err:#}");
                None
            }
        }
    }
}

/// Scans recent messages (newest first) for the latest summary this bot
/// posted. Plain messages naming a course double as the loaded-track hint
/// for the next recorded race.
fn find_sokuji(
    messages: impl IntoIterator<Item = ScannedMessage>,
    me: UserId,
    now: i64,
) -> Result<FoundSokuji, SokujiError> {
    let cutoff = now - HISTORY_LOOKBACK_SECS;
    let mut loaded_track = None;
    for message in messages {
        if message.posted_at < cutoff {
            continue;
        }
        if loaded_track.is_none() {
            loaded_track = Track::from_nick(&message.content);
        }
        let Some(summary) = message.summary else {
            continue;
        };
        if message.author == me && summary.is_sokuji() {
            return Ok(FoundSokuji {
                message: message.id,
                mogi: Mogi::from_summary(&summary)?,
                loaded_track,
            });
        }
    }
    Err(SokujiError::MogiNotFound)
}

pub fn summary_from_embed(embed: &Embed) -> Summary {
    Summary {
        title: embed.title.clone().unwrap_or_default(),
        description: embed.description.clone().unwrap_or_default(),
        author_name: embed.author.as_ref().map(|author| author.name.clone()),
        fields: embed
            .fields
            .iter()
            .map(|field| SummaryField {
                name: field.name.clone(),
                value: field.value.clone(),
            })
            .collect(),
    }
}

fn embed_from_summary(summary: &Summary) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(summary.title.as_str())
        .description(summary.description.as_str());
    for field in &summary.fields {
        embed = embed.field(field.name.as_str(), field.value.as_str(), false);
    }
    if let Some(name) = &summary.author_name {
        embed = embed.author(CreateEmbedAuthor::new(name.as_str()));
    }
    embed
}

/// The embed listing each subscriber's personal overlay URL.
pub fn banner_embed(users: &BTreeSet<String>) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title("Banner URL").colour(INFO_COLOR);
    for user in users {
        embed = embed.field(
            format!("__{user}'s URL__"),
            format!("> {BANNER_VIEW_URL}?user={user}"),
            false,
        );
    }
    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokuji::Lang;

    fn scanned(
        id: u64,
        author: u64,
        posted_at: i64,
        content: &str,
        summary: Option<Summary>,
    ) -> ScannedMessage {
        ScannedMessage {
            id: MessageId::new(id),
            author: UserId::new(author),
            posted_at,
            content: String::from(content),
            summary,
        }
    }

    const ME: u64 = 42;
    const NOW: i64 = 1_750_000_000;

    #[test]
    fn no_bot_summaries_in_the_window_is_not_found() {
        let messages = vec![
            scanned(1, 7, NOW - 10, "gg", None),
            scanned(2, 7, NOW - 20, "123456", None),
        ];
        let err = find_sokuji(messages, UserId::new(ME), NOW).unwrap_err();
        assert_eq!(err, SokujiError::MogiNotFound);
    }

    #[test]
    fn stale_summaries_outside_the_lookback_are_ignored() {
        let mogi = Mogi::new([String::from("A"), String::from("B")], Lang::En);
        let messages = vec![scanned(
            1,
            ME,
            NOW - HISTORY_LOOKBACK_SECS - 1,
            "",
            Some(mogi.summary()),
        )];
        let err = find_sokuji(messages, UserId::new(ME), NOW).unwrap_err();
        assert_eq!(err, SokujiError::MogiNotFound);
    }

    #[test]
    fn foreign_authors_are_skipped() {
        let mogi = Mogi::new([String::from("A"), String::from("B")], Lang::En);
        let messages = vec![scanned(1, 7, NOW - 10, "", Some(mogi.summary()))];
        assert!(find_sokuji(messages, UserId::new(ME), NOW).is_err());
    }

    #[test]
    fn newest_summary_wins_and_carries_the_track_hint() {
        let mut newest = Mogi::new([String::from("A"), String::from("B")], Lang::En);
        newest.add_race("123456", None, None).unwrap();
        let oldest = Mogi::new([String::from("A"), String::from("B")], Lang::En);
        let messages = vec![
            scanned(3, 7, NOW - 5, "rMP", None),
            scanned(2, ME, NOW - 10, "", Some(newest.summary())),
            scanned(1, ME, NOW - 20, "", Some(oldest.summary())),
        ];
        let found = find_sokuji(messages, UserId::new(ME), NOW).unwrap();
        assert_eq!(found.message, MessageId::new(2));
        assert_eq!(found.mogi.races.len(), 1);
        assert_eq!(found.loaded_track, Track::from_nick("rMP"));
    }
}
