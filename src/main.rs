#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::cast_possible_wrap
)]

mod commands;
mod constants;
mod database;
mod error_handler;
mod listener;
mod message_utils;
mod retry_strategies;
mod sokuji;

use std::env;

use anyhow::{Context, Result};
use commands::{help, mogi, result, tag, team};
use poise::{
    builtins,
    serenity_prelude::{ClientBuilder, Command, CreateAllowedMentions, FullEvent, GatewayIntents},
    Framework, FrameworkOptions, PrefixFrameworkOptions,
};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let options = FrameworkOptions {
        commands: vec![
            mogi::mogi(),
            tag::tag(),
            team::team(),
            result::register_result(),
            result::results(),
            help::help(),
        ],
        on_error: |err| {
            Box::pin(async move {
                if let Err(err) = error_handler::handle(err).await {
                    error!("Error while handling error: {}", err);
                }
            })
        },
        event_handler: |ctx, event, _framework, _data| {
            Box::pin(async move {
                if let FullEvent::Message { new_message } = event {
                    listener::on_message(ctx, new_message).await;
                }
                Ok(())
            })
        },
        prefix_options: PrefixFrameworkOptions {
            prefix: Some(String::from("!")),
            ..Default::default()
        },
        allowed_mentions: Some(
            CreateAllowedMentions::new()
                .all_roles(true)
                .all_users(false)
                .replied_user(true),
        ),
        ..Default::default()
    };
    let framework = Framework::builder()
        .setup(|ctx, _, framework| {
            Box::pin(async move {
                Command::set_global_commands(
                    ctx,
                    builtins::create_application_commands(&framework.options().commands),
                )
                .await?;
                Ok(())
            })
        })
        .options(options)
        .build();
    let mut client = ClientBuilder::new(
        env::var("TOKEN").context("failed to get bot token")?,
        GatewayIntents::non_privileged()
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::MESSAGE_CONTENT,
    )
    .framework(framework)
    .await?;
    Ok(client.start().await?)
}
