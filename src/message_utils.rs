use crate::constants;
use poise::{serenity_prelude::CreateEmbed, CreateReply};

pub fn success_embed(content: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(content)
        .color(constants::SUCCESS_COLOR)
}

pub fn failure_embed(content: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(content)
        .color(constants::FAILURE_COLOR)
}

pub fn info_embed(content: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .description(content)
        .color(constants::INFO_COLOR)
}

pub fn success_message(content: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(success_embed(content))
}

#[allow(dead_code)]
pub fn info_message(content: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(info_embed(content))
}
