use poise::{builtins, command, samples::HelpConfiguration};

use super::{Context, CommandResult};

/// An overview of the bot's commands
#[command(slash_command, ephemeral)]
pub async fn help(ctx: Context<'_>) -> CommandResult {
    builtins::help(
        ctx,
        None,
        HelpConfiguration {
            show_subcommands: true,
            extra_text_at_bottom:
                "While a mogi runs, any chat line that parses as finishing positions is recorded \
                 as a race, `back` removes the last one, and a course name sets the next race's \
                 track.",
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}
