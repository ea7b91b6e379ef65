use crate::{data::PoiseContext, utils::SendReplyEphemeral};
use color_eyre::eyre::Result;

/// Show what this bot does and how to start a screening.
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: PoiseContext<'_>) -> Result<()> {
    let help_text = ctx.data().config.read().await.help_text.clone();

    match help_text {
        Some(help_text) => {
            ctx.say(help_text.as_str()).await?;
        }
        None => {
            ctx.reply_ephemeral(
                "Help text could not be found. Please contact the bot owner to set it up.",
            )
            .await?;
        }
    }

    Ok(())
}
