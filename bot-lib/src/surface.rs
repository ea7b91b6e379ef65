use crate::{
    data::PoiseContext,
    survey::{
        bank::{BANK, MAX_CHOICE_WEIGHT, Question},
        engine::{CorrelationToken, InteractionSurface, Notice},
    },
    utils::{GetRelativeTimestamp, SendReplyEphemeral},
};
use bot_traits::ForwardRefToTracing;
use chrono::Utc;
use color_eyre::eyre::Result;
use poise::{
    CreateReply, ReplyHandle,
    serenity_prelude::{self as serenity, Mentionable},
};
use std::time::Duration;

pub const SURVEY_TITLE: &str = "🧠 CliniCare: Mind";
pub const SURVEY_THUMBNAIL: &str =
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRNFMDb6nEd906vJEn6xg62TOtwIVHvBDGK2Q&usqp=CAU";
pub const TIMEOUT_NOTICE: &str = "You took too long to respond! Please try again.";

/// Mood emoji per choice weight, calm to distressed.
const CHOICE_EMOJIS: [char; (MAX_CHOICE_WEIGHT as usize) + 1] = ['🙂', '😕', '🙁', '😢'];

/// Runs the questionnaire over ephemeral replies to a single slash command
/// invocation. Questions render as an embed plus a select menu whose custom
/// id is the correlation token; answers come back through a component
/// interaction collector bound to that id and the invoking user.
pub struct DiscordSurface<'a> {
    ctx: PoiseContext<'a>,
    question_timeout: Duration,
}

impl<'a> DiscordSurface<'a> {
    pub fn new(ctx: PoiseContext<'a>, question_timeout: Duration) -> Self {
        DiscordSurface {
            ctx,
            question_timeout,
        }
    }

    fn question_embed(&self, question: &Question) -> serenity::CreateEmbed {
        let deadline = Utc::now() + self.question_timeout;

        serenity::CreateEmbed::new()
            .title(SURVEY_TITLE)
            .description(format!(
                "Hey {}, tell me how you currently feel.\n\n**{}**\n\nExpires {}",
                self.ctx.author().mention(),
                question.prompt,
                deadline.discord_relative_timestamp(),
            ))
            .colour(serenity::Colour::new(0xFFFFFF))
            .thumbnail(SURVEY_THUMBNAIL)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Question {} of {}.",
                question.index + 1,
                BANK.size()
            )))
    }
}

fn question_menu(question: &Question, token: &CorrelationToken) -> serenity::CreateSelectMenu {
    let options = question
        .choices
        .iter()
        .map(|choice| {
            serenity::CreateSelectMenuOption::new(choice.text, choice.weight.to_string())
                .emoji(CHOICE_EMOJIS[usize::from(choice.weight)])
        })
        .collect();

    serenity::CreateSelectMenu::new(
        token.custom_id(),
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Choose a statement")
}

impl<'a> InteractionSurface for DiscordSurface<'a> {
    type Handle = ReplyHandle<'a>;

    async fn present(
        &self,
        question: &Question,
        token: &CorrelationToken,
    ) -> Result<ReplyHandle<'a>> {
        let reply = self
            .ctx
            .send(
                CreateReply::default()
                    .embed(self.question_embed(question))
                    .components(vec![serenity::CreateActionRow::SelectMenu(question_menu(
                        question, token,
                    ))])
                    .ephemeral(true),
            )
            .await?;

        Ok(reply)
    }

    async fn retract(&self, handle: ReplyHandle<'a>) {
        // The reply may already be gone; that's fine.
        handle.delete(self.ctx).await.trace_warn_ok();
    }

    async fn await_response(
        &self,
        token: &CorrelationToken,
        owner: u64,
        timeout: Duration,
    ) -> Option<u8> {
        let interaction = serenity::ComponentInteractionCollector::new(self.ctx)
            .author_id(serenity::UserId::new(owner))
            .custom_ids(vec![token.custom_id()])
            .timeout(timeout)
            .await?;

        interaction
            .create_response(self.ctx, serenity::CreateInteractionResponse::Acknowledge)
            .await
            .trace_warn_ok();

        let serenity::ComponentInteractionDataKind::StringSelect { values } =
            &interaction.data.kind
        else {
            return None;
        };

        values
            .first()
            .and_then(|value| value.parse::<u8>().ok())
            .filter(|weight| *weight <= MAX_CHOICE_WEIGHT)
    }

    async fn notify(&self, _owner: u64, notice: Notice) -> Result<()> {
        match notice {
            Notice::TimedOut => self.ctx.reply_ephemeral(TIMEOUT_NOTICE).await,
            Notice::Scored { score: _, tier } => {
                let embed = serenity::CreateEmbed::new()
                    .title(SURVEY_TITLE)
                    .description(tier.advisory)
                    .colour(tier.color)
                    .thumbnail(tier.thumbnail)
                    .footer(serenity::CreateEmbedFooter::new(tier.footer));

                self.ctx
                    .send(CreateReply::default().embed(embed).ephemeral(true))
                    .await?;

                Ok(())
            }
        }
    }
}
