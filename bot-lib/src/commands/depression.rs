use crate::{
    data::PoiseContext,
    surface::DiscordSurface,
    survey::{
        bank::BANK,
        engine::{QuestionnaireEngine, SessionOutcome},
    },
};
use color_eyre::eyre::Result;

/// Evaluates whether you are suffering from clinical depression using the validated BDI questionnaire.
#[poise::command(slash_command, rename = "depression", ephemeral = true)]
pub async fn depression(ctx: PoiseContext<'_>) -> Result<()> {
    let question_timeout = ctx.data().config.read().await.question_timeout;
    let user_id = ctx.author().id.get();

    let surface = DiscordSurface::new(ctx, question_timeout);
    let engine = QuestionnaireEngine::new(&surface, &BANK, question_timeout);

    match engine.run_session(user_id).await? {
        SessionOutcome::Completed { score, tier } => {
            tracing::info!(user_id, score, tier = tier.label, "questionnaire completed");
        }
        SessionOutcome::Aborted(reason) => {
            tracing::info!(user_id, ?reason, "questionnaire aborted");
        }
    }

    Ok(())
}
