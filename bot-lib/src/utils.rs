use crate::data::PoiseContext;
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use poise::CreateReply;

pub trait GetRelativeTimestamp {
    fn discord_relative_timestamp(&self) -> String;
}

impl GetRelativeTimestamp for DateTime<Utc> {
    fn discord_relative_timestamp(&self) -> String {
        format!("<t:{}:R>", self.timestamp())
    }
}

pub trait SendReplyEphemeral {
    async fn reply_ephemeral(self, message: impl Into<String>) -> Result<()>;
}

impl SendReplyEphemeral for PoiseContext<'_> {
    async fn reply_ephemeral(self, message: impl Into<String>) -> Result<()> {
        self.send(CreateReply::default().content(message).ephemeral(true))
            .await?;

        Ok(())
    }
}
