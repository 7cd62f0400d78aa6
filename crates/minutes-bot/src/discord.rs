//! Discord gateway adapter.
//!
//! Turns each supported attachment into a coordinator run and mirrors its
//! progress into a single reply message, which ends as the result embed.

use std::sync::Arc;

use async_trait::async_trait;
use minutes_core::is_supported_transcript;
use minutes_core::text::truncate_chars;
use minutes_notify::DispatchOutcome;
use serenity::all::{
    Attachment, Client, Context, CreateEmbed, CreateMessage, EditMessage, EventHandler,
    GatewayIntents, Message, Ready,
};
use tokio::sync::Mutex;

use crate::pipeline::{PipelineCoordinator, RunReport, RunRequest, RunState, StatusSink};
use crate::stats::PipelineStats;

/// Discord rejects embed field values above this length.
const EMBED_FIELD_CHARS: usize = 1024;
const EMAIL_ERROR_CHARS: usize = 50;
const SUCCESS_COLOUR: u32 = 0x2E_CC_71;

/// Builds the gateway client.
///
/// # Errors
///
/// Returns a serenity error if the token is malformed or the client cannot
/// be constructed.
pub async fn build_client(
    token: &str,
    coordinator: Arc<PipelineCoordinator>,
    stats: Arc<PipelineStats>,
) -> serenity::Result<Client> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    Client::builder(token, intents)
        .event_handler(Handler { coordinator, stats })
        .await
}

struct Handler {
    coordinator: Arc<PipelineCoordinator>,
    stats: Arc<PipelineStats>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.stats.mark_ready();
        tracing::info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord gateway ready"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        for attachment in msg
            .attachments
            .iter()
            .filter(|a| is_supported_transcript(&a.filename))
        {
            tokio::spawn(process_attachment(
                ctx.clone(),
                msg.clone(),
                attachment.clone(),
                Arc::clone(&self.coordinator),
            ));
        }
    }
}

async fn process_attachment(
    ctx: Context,
    msg: Message,
    attachment: Attachment,
    coordinator: Arc<PipelineCoordinator>,
) {
    react(&ctx, &msg, '👀').await;

    let request = RunRequest {
        file_name: attachment.filename.clone(),
        channel_id: msg.channel_id.to_string(),
        user_text: Some(msg.content.clone()),
    };
    let download = async move { attachment.download().await.map_err(|e| e.to_string()) };
    let sink = ReplyStatus::new(ctx.clone(), msg.clone());

    match coordinator.run(request, download, &sink).await {
        RunReport::Done {
            title,
            executive_summary,
            page_url,
            dispatch,
        } => {
            let embed = completed_embed(&title, &executive_summary, &page_url, &dispatch);
            sink.finish(embed).await;
            react(&ctx, &msg, '✅').await;
        }
        RunReport::Failed(failure) => {
            tracing::debug!(
                stage = ?failure.stage,
                message = %failure.message,
                "reporting failed run"
            );
            react(&ctx, &msg, '❌').await;
        }
    }
}

async fn react(ctx: &Context, msg: &Message, emoji: char) {
    if let Err(e) = msg.react(ctx, emoji).await {
        tracing::warn!(error = %e, %emoji, "failed to add reaction");
    }
}

/// Posts the first status line as a reply to the upload, then edits that
/// reply for every later line.
struct ReplyStatus {
    ctx: Context,
    source: Message,
    reply: Mutex<Option<Message>>,
}

impl ReplyStatus {
    fn new(ctx: Context, source: Message) -> Self {
        Self {
            ctx,
            source,
            reply: Mutex::new(None),
        }
    }

    async fn finish(&self, embed: CreateEmbed) {
        let mut reply = self.reply.lock().await;
        let edit = EditMessage::new().content("").embed(embed.clone());
        let result = match reply.as_mut() {
            Some(existing) => existing.edit(&self.ctx, edit).await,
            None => self
                .source
                .channel_id
                .send_message(
                    &self.ctx,
                    CreateMessage::new()
                        .embed(embed)
                        .reference_message(&self.source),
                )
                .await
                .map(|_| ()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to post result embed");
        }
    }
}

#[async_trait]
impl StatusSink for ReplyStatus {
    async fn transition(&self, state: RunState, message: Option<&str>) {
        tracing::debug!(?state, "run state changed");
        let Some(text) = message else {
            return;
        };

        let mut reply = self.reply.lock().await;
        if let Some(existing) = reply.as_mut() {
            if let Err(e) = existing
                .edit(&self.ctx, EditMessage::new().content(text))
                .await
            {
                tracing::warn!(error = %e, "failed to edit status message");
            }
            return;
        }

        match self.source.reply(&self.ctx, text).await {
            Ok(posted) => *reply = Some(posted),
            Err(e) => tracing::warn!(error = %e, "failed to post status message"),
        }
    }
}

fn completed_embed(
    title: &str,
    executive_summary: &[String],
    page_url: &str,
    dispatch: &DispatchOutcome,
) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ Meeting Minutes Created!")
        .description(format!("**{title}** has been processed."))
        .field("Summary", summary_field(executive_summary), false)
        .field("Notion", format!("[View Page]({page_url})"), true)
        .field("Email", email_field(dispatch), true)
        .colour(SUCCESS_COLOUR)
}

fn summary_field(executive_summary: &[String]) -> String {
    let joined = executive_summary.join("\n");
    if joined.trim().is_empty() {
        return "없음".to_string();
    }
    truncate_chars(&joined, EMBED_FIELD_CHARS).to_string()
}

fn email_field(dispatch: &DispatchOutcome) -> String {
    if dispatch.success {
        "✅ Sent via Make.com".to_string()
    } else {
        format!(
            "❌ Failed: {}",
            truncate_chars(&dispatch.detail, EMAIL_ERROR_CHARS)
        )
    }
}
