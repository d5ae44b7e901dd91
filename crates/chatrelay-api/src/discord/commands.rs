//! Slash commands: `/chat`, `/clear`, `/help`.
//!
//! Reply texts and chunk planning are plain functions so they can be
//! tested without a gateway connection; the `handle_*` functions only move
//! them over the Discord HTTP API.

use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, ResolvedValue,
};
use tracing::{error, info, warn};

use chatrelay_core::chat::splitter;
use chatrelay_types::chat::UserKey;
use chatrelay_types::config::DISCORD_MESSAGE_LIMIT;
use chatrelay_types::llm::{LlmError, ProviderKind};

use crate::state::AppState;

pub const SPLIT_NOTE: &str = "Response split into multiple messages due to length.";
pub const CLEARED: &str = "Your conversation history has been cleared! 🗑️";
pub const NOTHING_TO_CLEAR: &str = "You don't have any conversation history to clear.";

/// Global command definitions, registered on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("chat")
            .description("Chat with the AI assistant")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Your message to the AI",
                )
                .required(true),
            ),
        CreateCommand::new("clear").description("Clear your conversation history"),
        CreateCommand::new("help").description("Show help information"),
    ]
}

/// Transport-sized pieces of a reply, skipping whitespace-only pieces.
pub fn reply_chunks(reply: &str) -> Vec<&str> {
    splitter::chunk(reply, DISCORD_MESSAGE_LIMIT)
        .filter(|c| !c.trim().is_empty())
        .collect()
}

pub fn clear_reply(cleared: bool) -> &'static str {
    if cleared { CLEARED } else { NOTHING_TO_CLEAR }
}

pub fn help_embed(provider: ProviderKind) -> CreateEmbed {
    CreateEmbed::new()
        .title("🤖 AI Chat Bot Help")
        .description("I'm an AI-powered chat bot that can help you with various tasks!")
        .colour(Colour::BLUE)
        .field(
            "Commands",
            "`/chat <message>` - Chat with the AI\n\
             `/clear` - Clear your conversation history\n\
             `/help` - Show this help message",
            false,
        )
        .field(
            "Features",
            "• Conversation memory (remembers context)\n\
             • Long responses split automatically\n\
             • Separate history per user",
            false,
        )
        .footer(CreateEmbedFooter::new(format!(
            "Powered by {}",
            provider.display_name()
        )))
}

fn message_option(command: &CommandInteraction) -> Option<&str> {
    command
        .data
        .options()
        .into_iter()
        .find(|opt| opt.name == "message")
        .and_then(|opt| match opt.value {
            ResolvedValue::String(s) => Some(s),
            _ => None,
        })
}

/// `/chat`: defer, dispatch, then deliver the reply in chunks.
pub async fn handle_chat(ctx: &Context, command: &CommandInteraction, state: &AppState) {
    let user = UserKey::discord(command.user.id.get());
    let message = message_option(command).unwrap_or_default();
    info!(user = %user, chars = message.chars().count(), "Received /chat");

    if let Err(e) = command.defer(&ctx.http).await {
        error!(user = %user, error = %e, "Failed to defer /chat");
        return;
    }

    let reply = match state.discord.dispatch(&user, message).await {
        Ok(reply) => reply,
        Err(e) => {
            followup(ctx, command, e.user_message()).await;
            return;
        }
    };

    let chunks = reply_chunks(&reply);
    let Some((first, rest)) = chunks.split_first() else {
        warn!(user = %user, "Reply had no sendable content");
        let err = LlmError::EmptyResponse(state.provider_kind.to_string());
        followup(ctx, command, err.user_message()).await;
        return;
    };

    followup(ctx, command, first).await;
    for chunk in rest {
        if let Err(e) = command.channel_id.say(&ctx.http, *chunk).await {
            error!(user = %user, error = %e, "Failed to send reply chunk");
            return;
        }
    }
    if !rest.is_empty() {
        followup(ctx, command, SPLIT_NOTE).await;
        info!(user = %user, chunks = chunks.len(), "Reply split across messages");
    }
}

/// `/clear`: forget the caller's conversation.
pub async fn handle_clear(ctx: &Context, command: &CommandInteraction, state: &AppState) {
    let user = UserKey::discord(command.user.id.get());
    let cleared = state.discord.clear(&user).await;
    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new()
            .content(clear_reply(cleared))
            .ephemeral(true),
    )
    .await;
}

/// `/help`: command overview embed.
pub async fn handle_help(ctx: &Context, command: &CommandInteraction, state: &AppState) {
    respond(
        ctx,
        command,
        CreateInteractionResponseMessage::new().embed(help_embed(state.provider_kind)),
    )
    .await;
}

async fn followup(ctx: &Context, command: &CommandInteraction, content: &str) {
    if let Err(e) = command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new().content(content),
        )
        .await
    {
        error!(command = %command.data.name, error = %e, "Failed to send follow-up");
    }
}

async fn respond(
    ctx: &Context,
    command: &CommandInteraction,
    message: CreateInteractionResponseMessage,
) {
    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        warn!(command = %command.data.name, error = %e, "Failed to respond to command");
    }
}
