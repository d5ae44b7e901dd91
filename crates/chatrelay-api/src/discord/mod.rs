//! Discord gateway front-end.
//!
//! Registers the slash commands on ready, routes interactions to
//! [`commands`], and keeps the shared [`StatusReporter`] in step with the
//! gateway connection.
//!
//! [`StatusReporter`]: chatrelay_core::status::StatusReporter

pub mod commands;

use secrecy::{ExposeSecret, SecretString};
use serenity::all::{
    ActivityData, Client, Command, ConnectionStage, Context, EventHandler, GatewayIntents, Guild,
    Interaction, Ready, ResumedEvent, ShardStageUpdateEvent, UnavailableGuild,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::state::AppState;

pub const ACTIVITY: &str = "AI Chat | /help";

struct Handler {
    state: AppState,
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Discord: Bot connected as {} (id: {}) in {} guild(s)",
            ready.user.name,
            ready.user.id,
            ready.guilds.len()
        );
        self.state.status.set_online(true);

        match Command::set_global_commands(&ctx.http, commands::definitions()).await {
            Ok(registered) => info!("Discord: Synced {} slash command(s)", registered.len()),
            Err(e) => error!("Discord: Failed to sync commands: {e}"),
        }

        ctx.set_activity(Some(ActivityData::playing(ACTIVITY)));
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        info!("Discord: Session resumed");
        self.state.status.set_online(true);
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        debug!(shard = ?event.shard_id, "Discord: Shard stage {:?} -> {:?}", event.old, event.new);
        match event.new {
            ConnectionStage::Connected => self.state.status.set_online(true),
            ConnectionStage::Disconnected | ConnectionStage::Connecting => {
                self.state.status.set_online(false)
            }
            _ => {}
        }
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new.unwrap_or(false) {
            info!("Discord: Joined guild {} ({})", guild.name, guild.id);
        } else {
            debug!("Discord: Guild available {} ({})", guild.name, guild.id);
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        if incomplete.unavailable {
            warn!("Discord: Guild {} became unavailable", incomplete.id);
        } else {
            info!("Discord: Left guild {}", incomplete.id);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        match command.data.name.as_str() {
            "chat" => commands::handle_chat(&ctx, &command, &self.state).await,
            "clear" => commands::handle_clear(&ctx, &command, &self.state).await,
            "help" => commands::handle_help(&ctx, &command, &self.state).await,
            other => warn!("Discord: Unknown command '{other}'"),
        }
    }
}

/// Connect to the gateway and serve slash commands until `shutdown` fires.
///
/// Status reads offline again once the client has stopped.
pub async fn run(
    token: &SecretString,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!("Discord: Connecting to Discord Gateway…");
    let status = state.status.clone();

    let mut client = Client::builder(token.expose_secret(), GatewayIntents::GUILDS)
        .event_handler(Handler { state })
        .await
        .map_err(|e| anyhow::anyhow!("Discord client build failed: {e}"))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        info!("Discord: Logging off (shutting down gateway)…");
        shard_manager.shutdown_all().await;
    });

    let result = client.start().await;
    status.set_online(false);
    info!("Discord: Gateway shut down");
    result.map_err(|e| anyhow::anyhow!("Discord gateway error: {e}"))
}
