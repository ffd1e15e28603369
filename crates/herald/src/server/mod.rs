//! Slack webhook server
//!
//! - `POST /slack/commands` answers `/announce` with an interactive preview
//! - `POST /slack/interactions` publishes or cancels a preview
//! - `GET /health` reports liveness

mod rate_limit;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use herald_core::Destination;
use herald_slack::commands::{send_delayed_response, usage, DelayedResponse};
use herald_slack::interactions::InteractionForm;
use herald_slack::preview::{cancelled_message, published_message, CANCEL_ACTION, PUBLISH_ACTION};
use herald_slack::{
    build_preview, decode_selection_token, parse_announce_text, reconcile_selection,
    InteractionPayload, PreviewOptions, PublishSink, SlashCommandPayload, SlashCommandResponse,
};

use crate::announcer::Announcer;

pub use rate_limit::RateLimiter;

/// Shared server state
pub struct AppState {
    pub announcer: Announcer,
    pub publisher: Arc<dyn PublishSink>,
    pub rate_limiter: RateLimiter,
    pub http: reqwest::Client,
}

impl AppState {
    /// Create state from an announcer and a publish sink
    pub fn new(announcer: Announcer, publisher: Arc<dyn PublishSink>) -> Self {
        let rate_limiter = RateLimiter::from(&announcer.config().server.rate_limit);
        Self {
            announcer,
            publisher,
            rate_limiter,
            http: reqwest::Client::new(),
        }
    }

    fn preview_options(&self) -> PreviewOptions {
        PreviewOptions::from(&self.announcer.config().announcement)
    }
}

/// Build the router (for testing without binding to a port).
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/slack/commands", post(slash_command))
        .route("/slack/interactions", post(interaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(state: Arc<AppState>, listen_addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr, "herald listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[instrument(skip_all, fields(user = %payload.user_id, command = %payload.command))]
async fn slash_command(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SlashCommandPayload>,
) -> Json<SlashCommandResponse> {
    if !state.rate_limiter.check(&payload.user_id).await {
        return Json(SlashCommandResponse::text(
            "You're sending commands too quickly. Give it a minute and try again.",
        ));
    }

    let Some(request) = parse_announce_text(&payload.text) else {
        return Json(SlashCommandResponse::text(usage(&payload.command)));
    };

    let destination = request
        .channel
        .or_else(|| {
            state
                .announcer
                .config()
                .announcement
                .default_channel
                .as_ref()
                .map(|id| Destination::new(id, ""))
        })
        .unwrap_or_else(|| Destination::new(&payload.channel_id, &payload.channel_name));
    info!(release_id = %request.release_id, %destination, "announce requested");

    let draft = match state.announcer.draft(&request.release_id, destination).await {
        Ok(draft) => draft,
        Err(e) if e.is_user_facing() => {
            return Json(SlashCommandResponse::text(format!(":warning: {}", e)));
        }
        Err(e) => {
            error!(error = %e, "failed to draft announcement");
            return Json(SlashCommandResponse::text(format!(
                ":x: Something went wrong preparing release {}. Check the server logs.",
                request.release_id
            )));
        }
    };

    if draft.pending.is_empty() {
        return Json(SlashCommandResponse::text(draft.preview_text));
    }

    match build_preview(&draft.pending, &draft.preview_text, &state.preview_options()) {
        Ok(message) => {
            let fallback = message.text.clone().unwrap_or_default();
            let mut response = SlashCommandResponse::text(fallback);
            if let Some(blocks) = message.blocks_json() {
                response = response.with_blocks(blocks);
            }
            Json(response)
        }
        Err(e) => {
            error!(error = %e, "failed to build preview");
            Json(SlashCommandResponse::text(
                ":x: Could not build the announcement preview.",
            ))
        }
    }
}

#[instrument(skip_all)]
async fn interaction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InteractionForm>,
) -> StatusCode {
    let payload = match InteractionPayload::parse(&form.payload) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "rejecting interaction");
            return StatusCode::BAD_REQUEST;
        }
    };

    if payload.action(CANCEL_ACTION).is_some() {
        info!(user = %payload.user.id, "announcement cancelled");
        respond(&state, &payload, &cancelled_message()).await;
        return StatusCode::OK;
    }

    let Some(token) = payload
        .action(PUBLISH_ACTION)
        .and_then(|action| action.value.as_deref())
    else {
        // Checkbox toggles also arrive here; nothing to do until Publish.
        return StatusCode::OK;
    };

    let reply = publish(&state, &payload, token).await;
    respond(&state, &payload, &reply).await;
    StatusCode::OK
}

/// Publish the selected changes and describe the outcome
#[instrument(skip_all, fields(user = %payload.user.id))]
async fn publish(state: &AppState, payload: &InteractionPayload, token: &str) -> DelayedResponse {
    let token = match decode_selection_token(token) {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "undecodable selection token");
            return DelayedResponse::new()
                .with_text(":x: This preview can no longer be published. Run the command again.")
                .replace_original();
        }
    };

    let rendered = payload.rendered_text();
    let changes = reconcile_selection(&token, &payload.checked_indices(), rendered.as_deref());
    if changes.is_empty() {
        return DelayedResponse::new()
            .with_text("Nothing to publish: no changes could be recovered from the preview.")
            .replace_original();
    }

    let destination = token.destination();
    let chunks = state
        .announcer
        .publishable_chunks(&changes, token.release_id());
    info!(
        release_id = token.release_id(),
        change_count = changes.len(),
        chunk_count = chunks.len(),
        sink = state.publisher.name(),
        "publishing announcement"
    );

    for piece in &chunks {
        if let Err(e) = state.publisher.publish(destination, piece).await {
            error!(error = %e, "publish failed");
            return DelayedResponse::new()
                .with_text(format!(":x: Publishing to {} failed: {}", destination.mention(), e))
                .replace_original();
        }
    }

    published_message(destination, changes.len())
}

async fn respond(state: &AppState, payload: &InteractionPayload, response: &DelayedResponse) {
    if payload.response_url.is_empty() {
        return;
    }
    if let Err(e) = send_delayed_response(&state.http, &payload.response_url, response).await {
        error!(error = %e, "failed to update preview message");
    }
}
