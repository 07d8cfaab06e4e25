//! # Request Handlers
//!
//! Axum request handlers for the site API.
//! Each session route maps one HTTP request to one `CartCommand`; the
//! handlers own no cart logic of their own.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use warung_core::{
    compose_direct_order, compose_inquiry, compose_reservation, CartCommand, DirtySections,
    HexColor, Inquiry, OutboundMessage, Reservation, SessionEvent, SessionView, SiteError,
};
use warung_render::BindReport;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add one unit of an item
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub label: String,
    pub unit_price: u64,
}

/// Set an item's quantity (zero or less removes it)
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// Outcome of the external handoff, as reported by the visitor's browser
#[derive(Debug, Deserialize)]
pub struct HandoffRequest {
    pub confirmed: bool,
}

/// Single-item order when the cart is disabled
#[derive(Debug, Deserialize)]
pub struct DirectOrderRequest {
    pub label: String,
    pub unit_price: u64,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecolorRequest {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeHandleRequest {
    pub handle: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeContactRequest {
    pub phone: String,
    pub handle: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Created session
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub expires_in_minutes: i64,
    pub session: SessionView,
}

/// Result of applying a command to a session
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub event: SessionEvent,
    pub session: SessionView,
}

/// Result of a document mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub dirty: DirtySections,
    pub report: BindReport,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn site_error_to_response(err: SiteError) -> ApiError {
    let code = err.status_code();
    if err.is_user_recoverable() {
        debug!(code, "Request refused: {}", err);
    } else {
        warn!(code, "Request failed: {}", err);
    }
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "warung-site",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Current site document
pub async fn get_site(State(state): State<AppState>) -> impl IntoResponse {
    let site = state.site.read().await;
    Json(site.config.clone())
}

/// Bound page regions
pub async fn get_regions(State(state): State<AppState>) -> impl IntoResponse {
    let site = state.site.read().await;
    Json(site.page.clone())
}

/// Validation findings from load time
pub async fn get_findings(State(state): State<AppState>) -> impl IntoResponse {
    let site = state.site.read().await;
    Json(serde_json::json!({
        "findings": site.findings,
        "count": site.findings.len()
    }))
}

/// Start a visitor session; 503 once the store holds its limit of live sessions
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state.site.read().await.config.ordering.currency.clone();
    let mut sessions = state.sessions.lock().await;

    let id = sessions
        .create(Utc::now())
        .map_err(site_error_to_response)?;
    info!(session_id = %id, live = sessions.len(), "Session created");

    let view = warung_core::Session::new().view(&currency);
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: id.to_string(),
            expires_in_minutes: state.config.session_ttl_minutes,
            session: view,
        }),
    ))
}

/// Session view
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let currency = state.site.read().await.config.ordering.currency.clone();
    let mut sessions = state.sessions.lock().await;

    let entry = sessions
        .get_mut(&session_id, Utc::now())
        .map_err(site_error_to_response)?;
    Ok(Json(entry.session.view(&currency)))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = CartCommand::Add {
        label: request.label,
        unit_price: request.unit_price,
    };
    run_command(&state, &session_id, command).await
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path((session_id, label)): Path<(String, String)>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = CartCommand::SetQuantity {
        label,
        quantity: request.quantity,
    };
    run_command(&state, &session_id, command).await
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, label)): Path<(String, String)>,
) -> Result<Json<CommandResponse>, ApiError> {
    run_command(&state, &session_id, CartCommand::Remove { label }).await
}

/// Open the checkout view
pub async fn open_review(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    run_command(&state, &session_id, CartCommand::OpenReview).await
}

/// Close the checkout view
pub async fn close_review(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    run_command(&state, &session_id, CartCommand::CloseReview).await
}

/// Compose the order message. A rejection is a 422 carrying the visitor-facing
/// message; the cart is left as it was.
pub async fn checkout(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    let response = run_command(&state, &session_id, CartCommand::Checkout).await?;

    if let SessionEvent::CheckoutRejected(reason) = &response.event {
        let currency = state.site.read().await.config.ordering.currency.clone();
        info!(session_id = %session_id, %reason, "Checkout rejected");
        let (status, _) = site_error_to_response(SiteError::CheckoutRejected(*reason));
        return Err((
            status,
            Json(
                ErrorResponse::new(reason.user_message(&currency), status.as_u16())
                    .with_details(reason.to_string()),
            ),
        ));
    }

    Ok(response)
}

/// Report whether the visitor completed the external handoff
pub async fn handoff(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<HandoffRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = if request.confirmed {
        CartCommand::ConfirmHandoff
    } else {
        CartCommand::CancelHandoff
    };
    run_command(&state, &session_id, command).await
}

#[instrument(skip(state, command), fields(command = command.name()))]
async fn run_command(
    state: &AppState,
    session_id: &str,
    command: CartCommand,
) -> Result<Json<CommandResponse>, ApiError> {
    let site = state.site.read().await;
    let mut sessions = state.sessions.lock().await;

    let entry = sessions
        .get_mut(session_id, Utc::now())
        .map_err(site_error_to_response)?;

    let event = entry
        .session
        .apply(command, &site.config)
        .map_err(site_error_to_response)?;

    let view = entry.session.view(&site.config.ordering.currency);
    info!(
        phase = %view.phase,
        items = view.cart.item_count,
        total = view.cart.total,
        "Command applied"
    );

    Ok(Json(CommandResponse {
        event,
        session: view,
    }))
}

/// Compose an inquiry message
#[instrument(skip(state, inquiry))]
pub async fn inquiry(
    State(state): State<AppState>,
    Json(inquiry): Json<Inquiry>,
) -> Result<Json<OutboundMessage>, ApiError> {
    let site = state.site.read().await;
    let outbound = compose_inquiry(&inquiry, &site.config).map_err(site_error_to_response)?;
    info!("Inquiry composed");
    Ok(Json(outbound))
}

/// Compose a table or experience reservation message
#[instrument(skip(state, reservation), fields(guests = reservation.guests))]
pub async fn reservation(
    State(state): State<AppState>,
    Json(reservation): Json<Reservation>,
) -> Result<Json<OutboundMessage>, ApiError> {
    let site = state.site.read().await;
    let outbound =
        compose_reservation(&reservation, &site.config).map_err(site_error_to_response)?;
    info!(date = %reservation.date, "Reservation composed");
    Ok(Json(outbound))
}

/// Hand off a single item without a cart
#[instrument(skip(state, request), fields(label = %request.label))]
pub async fn direct_order(
    State(state): State<AppState>,
    Json(request): Json<DirectOrderRequest>,
) -> Result<Json<OutboundMessage>, ApiError> {
    let site = state.site.read().await;
    if site.config.features.enable_cart {
        warn!("Direct order while the cart is enabled");
    }
    Ok(Json(compose_direct_order(
        &request.label,
        request.unit_price,
        &site.config,
    )))
}

// =============================================================================
// Admin mutators
// =============================================================================

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    state.authorize(bearer_token(headers)).map_err(|e| {
        warn!("Admin request rejected");
        site_error_to_response(e)
    })
}

#[instrument(skip(state, headers, request))]
pub async fn rename(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RenameRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    authorize(&state, &headers)?;

    let mut site = state.site.write().await;
    let dirty = site.config.rename(request.name);
    let report = site.apply(&dirty);
    info!(name = %site.config.identity.name, "Business renamed");
    Ok(Json(MutationResponse { dirty, report }))
}

#[instrument(skip(state, headers, request))]
pub async fn recolor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecolorRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    authorize(&state, &headers)?;

    for value in [&request.primary, &request.secondary, &request.accent] {
        if !HexColor::is_valid(value) {
            warn!(value = %value, "Recolor with a malformed color");
        }
    }

    let mut site = state.site.write().await;
    let dirty = site
        .config
        .recolor(request.primary, request.secondary, request.accent);
    let report = site.apply(&dirty);
    info!("Palette changed");
    Ok(Json(MutationResponse { dirty, report }))
}

#[instrument(skip(state, headers, request))]
pub async fn change_handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChangeHandleRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    authorize(&state, &headers)?;

    let mut site = state.site.write().await;
    let dirty = site.config.change_handle(request.handle);
    let report = site.apply(&dirty);
    info!(handle = %site.config.contact.messaging_handle, "Messaging handle changed");
    Ok(Json(MutationResponse { dirty, report }))
}

#[instrument(skip(state, headers, request))]
pub async fn change_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChangeContactRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    authorize(&state, &headers)?;

    let mut site = state.site.write().await;
    let dirty = site
        .config
        .change_contact(request.phone, request.handle, request.email);
    let report = site.apply(&dirty);
    info!("Contact details changed");
    Ok(Json(MutationResponse { dirty, report }))
}
