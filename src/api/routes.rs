//! API Routes
//!
//! HTTP endpoint definitions. Handlers translate requests into component
//! calls; status codes for failures come from `AppError`.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::MovieCatalog;
use crate::directory::SessionDirectory;
use crate::domain::{Client, Movie, MovieChanges, NewClient, OperationContext, Session, Ticket};
use crate::error::AppResult;
use crate::handlers::{BookTicketCommand, BookTicketHandler};
use crate::registry::ClientRegistry;
use crate::storage::Storage;

use super::extract::{AppJson, AppPath};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionSearchQuery {
    #[serde(default)]
    pub movie: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookTicketRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookTicketResponse {
    pub ticket_id: Uuid,
    pub client_id: Uuid,
    pub session_id: Uuid,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<Storage> {
    Router::new()
        // Movie catalog
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/:slug",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
        // Session directory and booking
        .route("/sessions", get(search_sessions))
        .route("/sessions/:session_id", get(get_session))
        .route(
            "/sessions/:session_id/tickets",
            get(list_session_tickets).post(book_ticket),
        )
        // Client registry
        .route("/clients", post(register_client))
        .route("/clients/:client_id", get(get_client))
}

// =========================================================================
// Movies
// =========================================================================

/// List all movies
async fn list_movies(State(storage): State<Storage>) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieCatalog::new(storage).list().await?;
    Ok(Json(movies))
}

/// Create a movie from its title
async fn create_movie(
    State(storage): State<Storage>,
    AppJson(request): AppJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = MovieCatalog::new(storage)
        .create(&request.title, &request.synopsis)
        .await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get movie by slug
async fn get_movie(
    State(storage): State<Storage>,
    AppPath(slug): AppPath<String>,
) -> AppResult<Json<Movie>> {
    let movie = MovieCatalog::new(storage).get(&slug).await?;
    Ok(Json(movie))
}

/// Partially update a movie
async fn update_movie(
    State(storage): State<Storage>,
    AppPath(slug): AppPath<String>,
    AppJson(changes): AppJson<MovieChanges>,
) -> AppResult<Json<Movie>> {
    let movie = MovieCatalog::new(storage).update(&slug, changes).await?;
    Ok(Json(movie))
}

/// Delete a movie
async fn delete_movie(
    State(storage): State<Storage>,
    AppPath(slug): AppPath<String>,
) -> AppResult<StatusCode> {
    MovieCatalog::new(storage).delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// Sessions
// =========================================================================

/// Search sessions by movie slug (empty query lists every session)
async fn search_sessions(
    State(storage): State<Storage>,
    Query(query): Query<SessionSearchQuery>,
) -> AppResult<Json<Vec<Session>>> {
    let sessions = SessionDirectory::new(storage).search(&query.movie).await?;
    Ok(Json(sessions))
}

/// Get session by ID
async fn get_session(
    State(storage): State<Storage>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<Session>> {
    let session = SessionDirectory::new(storage).get_by_id(session_id).await?;
    Ok(Json(session))
}

/// List tickets issued for a session
async fn list_session_tickets(
    State(storage): State<Storage>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = SessionDirectory::new(storage)
        .list_tickets(session_id)
        .await?;
    Ok(Json(tickets))
}

/// Book a ticket for a session
async fn book_ticket(
    State(storage): State<Storage>,
    Extension(context): Extension<OperationContext>,
    AppPath(session_id): AppPath<Uuid>,
    AppJson(request): AppJson<BookTicketRequest>,
) -> AppResult<(StatusCode, Json<BookTicketResponse>)> {
    let handler = BookTicketHandler::new(storage);

    let command = BookTicketCommand::new(session_id, request.email.unwrap_or_default());

    let result = handler.execute(command, &context).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookTicketResponse {
            ticket_id: result.ticket_id,
            client_id: result.client_id,
            session_id: result.session_id,
        }),
    ))
}

// =========================================================================
// Clients
// =========================================================================

/// Register a client
async fn register_client(
    State(storage): State<Storage>,
    AppJson(request): AppJson<NewClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = ClientRegistry::new(storage).register(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Get client by ID
async fn get_client(
    State(storage): State<Storage>,
    AppPath(client_id): AppPath<Uuid>,
) -> AppResult<Json<Client>> {
    let client = ClientRegistry::new(storage).get_by_id(client_id).await?;
    Ok(Json(client))
}
