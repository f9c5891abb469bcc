use actix_web::{web, App, HttpServer, HttpResponse, HttpRequest, ResponseError, middleware};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::config::ServerConfig;
use crate::display::format_windows_message;
use crate::error::PollError;
use crate::form::{
    export_submission_to_csv, validate_submission, write_responses_to_csv, VoteSubmission,
    VoteSubmissionRequest,
};
use crate::parser::parse_responses_csv;
use crate::schedule::{availability_grid, find_best_windows, GridCell, PollGrid, Response, WindowScore};

type HandlerResult = Result<HttpResponse, PollError>;

/// A poll and the responses collected for it
#[derive(Debug, Clone)]
pub struct PollRecord {
    pub poll: PollGrid,
    pub responses: Vec<Response>,
}

impl PollRecord {
    /// Adds a response, replacing any earlier one from the same user in place
    pub fn upsert_response(&mut self, response: Response) {
        match self.responses.iter().position(|r| r.user_id == response.user_id) {
            Some(index) => self.responses[index] = response,
            None => self.responses.push(response),
        }
    }
}

// In-memory storage for polls (the ranking engine never sees this state)
pub struct AppState {
    pub polls: Mutex<HashMap<String, PollRecord>>,
    // Orders writes to the response logs; taken before `polls`, never while holding it
    log_writes: Mutex<()>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            polls: Mutex::new(HashMap::new()),
            log_writes: Mutex::new(()),
            config,
        }
    }

    fn polls(&self) -> Result<MutexGuard<'_, HashMap<String, PollRecord>>, PollError> {
        self.polls
            .lock()
            .map_err(|_| PollError::Internal("poll store lock poisoned".to_string()))
    }

    fn log_writes(&self) -> Result<MutexGuard<'_, ()>, PollError> {
        self.log_writes
            .lock()
            .map_err(|_| PollError::Internal("response log lock poisoned".to_string()))
    }

    fn grid(&self, poll_id: &str) -> Result<PollGrid, PollError> {
        self.polls()?
            .get(poll_id)
            .map(|record| record.poll.clone())
            .ok_or_else(|| PollError::PollNotFound(poll_id.to_string()))
    }

    /// Writes a response log, then applies `update` to the stored poll
    ///
    /// The file write runs without the poll store lock, so readers are never
    /// blocked on disk I/O.
    fn write_log_then_update<T>(
        &self,
        poll_id: &str,
        write: impl FnOnce() -> Result<(), PollError>,
        update: impl FnOnce(&mut PollRecord) -> T,
    ) -> Result<T, PollError> {
        let _log = self.log_writes()?;
        write()?;
        let mut polls = self.polls()?;
        let record = polls
            .get_mut(poll_id)
            .ok_or_else(|| PollError::PollNotFound(poll_id.to_string()))?;
        Ok(update(record))
    }

    /// Clones one poll's snapshot so ranking runs without holding the lock
    fn snapshot(&self, poll_id: &str) -> Result<PollRecord, PollError> {
        self.polls()?
            .get(poll_id)
            .cloned()
            .ok_or_else(|| PollError::PollNotFound(poll_id.to_string()))
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTimesResponse {
    pub poll_id: String,
    pub respondents: usize,
    pub windows: Vec<WindowScore>,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub poll_id: String,
    pub poll: PollGrid,
    pub respondents: usize,
    pub cells: Vec<GridCell>,
    pub best_windows: Vec<WindowScore>,
}

impl ResponseError for PollError {
    fn status_code(&self) -> StatusCode {
        match self {
            PollError::InvalidPoll(_)
            | PollError::InvalidSubmission(_)
            | PollError::Csv(_)
            | PollError::Json(_) => StatusCode::BAD_REQUEST,
            PollError::PollNotFound(_) => StatusCode::NOT_FOUND,
            PollError::Io(_) | PollError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    req.headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .map(|password| password == state.config.admin_password)
        .unwrap_or(false)
}

// Runs file work on actix's blocking pool
async fn blocking<T, F>(work: F) -> Result<T, PollError>
where
    F: FnOnce() -> Result<T, PollError> + Send + 'static,
    T: Send + 'static,
{
    web::block(work)
        .await
        .map_err(|e| PollError::Internal(e.to_string()))?
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    if req.password == state.config.admin_password {
        HttpResponse::Ok().json(serde_json::json!({"success": true}))
    } else {
        HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"}))
    }
}

// Create or replace a poll grid
async fn put_poll(
    req: HttpRequest,
    poll_id: web::Path<String>,
    poll: web::Json<PollGrid>,
    state: web::Data<AppState>,
) -> HandlerResult {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }

    let poll = poll.into_inner();
    poll.validate()?;

    let poll_id = poll_id.into_inner();
    let mut polls = state.polls()?;
    match polls.get_mut(&poll_id) {
        // Votes on cells the new grid no longer has are simply never looked up
        Some(record) => record.poll = poll,
        None => {
            polls.insert(poll_id.clone(), PollRecord { poll, responses: Vec::new() });
        }
    }
    log::info!("Poll {} saved", poll_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "pollId": poll_id})))
}

// Admin CSV upload endpoint: replaces all responses of a poll
async fn upload_responses(
    req: HttpRequest,
    poll_id: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HandlerResult {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }

    let poll_id = poll_id.into_inner();
    let responses = parse_responses_csv(&body)?;
    // unknown polls are rejected before anything touches the disk
    state.grid(&poll_id)?;

    let count = responses.len();
    let csv_path = state.config.responses_csv(&poll_id);
    let id = poll_id.clone();
    blocking(move || {
        // The log is rewritten from the parsed rows so later votes append cleanly
        state.write_log_then_update(
            &id,
            || write_responses_to_csv(&responses, &csv_path),
            |record| record.responses = responses.clone(),
        )
    })
    .await?;
    log::info!("Loaded {} responses for poll {} from upload", count, poll_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Loaded {} responses", count)
    })))
}

// Vote submission endpoint (new or resubmission)
async fn submit_response(
    poll_id: web::Path<String>,
    req: web::Json<VoteSubmissionRequest>,
    state: web::Data<AppState>,
) -> HandlerResult {
    let poll_id = poll_id.into_inner();
    let poll = state.grid(&poll_id)?;

    if let Err(e) = validate_submission(&req, &poll) {
        log::warn!("Rejected submission for poll {}: {}", poll_id, e);
        return Err(e);
    }

    let submission = VoteSubmission::from_request(req.into_inner());
    let user_id = submission.user_id.clone();
    let csv_path = state.config.responses_csv(&poll_id);
    let id = poll_id.clone();
    let respondents = blocking(move || {
        state.write_log_then_update(
            &id,
            || export_submission_to_csv(&submission, &poll, &csv_path),
            |record| {
                record.upsert_response(submission.to_response());
                record.responses.len()
            },
        )
    })
    .await?;
    log::info!("Recorded response from {} for poll {}", user_id, poll_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "respondents": respondents
    })))
}

// Ranked windows plus the chat message rendering of them
async fn get_best_times(
    poll_id: web::Path<String>,
    state: web::Data<AppState>,
) -> HandlerResult {
    let poll_id = poll_id.into_inner();
    let record = state.snapshot(&poll_id)?;

    let windows = find_best_windows(&record.poll, &record.responses);
    let respondents = record.responses.len();
    log::debug!("Poll {}: {} ranked windows from {} responses", poll_id, windows.len(), respondents);

    Ok(HttpResponse::Ok().json(BestTimesResponse {
        message: format_windows_message(&windows, respondents),
        poll_id,
        respondents,
        windows,
    }))
}

// Heat grid for the poll page, with the same ranking as the chat message
async fn get_grid(
    poll_id: web::Path<String>,
    state: web::Data<AppState>,
) -> HandlerResult {
    let poll_id = poll_id.into_inner();
    let record = state.snapshot(&poll_id)?;

    let cells = availability_grid(&record.poll, &record.responses);
    let best_windows = find_best_windows(&record.poll, &record.responses);

    Ok(HttpResponse::Ok().json(GridResponse {
        poll_id,
        respondents: record.responses.len(),
        poll: record.poll,
        cells,
        best_windows,
    }))
}

/// Registers every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/polls/{id}", web::put().to(put_poll))
        .route("/api/polls/{id}/upload", web::post().to(upload_responses))
        .route("/api/polls/{id}/responses", web::post().to(submit_response))
        .route("/api/polls/{id}/best-times", web::get().to(get_best_times))
        .route("/api/polls/{id}/grid", web::get().to(get_grid));
}

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let port = config.port;
    let app_state = web::Data::new(AppState::new(config));

    log::info!("Starting web server on http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
