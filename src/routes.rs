//! HTTP handlers for the review pages.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Key;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use log::{error, info, warn};

use crate::app;
use crate::config::{Settings, DEFAULT_MAIL_TIMEOUT};
use crate::db::Database;
use crate::flash;
use crate::models::flash::FlashMessage;
use crate::models::review::ReviewInput;
use crate::notifier::{self, Notifier};
use crate::validation::{self, ValidationErrors};

pub const SUBMIT_SUCCESS: &str = "Your review has been submitted successfully!";
pub const SUBMIT_FAILED: &str =
    "An error occurred while submitting your review. Please try again.";

/// Read-only state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notifier: Arc<dyn Notifier>,
    pub flash_key: Key,
    pub notify_timeout: Duration,
}

impl AppState {
    pub fn new(db: Database, notifier: Arc<dyn Notifier>, secret_key: &str) -> Self {
        AppState {
            db,
            notifier,
            flash_key: flash::signing_key(secret_key),
            notify_timeout: DEFAULT_MAIL_TIMEOUT,
        }
    }

    pub fn from_settings(db: Database, notifier: Arc<dyn Notifier>, settings: &Settings) -> Self {
        let state = Self::new(db, notifier, &settings.secret_key);
        match &settings.mail {
            Some(mail) => state.with_notify_timeout(mail.timeout),
            None => state,
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(
            web::resource("/submit")
                .route(web::get().to(submit_form))
                .route(web::post().to(submit_review)),
        )
        .service(web::resource("/prompt").route(web::get().to(prompt)));
}

fn html(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponseBuilder::new(status);
    builder.content_type(ContentType::html());
    builder
}

/// Renders a page, consuming any pending flash message.
fn page(
    req: &HttpRequest,
    state: &AppState,
    status: StatusCode,
    render: impl FnOnce(Option<FlashMessage>) -> String,
) -> HttpResponse {
    let (pending, had_cookie) = flash::take(req, &state.flash_key);
    let mut builder = html(status);
    if had_cookie {
        flash::clear(&mut builder);
    }
    builder.body(render(pending))
}

// GET /
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match state.db.list_reviews().await {
        Ok(reviews) => page(&req, &state, StatusCode::OK, |flash| {
            app::render_index(reviews, flash)
        }),
        Err(err) => {
            error!("[INDEX] Failed to fetch reviews: {}", err);
            html(StatusCode::INTERNAL_SERVER_ERROR).body(app::render_error())
        }
    }
}

// GET /submit
pub async fn submit_form(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    page(&req, &state, StatusCode::OK, |flash| {
        app::render_submit(ReviewInput::default(), ValidationErrors::default(), flash)
    })
}

// POST /submit
pub async fn submit_review(
    state: web::Data<AppState>,
    form: web::Form<ReviewInput>,
) -> HttpResponse {
    let input = form.into_inner();

    let review = match validation::validate(&input) {
        Ok(review) => review,
        Err(errors) => {
            info!("[SUBMIT] Rejected submission with {} error(s)", errors.len());
            return html(StatusCode::OK).body(app::render_submit(input, errors, None));
        }
    };

    let stored = match state.db.create_review(&review).await {
        Ok(stored) => stored,
        Err(err) => {
            error!("[SUBMIT] Could not store review: {}", err);
            let flash = FlashMessage::danger(SUBMIT_FAILED);
            return html(StatusCode::OK).body(app::render_submit(
                input,
                ValidationErrors::default(),
                Some(flash),
            ));
        }
    };

    // The review is committed from here on; mail problems are only logged.
    if let Err(err) =
        notifier::dispatch(state.notifier.as_ref(), &stored, state.notify_timeout).await
    {
        warn!("[NOTIFY] Admin notification for {} failed: {}", stored, err);
    }

    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, "/prompt"));
    flash::set(
        &mut builder,
        &state.flash_key,
        &FlashMessage::success(SUBMIT_SUCCESS),
    );
    builder.finish()
}

// GET /prompt
pub async fn prompt(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    page(&req, &state, StatusCode::OK, app::render_prompt)
}
