#[cfg(feature = "ssr")]
mod api_impl {
    use crate::aggregate::reviews_for_instance;
    use crate::app::{ALREADY_RATED_PATH, THANK_YOU_PATH};
    use crate::components::review_form::ReviewForm;
    use crate::components::review_preview::ReviewPreview;
    use crate::components::reviews_list::ReviewsForInstanceView;
    use crate::error::ReviewError;
    use crate::lifecycle::{Destination, Outcome};
    use crate::models::form::ReviewSubmission;
    use crate::models::requester::{Account, Requester};
    use crate::models::review::PublicReviews;
    use crate::models::target::{ContentId, ContentTypeId, TargetRef};
    use crate::state::AppState;
    use actix_web::cookie::Cookie;
    use actix_web::http::header;
    use actix_web::{web, HttpRequest, HttpResponse};
    use leptos::logging::log;
    use leptos::ssr::render_to_string;
    use leptos::*;
    use uuid::Uuid;

    // Set by the host application's authentication layer in front of this service
    pub const USER_ID_HEADER: &str = "x-reviews-user-id";
    pub const USER_NAME_HEADER: &str = "x-reviews-user-name";
    pub const USER_EMAIL_HEADER: &str = "x-reviews-user-email";

    /// Builds the requester from the authentication headers, falling back to
    /// the anonymous session cookie.
    ///
    /// The headers are only read when `trust_auth_headers` is set. Turn that on
    /// only behind a proxy that strips these headers from client requests,
    /// otherwise any client can claim any account.
    pub fn requester_from_request(
        req: &HttpRequest,
        session_cookie: &str,
        trust_auth_headers: bool,
    ) -> Requester {
        let header_value = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let user_id = trust_auth_headers
            .then(|| header_value(USER_ID_HEADER))
            .flatten()
            .and_then(|v| v.parse::<i64>().ok());
        if let Some(id) = user_id {
            return Requester::Authenticated(Account {
                id,
                full_name: header_value(USER_NAME_HEADER).unwrap_or_default(),
                email: header_value(USER_EMAIL_HEADER).unwrap_or_default(),
            });
        }

        Requester::Anonymous {
            session_key: req
                .cookie(session_cookie)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    // Anonymous visitors entering the flow get a session so their review can
    // be tied to them
    fn ensure_session(requester: Requester, session_cookie: &str) -> (Requester, Option<Cookie<'static>>) {
        match requester {
            Requester::Anonymous { session_key: None } => {
                let key = Uuid::new_v4().to_string();
                log!("[API] Starting anonymous review session {}", key);
                let cookie = Cookie::build(session_cookie.to_string(), key.clone())
                    .path("/")
                    .http_only(true)
                    .finish();
                (Requester::anonymous(key), Some(cookie))
            }
            other => (other, None),
        }
    }

    fn html_response(body: String) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body)
    }

    fn redirect(destination: Destination) -> HttpResponse {
        let location = match destination {
            Destination::ThankYou => THANK_YOU_PATH,
            Destination::AlreadyRated => ALREADY_RATED_PATH,
        };
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, location))
            .finish()
    }

    fn respond(outcome: Outcome, cookie: Option<Cookie<'static>>) -> Result<HttpResponse, ReviewError> {
        let mut response = match outcome {
            Outcome::Form(form) => {
                html_response(render_to_string(move || view! { <ReviewForm form=form /> }).to_string())
            }
            Outcome::Preview(preview) => html_response(
                render_to_string(move || view! { <ReviewPreview preview=preview /> })
                    .to_string(),
            ),
            Outcome::Redirect(destination) => redirect(destination),
        };
        if let Some(cookie) = cookie {
            response
                .add_cookie(&cookie)
                .map_err(|e| ReviewError::Render(e.to_string()))?;
        }
        Ok(response)
    }

    fn remote_addr(req: &HttpRequest) -> Option<String> {
        req.peer_addr().map(|addr| addr.ip().to_string())
    }

    // GET /reviews/add/{content_type_id}/{content_id}
    pub async fn add_form(
        state: web::Data<AppState>,
        path: web::Path<(ContentTypeId, ContentId)>,
        req: HttpRequest,
    ) -> Result<HttpResponse, ReviewError> {
        let (content_type_id, content_id) = path.into_inner();
        let requester = state.requester(&req);
        let (requester, cookie) = ensure_session(requester, &state.session_cookie);

        let outcome = state
            .service
            .add_form(TargetRef::new(content_type_id, content_id), &requester, None)
            .await?;
        respond(outcome, cookie)
    }

    // POST /reviews/add/{content_type_id}/{content_id}
    pub async fn submit_form(
        state: web::Data<AppState>,
        path: web::Path<(ContentTypeId, ContentId)>,
        req: HttpRequest,
        form: web::Form<ReviewSubmission>,
    ) -> Result<HttpResponse, ReviewError> {
        let (content_type_id, content_id) = path.into_inner();
        let requester = state.requester(&req);
        let (requester, cookie) = ensure_session(requester, &state.session_cookie);
        log!("[API] Review form posted for {}/{}", content_type_id, content_id);

        let outcome = state
            .service
            .add_form(
                TargetRef::new(content_type_id, content_id),
                &requester,
                Some(form.into_inner()),
            )
            .await?;
        respond(outcome, cookie)
    }

    // POST /reviews/preview
    pub async fn preview(
        state: web::Data<AppState>,
        req: HttpRequest,
        form: web::Form<ReviewSubmission>,
    ) -> Result<HttpResponse, ReviewError> {
        let requester = state.requester(&req);
        let outcome = state.service.preview(&requester, form.into_inner())?;
        respond(outcome, None)
    }

    // POST /reviews/save
    pub async fn reedit_or_save(
        state: web::Data<AppState>,
        req: HttpRequest,
        form: web::Form<ReviewSubmission>,
    ) -> Result<HttpResponse, ReviewError> {
        let requester = state.requester(&req);
        let (requester, cookie) = ensure_session(requester, &state.session_cookie);
        let submission = form.into_inner();
        log!(
            "[API] Review {} for {}/{}",
            if submission.wants_edit() { "edit" } else { "confirmation" },
            submission.content_type_id,
            submission.content_id
        );

        let outcome = state
            .service
            .reedit_or_save(&requester, submission, remote_addr(&req))
            .await?;
        respond(outcome, cookie)
    }

    // GET /reviews/for/{content_type_id}/{content_id}
    pub async fn reviews_fragment(
        state: web::Data<AppState>,
        path: web::Path<(ContentTypeId, ContentId)>,
        req: HttpRequest,
    ) -> Result<HttpResponse, ReviewError> {
        let (content_type_id, content_id) = path.into_inner();
        let target = TargetRef::new(content_type_id, content_id);
        state.service.resolve(&target)?;

        let requester = state.requester(&req);
        let unit = reviews_for_instance(state.service.db(), &requester, &target).await?;
        Ok(html_response(
            render_to_string(move || view! { <ReviewsForInstanceView unit=unit /> })
                .to_string(),
        ))
    }

    // GET /api/reviews/{content_type_id}/{content_id}
    pub async fn reviews_json(
        state: web::Data<AppState>,
        path: web::Path<(ContentTypeId, ContentId)>,
        req: HttpRequest,
    ) -> Result<HttpResponse, ReviewError> {
        let (content_type_id, content_id) = path.into_inner();
        let target = TargetRef::new(content_type_id, content_id);
        state.service.resolve(&target)?;

        let requester = state.requester(&req);
        let unit = reviews_for_instance(state.service.db(), &requester, &target).await?;
        log!(
            "[API] Returning {} reviews for {}/{}",
            unit.reviews.len(),
            content_type_id,
            content_id
        );
        Ok(HttpResponse::Ok().json(PublicReviews::from(&unit)))
    }

    /// Registers the review routes. The outcome pages are leptos routes, see `App`.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/reviews")
                .route("/add/{content_type_id}/{content_id}", web::get().to(add_form))
                .route("/add/{content_type_id}/{content_id}", web::post().to(submit_form))
                .route("/preview", web::post().to(preview))
                .route("/save", web::post().to(reedit_or_save))
                .route("/for/{content_type_id}/{content_id}", web::get().to(reviews_fragment)),
        )
        .route(
            "/api/reviews/{content_type_id}/{content_id}",
            web::get().to(reviews_json),
        );
    }

}

#[cfg(feature = "ssr")]
pub use api_impl::*;
