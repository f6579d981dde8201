//! Front-end controllers: thin adapters between HTTP and the shared core.
//!
//! Three router builders, one per variant. All of them read through the
//! filter engine and write through the validation policy and the store;
//! none of them carry any logic of their own beyond translation.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};
use tracing::{info, warn};

use crate::{
    error::AppError,
    filter::{self, FilterParams},
    inventory::Car,
    session,
    state::AppState,
    validate::{self, CarForm},
};

/// Listing payload: the matching cars plus the filters that produced them,
/// echoed back so the view layer can re-fill its controls.
#[derive(Serialize)]
pub struct InventoryPage {
    pub cars: Vec<Car>,
    pub filters: FilterParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<InventoryPage> {
    let filters = FilterParams::from_query(&params);
    let cars = filter::filter(&state.store.list(), &filters);

    Json(InventoryPage { cars, filters })
}

pub async fn car_details_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Car>, AppError> {
    state.store.get(id).map(Json).ok_or(AppError::NotFound(id))
}

/// Blank form model for the add page.
pub async fn add_car_form_handler() -> Json<CarForm> {
    Json(CarForm::default())
}

pub async fn add_car_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CarForm>,
) -> Result<Redirect, AppError> {
    let fields = validate::validate(&form, validate::current_year())
        .map_err(|messages| AppError::Validation { messages })?;

    let car = state.store.add(fields)?;
    info!(id = car.id, make = %car.make, model = %car.model, "Car added");

    Ok(Redirect::to("/"))
}

/// Pre-filled form data for the edit page. An absent id sends the caller
/// back to the listing instead of erroring.
pub async fn edit_car_form_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    match state.store.get(id) {
        Some(car) => Json(car).into_response(),
        None => Redirect::to("/").into_response(),
    }
}

pub async fn edit_car_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Form(form): Form<CarForm>,
) -> Result<Response, AppError> {
    let fields = validate::validate(&form, validate::current_year())
        .map_err(|messages| AppError::Validation { messages })?;

    match state.store.update(id, fields) {
        Ok(car) => {
            info!(id = car.id, "Car updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::NotFound(_)) => Ok(Redirect::to("/").into_response()),
        Err(err) => Err(err),
    }
}

/// Idempotent: deleting an id that is not on the lot is a quiet no-op.
pub async fn delete_car_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    if state.store.remove(id)? {
        info!(id, "Car deleted");
    }

    Ok(Redirect::to("/"))
}

pub async fn login_form_handler() -> impl IntoResponse {
    (StatusCode::OK, "Admin login")
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username == state.config.admin_username
        && form.password == state.config.admin_password
    {
        let token = state.sessions.issue(&form.username);
        info!(username = %form.username, "Admin logged in");

        (
            [(header::SET_COOKIE, session::session_cookie(&token))],
            Redirect::to("/"),
        )
            .into_response()
    } else {
        warn!("Rejected login attempt");
        Redirect::to("/login").into_response()
    }
}

pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session::token_from_headers(&headers) {
        state.sessions.revoke(&token);
    }

    (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

/// Mutating routes behind this never run without a live session; the
/// request is redirected to the login endpoint instead.
async fn require_login(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let logged_in = session::token_from_headers(request.headers())
        .is_some_and(|token| state.sessions.username(&token).is_some());

    if logged_in {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Seller front-end: the full CRUD surface, ungated.
pub fn seller_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/add_car", get(add_car_form_handler).post(add_car_handler))
        .route(
            "/edit_car/:id",
            get(edit_car_form_handler).post(edit_car_handler),
        )
        .route("/delete_car/:id", post(delete_car_handler))
        .with_state(state)
}

/// Customer front-end: read-only browsing.
pub fn customer_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(list_handler))
        .route("/car_details/:id", get(car_details_handler))
        .layer(cors)
        .with_state(state)
}

/// Gateway front-end: embeddable, with every mutating route behind the
/// admin session gate.
pub fn gateway_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route(
            "/admin/add_car",
            get(add_car_form_handler).post(add_car_handler),
        )
        .route(
            "/admin/edit_car/:id",
            get(edit_car_form_handler).post(edit_car_handler),
        )
        .route("/admin/delete_car/:id", post(delete_car_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_login,
        ));

    Router::new()
        .route("/", get(list_handler))
        .route("/login", get(login_form_handler).post(login_handler))
        .route("/logout", get(logout_handler))
        .merge(admin)
        // The host page embeds this variant in an iframe.
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("ALLOWALL"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("frame-ancestors *"),
        ))
        .with_state(state)
}
