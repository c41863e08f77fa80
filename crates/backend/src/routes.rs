use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api::handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES (role check per entity/operation)
        // ========================================
        .merge(business_routes())
}

/// Бизнес-маршруты. Каждый запрос проходит через require_entity_access:
/// сегмент пути переводится в имя сущности, HTTP-метод — в операцию.
fn business_routes() -> Router {
    Router::new()
        // A001 Company handlers
        .route(
            "/api/companies",
            get(handlers::a001_company::list).post(handlers::a001_company::create),
        )
        .route(
            "/api/companies/:id",
            get(handlers::a001_company::get_by_id)
                .put(handlers::a001_company::update)
                .delete(handlers::a001_company::delete),
        )
        // A002 App user handlers
        .route(
            "/api/users",
            get(handlers::a002_app_user::list).post(handlers::a002_app_user::create),
        )
        .route(
            "/api/users/:id",
            get(handlers::a002_app_user::get_by_id)
                .put(handlers::a002_app_user::update)
                .delete(handlers::a002_app_user::delete),
        )
        // A003 Tool handlers
        .route(
            "/api/tools",
            get(handlers::a003_tool::list).post(handlers::a003_tool::create),
        )
        .route(
            "/api/tools/:id",
            get(handlers::a003_tool::get_by_id)
                .put(handlers::a003_tool::update)
                .delete(handlers::a003_tool::delete),
        )
        // A004 Rental agreement handlers
        .route(
            "/api/rental-agreements",
            get(handlers::a004_rental_agreement::list).post(handlers::a004_rental_agreement::create),
        )
        .route(
            "/api/rental-agreements/:id",
            get(handlers::a004_rental_agreement::get_by_id)
                .put(handlers::a004_rental_agreement::update)
                .delete(handlers::a004_rental_agreement::delete),
        )
        .layer(middleware::from_fn(
            system::auth::middleware::require_entity_access,
        ))
}
