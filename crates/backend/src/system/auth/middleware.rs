use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use contracts::shared::routes::convert_route_to_entity;
use contracts::system::access::{has_access, AccessOperation};
use contracts::system::auth::TokenClaims;

/// Отказ в доступе на уровне middleware
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("отсутствует или недействителен токен")]
    Unauthorized,
    #[error("операция запрещена для роли")]
    Forbidden,
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let status = match self {
            AccessError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccessError::Forbidden => StatusCode::FORBIDDEN,
        };
        status.into_response()
    }
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, AccessError> {
    let claims = claims_from_headers(req.headers()).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware для бизнес-маршрутов `/api/<segment>/...`: валидирует
/// токен, переводит сегмент пути в имя сущности и проверяет право роли
/// на операцию, соответствующую HTTP-методу. Отказ — всегда 403,
/// скрытая кнопка на клиенте не отменяет серверную проверку.
pub async fn require_entity_access(
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AccessError> {
    let claims = claims_from_headers(req.headers()).await?;

    let segment = entity_segment(req.uri().path()).ok_or(AccessError::Forbidden)?;
    let entity = convert_route_to_entity(segment);
    let operation = operation_for_method(req.method());

    if !has_access(claims.role, &entity, operation) {
        return Err(AccessError::Forbidden);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn claims_from_headers(headers: &HeaderMap) -> Result<TokenClaims, AccessError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AccessError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AccessError::Unauthorized)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| AccessError::Unauthorized)
}

/// Первый сегмент пути после префикса /api/
fn entity_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/api/")?;
    let segment = rest.split('/').next().unwrap_or("");
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// HTTP-метод -> CRUD-операция
fn operation_for_method(method: &Method) -> AccessOperation {
    match *method {
        Method::POST => AccessOperation::Create,
        Method::PUT | Method::PATCH => AccessOperation::Update,
        Method::DELETE => AccessOperation::Delete,
        _ => AccessOperation::Read,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_extraction() {
        assert_eq!(entity_segment("/api/tools"), Some("tools"));
        assert_eq!(
            entity_segment("/api/rental-agreements/42"),
            Some("rental-agreements")
        );
        assert_eq!(entity_segment("/api/"), None);
        assert_eq!(entity_segment("/health"), None);
    }

    #[test]
    fn method_to_operation() {
        assert_eq!(operation_for_method(&Method::GET), AccessOperation::Read);
        assert_eq!(operation_for_method(&Method::POST), AccessOperation::Create);
        assert_eq!(operation_for_method(&Method::PUT), AccessOperation::Update);
        assert_eq!(
            operation_for_method(&Method::DELETE),
            AccessOperation::Delete
        );
    }

    #[test]
    fn access_error_maps_to_http_status() {
        assert_eq!(
            AccessError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccessError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
