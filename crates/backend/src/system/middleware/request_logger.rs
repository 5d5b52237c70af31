use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет в лог метод, путь, статус и длительность.
/// Неуспешные ответы (4xx/5xx) идут уровнем warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!("{} {} -> {} ({} ms)", method, path, status.as_u16(), duration);
    } else {
        tracing::info!("{} {} -> {} ({} ms)", method, path, status.as_u16(), duration);
    }

    response
}
