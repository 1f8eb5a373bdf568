//! REST facade over the lyrics and movie services

use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{error, web, App, HttpServer};
use tracing::info;

use crate::services::AppServices;

pub mod handlers;

/// Register every route. `/api/movies/search` must come before `/api/movies/{id}`.
///
/// Query and path extraction failures answer with the JSON error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = handlers::error_response(StatusCode::BAD_REQUEST, err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = handlers::error_response(StatusCode::BAD_REQUEST, err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .service(handlers::health)
    .service(handlers::lyrics_lookup)
    .service(handlers::movies_search)
    .service(handlers::movie_details)
    .service(handlers::cache_stats)
    .service(handlers::cache_clear);
}

pub async fn run_server(services: AppServices) -> std::io::Result<()> {
    let config = services.config();
    let data = web::Data::new(services);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::new("%r %s %b %Dms"))
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let (address, port) = config.bind_addr();
    let server = server.bind((address.as_str(), port))?;
    info!("Listening on http://{}:{}", address, port);

    server.run().await
}
