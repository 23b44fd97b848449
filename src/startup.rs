use crate::configuration::Settings;
use crate::connectors;
use crate::helpers::ErrorResponse;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

pub async fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let connector = connectors::init_upstream(&settings.upstream)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    run_with_connector(listener, settings, connector)
}

/// Same as [`run`] with an explicit upstream connector.
pub fn run_with_connector(
    listener: TcpListener,
    settings: Settings,
    connector: Arc<dyn connectors::CompletionConnector>,
) -> Result<Server, std::io::Error> {
    let connector = web::Data::new(connector);
    let failure_message = settings.locale.texts().upstream_failed;
    let settings = web::Data::new(settings);

    // A body that does not parse is reported like any other proxy failure.
    let json_config = web::JsonConfig::default().error_handler(move |err, _req| {
        tracing::error!(error = %err, "Malformed chat request body");
        ErrorResponse::internal_server_error(failure_message)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/api").service(routes::chat_handler))
            .app_data(json_config.clone())
            .app_data(connector.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
