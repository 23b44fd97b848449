use openpolicy::configuration::get_configuration;
use openpolicy::startup::run;
use openpolicy::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("openpolicy".into(), "info".into());
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");
    tracing::info!(
        locale = %settings.locale,
        upstream = ?settings.upstream,
        "Configuration loaded"
    );

    let address = settings.address();
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address).expect(&format!("failed to bind to {}", address));

    run(listener, settings).await?.await
}
