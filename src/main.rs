use actix_web::{web, App, HttpServer};

use belote_server::state::AppState;
use belote_server::{health, telemetry, ws};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    let app_state = AppState::new();

    tracing::info!(port, "starting belote-server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(health::configure)
            .route("/ws", web::get().to(ws::session::upgrade))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
