//! Minimal liveness probe (§6 Expansion): no game state, no payload.

use actix_web::{get, HttpResponse, Responder};

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().finish()
}

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(healthz);
}
