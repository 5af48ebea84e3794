use actix_web::web;

pub mod summarize;
pub mod system;
pub mod upload;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system::root)
        .service(system::health)
        .service(system::api_health)
        .service(summarize::summarize_text)
        .service(upload::upload);
}
