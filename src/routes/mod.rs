use actix_web::http::header;
use actix_web::{HttpResponse, web};
use tera::{Context, Tera};

pub mod api;
pub mod main;

/// Register every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api::verify_certificate)
            .service(api::add_certificates)
            .service(api::upload_certificates),
    )
    .service(main::index)
    .service(main::show_verify_page)
    .service(main::verify_certificate)
    .service(main::download_certificate);
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn base_context(current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("current_page", current_page);
    context
}
