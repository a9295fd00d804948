use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};
use tera::Tera;

use crate::domain::types::CertificateNumber;
use crate::dto::certificates::VerifyCertificateRequest;
use crate::forms::certificates::{VerifyCertificateForm, VerifyCertificateFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::certificates::{
    download_certificate as download_certificate_service,
    verify_certificate as verify_certificate_service,
};
use crate::services::pdf::CertificateStamper;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/verify")
}

#[get("/verify")]
pub async fn show_verify_page(tera: web::Data<Tera>) -> impl Responder {
    let context = base_context("verify");
    render_template(&tera, "verify/index.html", &context)
}

#[post("/verify")]
pub async fn verify_certificate(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<VerifyCertificateForm>,
) -> impl Responder {
    let mut context = base_context("verify");

    let payload: VerifyCertificateFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(_) => {
            context.insert("error", "Please enter a certificate number");
            return render_template(&tera, "verify/index.html", &context);
        }
    };

    context.insert("certificate_number", payload.certificate_number.as_str());
    let request = VerifyCertificateRequest {
        certificate_number: payload.certificate_number.into(),
    };
    match verify_certificate_service(request, repo.get_ref()) {
        Ok(result) => {
            context.insert("result", &result);
            render_template(&tera, "verify/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to verify certificate from the form: {err}");
            context.insert("error", "Unique Certificate Number is Invalid.");
            render_template(&tera, "verify/index.html", &context)
        }
    }
}

#[get("/verify/{certificate_number}/download")]
pub async fn download_certificate(
    certificate_number: web::Path<String>,
    repo: web::Data<DieselRepository>,
    stamper: web::Data<CertificateStamper>,
) -> impl Responder {
    let number = match CertificateNumber::new(certificate_number.into_inner()) {
        Ok(number) => number,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match download_certificate_service(&number, repo.get_ref(), stamper.get_ref()) {
        Ok(stamped) => HttpResponse::Ok()
            .content_type(stamped.content_type)
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", stamped.file_name),
            ))
            .body(stamped.bytes),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to produce a certificate download: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
