use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, post, web};

use crate::dto::certificates::{AddCertificatesRequest, ErrorResponse, VerifyCertificateRequest};
use crate::forms::upload::{UploadCertificatesForm, parse_upload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::certificates::{
    add_certificates as add_certificates_service, authorize_passkey,
    verify_certificate as verify_certificate_service,
};

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        ServiceError::Unauthorized => {
            HttpResponse::Forbidden().json(ErrorResponse::new("Invalid passkey"))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("Certificate not found"))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(ErrorResponse::new(message))
        }
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

#[post("/verify-certificate")]
pub async fn verify_certificate(
    body: web::Json<VerifyCertificateRequest>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match verify_certificate_service(body.into_inner(), repo.get_ref()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response(err),
    }
}

#[post("/add-certificates")]
pub async fn add_certificates(
    body: web::Json<AddCertificatesRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match add_certificates_service(body.into_inner(), &config.admin_passkey, repo.get_ref()) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(err) => error_response(err),
    }
}

#[post("/upload-certificates")]
pub async fn upload_certificates(
    MultipartForm(mut form): MultipartForm<UploadCertificatesForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    // Same precedence as the JSON endpoint: authorization first.
    if let Err(err) = authorize_passkey(&form.passkey, &config.admin_passkey) {
        return error_response(err);
    }

    let certificates = match parse_upload(&mut form) {
        Ok(certificates) => certificates,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    };

    let request = AddCertificatesRequest {
        certificates: Some(certificates),
        passkey: form.passkey.into_inner(),
    };
    match add_certificates_service(request, &config.admin_passkey, repo.get_ref()) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(err) => error_response(err),
    }
}
