use super::*;
use actix_web::HttpResponse;
use actix_web::web;

pub async fn login(
    authority: web::Data<Authority>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    authority
        .login(&req.email, &req.password)
        .await
        .map(LoginResponse::from)
        .map(|response| HttpResponse::Ok().json(response))
}

pub async fn logout(
    authority: web::Data<Authority>,
    req: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AuthError> {
    authority
        .logout(&req.token)
        .await
        .map(|()| HttpResponse::Ok().json(LogoutResponse { success: true }))
}

pub async fn validate(
    authority: web::Data<Authority>,
    req: web::Json<ValidateRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(ValidateResponse::from(authority.validate(&req.token).await))
}

/// Mounts the authentication endpoints on the enclosing scope.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/validate", web::post().to(validate));
}
