use actix_web::{HttpRequest, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::quotations::QuotationForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::quotations as quotations_service;

#[get("/quotations")]
pub async fn list_quotations(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req)
        .and_then(|query| quotations_service::list_quotations(repo.get_ref(), &user, &query));
    respond_page(result, "list quotations")
}

#[get("/quotations/{id}")]
pub async fn show_quotation(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        quotations_service::get_quotation(repo.get_ref(), &user, id.into_inner()),
        "load quotation",
    )
}

#[post("/quotations")]
pub async fn create_quotation(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<QuotationForm>,
) -> impl Responder {
    respond(
        quotations_service::create_quotation(
            repo.get_ref(),
            &user,
            form,
            server_config.default_tax_rate,
        ),
        "create quotation",
    )
}

#[put("/quotations/{id}")]
pub async fn update_quotation(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<QuotationForm>,
) -> impl Responder {
    respond(
        quotations_service::update_quotation(repo.get_ref(), &user, id.into_inner(), form),
        "update quotation",
    )
}

#[delete("/quotations/{id}")]
pub async fn delete_quotation(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        quotations_service::delete_quotation(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa báo giá",
        "delete quotation",
    )
}
