use actix_web::{HttpRequest, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::service_prices::ServicePriceForm;
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::service_prices as service_prices_service;

#[get("/services")]
pub async fn list_service_prices(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req).and_then(|query| {
        service_prices_service::list_service_prices(repo.get_ref(), &user, &query)
    });
    respond_page(result, "list services")
}

#[post("/services")]
pub async fn create_service_price(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ServicePriceForm>,
) -> impl Responder {
    respond(
        service_prices_service::create_service_price(repo.get_ref(), &user, form),
        "create service",
    )
}

#[put("/services/{id}")]
pub async fn update_service_price(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ServicePriceForm>,
) -> impl Responder {
    respond(
        service_prices_service::update_service_price(repo.get_ref(), &user, id.into_inner(), form),
        "update service",
    )
}

#[delete("/services/{id}")]
pub async fn delete_service_price(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        service_prices_service::delete_service_price(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa dịch vụ",
        "delete service",
    )
}
