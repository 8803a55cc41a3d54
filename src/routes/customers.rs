use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::envelope::ApiResponse;
use crate::forms::customers::{CustomerForm, UploadCustomersForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, list_query, respond, respond_done, respond_page};
use crate::services::customers as customers_service;

#[get("/customers")]
pub async fn list_customers(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req)
        .and_then(|query| customers_service::list_customers(repo.get_ref(), &user, &query));
    respond_page(result, "list customers")
}

#[get("/customers/{id}")]
pub async fn show_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        customers_service::get_customer(repo.get_ref(), &user, id.into_inner()),
        "load customer",
    )
}

#[post("/customers")]
pub async fn create_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    respond(
        customers_service::create_customer(repo.get_ref(), &user, form),
        "create customer",
    )
}

#[put("/customers/{id}")]
pub async fn update_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    respond(
        customers_service::update_customer(repo.get_ref(), &user, id.into_inner(), form),
        "update customer",
    )
}

#[delete("/customers/{id}")]
pub async fn delete_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        customers_service::delete_customer(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa khách hàng",
        "delete customer",
    )
}

#[post("/customers/upload")]
pub async fn upload_customers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCustomersForm>,
) -> impl Responder {
    match customers_service::upload_customers(repo.get_ref(), &user, &form) {
        Ok(created) => HttpResponse::Ok().json(
            ApiResponse::ok(created).with_message(format!("Đã nhập {created} khách hàng")),
        ),
        Err(err) => error_response(err, "upload customers"),
    }
}
