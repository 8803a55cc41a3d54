use actix_web::{HttpRequest, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::employees::EmployeeForm;
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::employees as employees_service;

#[get("/employees")]
pub async fn list_employees(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req)
        .and_then(|query| employees_service::list_employees(repo.get_ref(), &user, &query));
    respond_page(result, "list employees")
}

#[get("/employees/{id}")]
pub async fn show_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        employees_service::get_employee(repo.get_ref(), &user, id.into_inner()),
        "load employee",
    )
}

#[post("/employees")]
pub async fn create_employee(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> impl Responder {
    respond(
        employees_service::create_employee(repo.get_ref(), &user, form),
        "create employee",
    )
}

#[put("/employees/{id}")]
pub async fn update_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> impl Responder {
    respond(
        employees_service::update_employee(repo.get_ref(), &user, id.into_inner(), form),
        "update employee",
    )
}

#[delete("/employees/{id}")]
pub async fn delete_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        employees_service::delete_employee(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa nhân viên",
        "delete employee",
    )
}
