use actix_web::{HttpRequest, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::taxonomy::{GroupForm, ItemForm};
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::care as care_service;

#[get("/care-groups")]
pub async fn list_care_groups(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        care_service::list_care_groups(repo.get_ref(), &user),
        "list care groups",
    )
}

#[post("/care-groups")]
pub async fn create_care_group(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<GroupForm>,
) -> impl Responder {
    respond(
        care_service::create_care_group(repo.get_ref(), &user, form),
        "create care group",
    )
}

#[put("/care-groups/{id}")]
pub async fn update_care_group(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<GroupForm>,
) -> impl Responder {
    respond(
        care_service::update_care_group(repo.get_ref(), &user, id.into_inner(), form),
        "update care group",
    )
}

#[delete("/care-groups/{id}")]
pub async fn delete_care_group(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        care_service::delete_care_group(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa nhóm kết quả chăm sóc",
        "delete care group",
    )
}

#[get("/care-results")]
pub async fn list_care_results(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req)
        .and_then(|query| care_service::list_care_results(repo.get_ref(), &user, &query));
    respond_page(result, "list care results")
}

#[post("/care-results")]
pub async fn create_care_result(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    respond(
        care_service::create_care_result(repo.get_ref(), &user, form),
        "create care result",
    )
}

#[put("/care-results/{id}")]
pub async fn update_care_result(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    respond(
        care_service::update_care_result(repo.get_ref(), &user, id.into_inner(), form),
        "update care result",
    )
}

#[delete("/care-results/{id}")]
pub async fn delete_care_result(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        care_service::delete_care_result(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa kết quả chăm sóc",
        "delete care result",
    )
}
