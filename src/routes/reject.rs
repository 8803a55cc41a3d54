use actix_web::{HttpRequest, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::taxonomy::{GroupForm, ItemForm};
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::reject as reject_service;

#[get("/reject-groups")]
pub async fn list_reject_groups(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        reject_service::list_reject_groups(repo.get_ref(), &user),
        "list reject groups",
    )
}

#[post("/reject-groups")]
pub async fn create_reject_group(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<GroupForm>,
) -> impl Responder {
    respond(
        reject_service::create_reject_group(repo.get_ref(), &user, form),
        "create reject group",
    )
}

#[put("/reject-groups/{id}")]
pub async fn update_reject_group(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<GroupForm>,
) -> impl Responder {
    respond(
        reject_service::update_reject_group(repo.get_ref(), &user, id.into_inner(), form),
        "update reject group",
    )
}

#[delete("/reject-groups/{id}")]
pub async fn delete_reject_group(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        reject_service::delete_reject_group(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa nhóm lý do từ chối",
        "delete reject group",
    )
}

#[get("/reject-reasons")]
pub async fn list_reject_reasons(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req)
        .and_then(|query| reject_service::list_reject_reasons(repo.get_ref(), &user, &query));
    respond_page(result, "list reject reasons")
}

#[post("/reject-reasons")]
pub async fn create_reject_reason(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    respond(
        reject_service::create_reject_reason(repo.get_ref(), &user, form),
        "create reject reason",
    )
}

#[put("/reject-reasons/{id}")]
pub async fn update_reject_reason(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    respond(
        reject_service::update_reject_reason(repo.get_ref(), &user, id.into_inner(), form),
        "update reject reason",
    )
}

#[delete("/reject-reasons/{id}")]
pub async fn delete_reject_reason(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        reject_service::delete_reject_reason(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa lý do từ chối",
        "delete reject reason",
    )
}
