use actix_web::{Responder, get, web};

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::users as users_service;

#[get("/users")]
pub async fn current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        users_service::current_user(repo.get_ref(), &user),
        "load current user",
    )
}
