use crate::auth::AuthenticatedUser;
use crate::domain::types::EmailAddress;
use crate::dto::CurrentUser;
use crate::repository::EmployeeReader;
use crate::services::{ServiceResult, user_hub};

/// Identity behind the bearer token plus the matching employee record.
///
/// Any valid token may call this; the dashboard uses it to decide which
/// pages to offer.
pub fn current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CurrentUser>
where
    R: EmployeeReader + ?Sized,
{
    let hub_id = user_hub(user)?;

    let employee = match EmailAddress::new(user.email.as_str()) {
        Ok(email) => repo.get_employee_by_email(&email, hub_id)?,
        Err(_) => None,
    };

    Ok(CurrentUser {
        sub: user.sub.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        hub_id: user.hub_id,
        roles: user.roles.clone(),
        employee,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::outsider_user;

    #[test]
    fn token_without_roles_still_sees_itself() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_email()
            .withf(|email, hub| email.as_str() == "outsider@example.com" && hub.get() == 42)
            .times(1)
            .returning(|_, _| Ok(None));

        let current = current_user(&repo, &outsider_user()).unwrap();

        assert_eq!(current.hub_id, 42);
        assert!(current.roles.is_empty());
        assert!(current.employee.is_none());
    }
}
