//! Payloads shared by the two group/item taxonomies (care results and
//! reject reasons).

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{GroupName, TaxonomyItemName};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct GroupForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct GroupPayload {
    pub name: GroupName,
    pub description: Option<String>,
}

impl TryFrom<GroupForm> for GroupPayload {
    type Error = FormError;

    fn try_from(form: GroupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: GroupName::new(form.name)?,
            description: non_blank(form.description),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ItemForm {
    #[validate(range(min = 1))]
    pub group_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Item fields; the group id is typed by the owning service.
#[derive(Debug)]
pub struct ItemPayload {
    pub group_id: i32,
    pub name: TaxonomyItemName,
    pub is_active: bool,
}

impl TryFrom<ItemForm> for ItemPayload {
    type Error = FormError;

    fn try_from(form: ItemForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            group_id: form.group_id,
            name: TaxonomyItemName::new(form.name)?,
            is_active: form.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_description_blank_is_dropped() {
        let payload = GroupPayload::try_from(GroupForm {
            name: " Gọi điện ".into(),
            description: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(payload.name.as_str(), "Gọi điện");
        assert_eq!(payload.description, None);
    }

    #[test]
    fn item_requires_a_group() {
        let form: ItemForm = serde_json::from_str(r#"{"group_id":0,"name":"Hẹn gọi lại"}"#).unwrap();
        assert!(matches!(
            ItemPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
