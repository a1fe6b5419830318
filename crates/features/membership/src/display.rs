use crate::user_group::UserGroup;
use bo_derive::api_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use typed_builder::TypedBuilder;

/// Account state shown next to the user name.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum UserState {
    #[default]
    Active,
    Disabled,
    LockedOut,
    /// Invited but has not logged in yet.
    Invited,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NotificationType {
    Save,
    #[default]
    Info,
    Error,
    Success,
    Warning,
}

/// A message displayed by the edit form after loading or saving.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Notification {
    pub header: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
}

impl Notification {
    pub fn new(
        header: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self { header: header.into(), message: message.into(), notification_type }
    }
}

/// Everything the user edit form needs, flattened into one JSON document.
///
/// The `available_*` maps go from persistence alias to display name.
#[api_model]
#[derive(Clone, PartialEq, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct UserDisplay {
    pub id: i32,
    pub name: String,
    #[builder(default)]
    pub icon: Option<String>,
    #[builder(default)]
    pub alias: Option<String>,
    #[builder(default = -1)]
    pub parent_id: i32,
    #[builder(default)]
    pub path: String,
    #[builder(default)]
    pub trashed: bool,
    #[builder(default)]
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub additional_data: BTreeMap<String, Value>,

    pub email: String,
    /// Hex SHA-256 of the normalised email, for gravatar lookups
    #[builder(default = email_hash(&email))]
    pub email_hash: String,
    #[builder(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    #[builder(default)]
    pub custom_avatar: Option<String>,
    #[builder(default)]
    pub user_state: UserState,
    pub culture: String,

    /// Aliases of the groups the user belongs to
    #[builder(default)]
    pub user_groups: Vec<String>,
    #[builder(default)]
    pub available_user_groups: BTreeMap<String, String>,
    #[builder(default)]
    pub available_cultures: BTreeMap<String, String>,

    #[builder(default = -1)]
    pub start_content_id: i32,
    #[builder(default = -1)]
    pub start_media_id: i32,

    #[builder(default)]
    pub allowed_sections: Vec<String>,
    #[builder(default)]
    pub available_sections: BTreeMap<String, String>,

    #[builder(default)]
    pub notifications: Vec<Notification>,
}

impl UserDisplay {
    /// Appends a notification for the form to show.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Lowercase hex SHA-256 of the trimmed, lowercased address.
#[must_use]
pub fn email_hash(email: &str) -> String {
    hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
}

/// Alias to name lookup of `groups`, suitable for [`UserDisplay::available_user_groups`].
#[must_use]
pub fn available_user_groups(groups: &[UserGroup]) -> BTreeMap<String, String> {
    groups.iter().map(|g| (g.alias().to_owned(), g.name().to_owned())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_hash_normalises_before_hashing() {
        assert_eq!(email_hash("  Admin@Example.com "), email_hash("admin@example.com"));
        assert_eq!(
            email_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn builder_derives_email_hash_and_defaults() {
        let user = UserDisplay::builder()
            .id(3)
            .name("Jane")
            .email("Jane@Example.com")
            .culture("en-US")
            .build();

        assert_eq!(user.email_hash, email_hash("jane@example.com"));
        assert_eq!(user.user_state, UserState::Active);
        assert_eq!(user.start_content_id, -1);
        assert!(user.notifications.is_empty());
    }

    #[test]
    fn serializes_in_camel_case() {
        let mut user = UserDisplay::builder()
            .id(3)
            .name("Jane")
            .email("jane@example.com")
            .culture("en-US")
            .user_state(UserState::LockedOut)
            .user_groups(vec!["editor".to_owned()])
            .build();
        user.notify(Notification::new("Saved", "User saved", NotificationType::Success));

        let value = serde_json::to_value(&user).expect("serialize");

        assert_eq!(value["userState"], json!("lockedOut"));
        assert_eq!(value["userGroups"], json!(["editor"]));
        assert_eq!(value["lastLoginDate"], Value::Null);
        assert_eq!(value["notifications"][0]["type"], json!("success"));
        assert!(value.get("emailHash").is_some());
    }

    #[test]
    fn user_state_round_trips_through_strum() {
        assert_eq!(UserState::LockedOut.to_string(), "lockedOut");
        assert_eq!("invited".parse::<UserState>(), Ok(UserState::Invited));
    }

    #[test]
    fn available_groups_map_alias_to_name() {
        let groups =
            [UserGroup::new(1, "Site Editors", "Site Editors"), UserGroup::new(2, "Admins", "admin")];

        let lookup = available_user_groups(&groups);

        assert_eq!(lookup.get("siteEditors").map(String::as_str), Some("Site Editors"));
        assert_eq!(lookup.get("admin").map(String::as_str), Some("Admins"));
    }
}
