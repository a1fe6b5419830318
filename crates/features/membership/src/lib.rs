//! Backoffice membership: the change-tracked [`UserGroup`] entity and the [`UserDisplay`]
//! projection rendered by the user edit form.
//!
//! Persistence is out of scope. A mapping layer reads [`UserGroup::dirty_properties`] to decide
//! what to write and calls [`UserGroup::reset_dirty_properties`] afterwards.

mod display;
mod user_group;

pub use crate::display::{
    Notification, NotificationType, UserDisplay, UserState, available_user_groups, email_hash,
};
pub use crate::user_group::{UserGroup, UserGroupFields};
