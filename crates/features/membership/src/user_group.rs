use bitflags::bitflags;
use bo_kernel::strings::{CleanMode, DefaultStringCleaner, StringCleaner};
use std::collections::HashSet;
use tracing::trace;

bitflags! {
    /// Tracked properties of a [`UserGroup`].
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserGroupFields: u8 {
        const NAME = 1 << 0;
        const ALIAS = 1 << 1;
        const ICON = 1 << 2;
        const PERMISSIONS = 1 << 3;
        const START_CONTENT_ID = 1 << 4;
        const START_MEDIA_ID = 1 << 5;
    }
}

/// Mode used by [`UserGroup::set_alias`].
const ALIAS_MODE: CleanMode = CleanMode::ALIAS.union(CleanMode::CAMEL_CASE);

/// A group of backoffice users sharing permissions, start nodes and sections.
///
/// Each setter compares the new value with the current one and flags the property as dirty
/// only when it actually changes. A freshly constructed group is clean.
///
/// Allowed sections are an insertion-ordered list without duplicates; they are not tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserGroup {
    id: i32,
    name: String,
    alias: String,
    icon: String,
    permissions: Vec<String>,
    start_content_id: i32,
    start_media_id: i32,
    allowed_sections: Vec<String>,
    dirty: UserGroupFields,
    was_dirty: UserGroupFields,
}

impl UserGroup {
    /// Creates a clean group; `alias` is canonicalised with the default cleaner.
    pub fn new(id: i32, name: impl Into<String>, alias: &str) -> Self {
        Self {
            id,
            name: name.into(),
            alias: DefaultStringCleaner.clean(alias, ALIAS_MODE),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Permission codes in the order they were last assigned.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    #[must_use]
    pub const fn start_content_id(&self) -> i32 {
        self.start_content_id
    }

    #[must_use]
    pub const fn start_media_id(&self) -> i32 {
        self.start_media_id
    }

    #[must_use]
    pub fn allowed_sections(&self) -> &[String] {
        &self.allowed_sections
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.mark(UserGroupFields::NAME);
        }
    }

    /// Stores the alias in its canonical form (`"Site Editors"` becomes `"siteEditors"`).
    pub fn set_alias(&mut self, alias: &str) {
        self.set_alias_with(alias, &DefaultStringCleaner);
    }

    /// Like [`Self::set_alias`] with a caller-supplied cleaner.
    pub fn set_alias_with(&mut self, alias: &str, cleaner: &dyn StringCleaner) {
        let alias = cleaner.clean(alias, ALIAS_MODE);
        if self.alias != alias {
            self.alias = alias;
            self.mark(UserGroupFields::ALIAS);
        }
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        let icon = icon.into();
        if self.icon != icon {
            self.icon = icon;
            self.mark(UserGroupFields::ICON);
        }
    }

    /// Replaces the permission codes. Reordering the same codes is not a change.
    pub fn set_permissions<I, S>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions: Vec<String> = permissions.into_iter().map(Into::into).collect();
        if !same_set(&self.permissions, &permissions) {
            self.mark(UserGroupFields::PERMISSIONS);
        }
        self.permissions = permissions;
    }

    pub fn set_start_content_id(&mut self, id: i32) {
        if self.start_content_id != id {
            self.start_content_id = id;
            self.mark(UserGroupFields::START_CONTENT_ID);
        }
    }

    pub fn set_start_media_id(&mut self, id: i32) {
        if self.start_media_id != id {
            self.start_media_id = id;
            self.mark(UserGroupFields::START_MEDIA_ID);
        }
    }

    /// Appends `section` unless it is already allowed.
    pub fn add_allowed_section(&mut self, section: &str) {
        if !self.allowed_sections.iter().any(|s| s == section) {
            self.allowed_sections.push(section.to_owned());
        }
    }

    /// Removes `section`; a no-op when it is not allowed.
    pub fn remove_allowed_section(&mut self, section: &str) {
        self.allowed_sections.retain(|s| s != section);
    }

    pub fn clear_allowed_sections(&mut self) {
        self.allowed_sections.clear();
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[must_use]
    pub const fn is_property_dirty(&self, field: UserGroupFields) -> bool {
        self.dirty.intersects(field)
    }

    #[must_use]
    pub const fn dirty_properties(&self) -> UserGroupFields {
        self.dirty
    }

    /// `true` if the group was dirty before the last remembering reset.
    #[must_use]
    pub const fn was_dirty(&self) -> bool {
        !self.was_dirty.is_empty()
    }

    #[must_use]
    pub const fn was_property_dirty(&self, field: UserGroupFields) -> bool {
        self.was_dirty.intersects(field)
    }

    /// Clears the dirty set. With `remember`, the cleared set becomes the "was dirty" set;
    /// without it, the "was dirty" set is cleared too.
    pub fn reset_dirty_properties(&mut self, remember: bool) {
        self.was_dirty = if remember { self.dirty } else { UserGroupFields::empty() };
        self.dirty = UserGroupFields::empty();
    }

    fn mark(&mut self, field: UserGroupFields) {
        trace!(group = self.id, ?field, "User group property changed");
        self.dirty.insert(field);
    }
}

fn same_set(current: &[String], next: &[String]) -> bool {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let next: HashSet<&str> = next.iter().map(String::as_str).collect();
    current == next
}
