use crate::AuthorId;

/// Display name used when the authenticated profile carries none
pub const DEFAULT_DISPLAY_NAME: &str = "Flick User";

/// Supplies the current author to the publish pipeline.
///
/// Both accessors may return `None` (not yet authenticated). The post
/// writer rejects publication when `user_id` is absent rather than writing
/// a record with a null author; a missing display name falls back to
/// [`DEFAULT_DISPLAY_NAME`].
pub trait Identity: Send + Sync {
    /// Id of the currently authenticated user, if any
    fn user_id(&self) -> Option<AuthorId>;

    /// Display name of the currently authenticated user, if any
    fn display_name(&self) -> Option<String>;
}

/// Fixed identity for tests and single-user embedding
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user_id: Option<AuthorId>,
    display_name: Option<String>,
}

impl StaticIdentity {
    /// Identity for the given user id
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(AuthorId::from_string(user_id.into())),
            display_name: None,
        }
    }

    /// An unauthenticated identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Set the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl Identity for StaticIdentity {
    fn user_id(&self) -> Option<AuthorId> {
        self.user_id.clone()
    }

    fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }
}
