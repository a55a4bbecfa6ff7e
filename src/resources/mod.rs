//! Tracker resource identities.
//!
//! A resource is anything a tracker assigns a stable key to: an issue, a
//! journal entry, a comment. The linker only ever sees the two attributes
//! defined here; everything else about a resource stays in the tracker
//! clients that produce them.

/// Minimal read-only view of a tracked object.
///
/// `resource_caption` classifies the kind of resource that produced the key,
/// so keys from different kinds cannot collide inside one link table.
pub trait Resource {
    /// Stable identifier of the resource within its own tracker.
    fn key(&self) -> &str;

    /// Kind tag scoping this resource's link records (e.g. "issue").
    fn resource_caption(&self) -> &str;
}

/// An issue in a tracker.
#[derive(Debug, Clone)]
pub struct Issue {
    key: String,
}

impl Issue {
    /// Caption used for issue link records.
    pub const CAPTION: &'static str = "issue";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Resource for Issue {
    fn key(&self) -> &str {
        &self.key
    }

    fn resource_caption(&self) -> &str {
        Self::CAPTION
    }
}

/// A journal entry attached to an issue.
#[derive(Debug, Clone)]
pub struct Journal {
    key: String,
}

impl Journal {
    /// Caption used for journal link records.
    pub const CAPTION: &'static str = "journal";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Resource for Journal {
    fn key(&self) -> &str {
        &self.key
    }

    fn resource_caption(&self) -> &str {
        Self::CAPTION
    }
}

/// A comment on an issue.
#[derive(Debug, Clone)]
pub struct Comment {
    key: String,
}

impl Comment {
    /// Caption used for comment link records.
    pub const CAPTION: &'static str = "comment";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Resource for Comment {
    fn key(&self) -> &str {
        &self.key
    }

    fn resource_caption(&self) -> &str {
        Self::CAPTION
    }
}

/// A resource whose kind is only known at runtime.
///
/// Used by the CLI, where the caption arrives as a plain argument, and by
/// tests that need arbitrary captions.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    caption: String,
    key: String,
}

impl ResourceRef {
    pub fn new(caption: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            key: key.into(),
        }
    }
}

impl Resource for ResourceRef {
    fn key(&self) -> &str {
        &self.key
    }

    fn resource_caption(&self) -> &str {
        &self.caption
    }
}
