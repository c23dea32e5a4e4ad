//! Identifier and class-scope models.
//!
//! Holidays and calendar exceptions can apply to the whole organization or
//! only to a listed set of classes. [`ClassScope`] captures that choice and
//! reports how specifically it matches a query.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a class (a group of students) within an organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub String);

impl ClassId {
    /// Creates a class identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a staff role within an organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    /// Creates a role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a scoped record matched a query.
///
/// Ordered by specificity: a class-specific match outranks an
/// organization-wide one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMatch {
    /// The record applies to every class.
    AllClasses,
    /// The record lists the queried class explicitly.
    Class,
}

/// The set of classes a holiday or calendar exception applies to.
///
/// # Example
///
/// ```
/// use school_calendar::models::{ClassId, ClassScope, ScopeMatch};
///
/// let scope = ClassScope::classes([ClassId::new("grade-5")]);
/// assert_eq!(scope.matches(Some(&ClassId::new("grade-5"))), Some(ScopeMatch::Class));
/// assert_eq!(scope.matches(Some(&ClassId::new("grade-6"))), None);
/// assert_eq!(scope.matches(None), None);
///
/// assert_eq!(ClassScope::all().matches(None), Some(ScopeMatch::AllClasses));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScope {
    /// Whether the record applies to every class in the organization.
    #[serde(default = "default_applies_to_all")]
    pub applies_to_all_classes: bool,
    /// Classes the record applies to when it is not organization-wide.
    #[serde(default)]
    pub class_ids: BTreeSet<ClassId>,
}

fn default_applies_to_all() -> bool {
    true
}

impl Default for ClassScope {
    fn default() -> Self {
        Self::all()
    }
}

impl ClassScope {
    /// A scope covering every class.
    pub fn all() -> Self {
        Self {
            applies_to_all_classes: true,
            class_ids: BTreeSet::new(),
        }
    }

    /// A scope covering only the given classes.
    pub fn classes(ids: impl IntoIterator<Item = ClassId>) -> Self {
        Self {
            applies_to_all_classes: false,
            class_ids: ids.into_iter().collect(),
        }
    }

    /// Reports how this scope matches a query for `class_id`.
    ///
    /// A query without a class is an organization-wide question and only
    /// organization-wide records answer it. When a scope both applies to all
    /// classes and lists the queried class, the explicit listing wins.
    pub fn matches(&self, class_id: Option<&ClassId>) -> Option<ScopeMatch> {
        if let Some(id) = class_id {
            if self.class_ids.contains(id) {
                return Some(ScopeMatch::Class);
            }
        }
        self.applies_to_all_classes.then_some(ScopeMatch::AllClasses)
    }

    /// Returns true if the scope covers no class at all.
    pub fn is_empty(&self) -> bool {
        !self.applies_to_all_classes && self.class_ids.is_empty()
    }

    /// Returns true if two scopes could both answer the same query with the
    /// same specificity.
    pub fn collides_with(&self, other: &ClassScope) -> bool {
        (self.applies_to_all_classes && other.applies_to_all_classes)
            || !self.class_ids.is_disjoint(&other.class_ids)
    }
}
