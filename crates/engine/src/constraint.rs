//! Free-text seating constraints.
//!
//! Constraints are notes for the person arranging seats. They are stored
//! and listed but never evaluated by the arrangement code.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClassroomError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintId(Uuid);

impl ConstraintId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConstraintId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ConstraintId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: ConstraintId,
    pub text: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_kind() -> String {
    "custom".to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintList {
    items: Vec<Constraint>,
}

impl ConstraintList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Constraint>) -> Self {
        Self { items }
    }

    pub fn add(&mut self, text: &str) -> Result<&Constraint, ClassroomError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClassroomError::EmptyConstraint);
        }
        self.items.push(Constraint {
            id: ConstraintId::new(),
            text: text.to_string(),
            kind: default_kind(),
            active: true,
            created_at: Utc::now(),
        });
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn remove(&mut self, id: ConstraintId) -> Result<Constraint, ClassroomError> {
        let index = self
            .items
            .iter()
            .position(|c| c.id == id)
            .ok_or(ClassroomError::ConstraintNotFound(id))?;
        Ok(self.items.remove(index))
    }

    pub fn set_active(&mut self, id: ConstraintId, active: bool) -> Result<(), ClassroomError> {
        let item = self
            .items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClassroomError::ConstraintNotFound(id))?;
        item.active = active;
        Ok(())
    }

    pub fn get(&self, id: ConstraintId) -> Option<&Constraint> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn items(&self) -> &[Constraint] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_crud() {
        let mut list = ConstraintList::new();
        let id = list.add("  keep A and B apart ").unwrap().id;
        assert_eq!(list.get(id).unwrap().text, "keep A and B apart");
        assert_eq!(list.get(id).unwrap().kind, "custom");

        list.set_active(id, false).unwrap();
        assert!(!list.get(id).unwrap().active);

        list.remove(id).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.remove(id), Err(ClassroomError::ConstraintNotFound(id)));
    }

    #[test]
    fn test_blank_constraint_rejected() {
        let mut list = ConstraintList::new();
        assert_eq!(list.add("   "), Err(ClassroomError::EmptyConstraint));
    }
}
