//! Students and the roster that owns them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClassroomError;

/// Generated student identity. Stable across renames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl Gender {
    pub fn is_specified(&self) -> bool {
        !matches!(self, Gender::Unspecified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unspecified => "",
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable student attributes, as entered in the student form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentFields {
    pub name: String,
    pub external_id: Option<String>,
    pub gender: Gender,
    pub needs_front_seat: bool,
    pub notes: String,
}

impl StudentFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_front_seat(mut self, needs_front_seat: bool) -> Self {
        self.needs_front_seat = needs_front_seat;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Trim text fields; blank optional fields become `None`.
    fn normalized(self) -> Result<Self, ClassroomError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ClassroomError::EmptyName);
        }
        let external_id = self
            .external_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Ok(Self {
            name,
            external_id,
            gender: self.gender,
            needs_front_seat: self.needs_front_seat,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub needs_front_seat: bool,
    #[serde(default)]
    pub notes: String,
}

impl Student {
    fn from_fields(id: StudentId, fields: StudentFields) -> Self {
        Self {
            id,
            name: fields.name,
            external_id: fields.external_id,
            gender: fields.gender,
            needs_front_seat: fields.needs_front_seat,
            notes: fields.notes,
        }
    }

    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            external_id: self.external_id.clone(),
            gender: self.gender,
            needs_front_seat: self.needs_front_seat,
            notes: self.notes.clone(),
        }
    }

    /// One-line summary shown under the name in the student list.
    pub fn details(&self) -> String {
        let mut parts = Vec::new();
        if self.gender.is_specified() {
            parts.push(format!("gender: {}", self.gender));
        }
        if self.needs_front_seat {
            parts.push("front seat".to_string());
        }
        parts.join(" | ")
    }
}

/// Owns every student record. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_students(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn add_student(&mut self, fields: StudentFields) -> Result<&Student, ClassroomError> {
        let fields = fields.normalized()?;
        let student = Student::from_fields(StudentId::new(), fields);
        log::debug!("roster: added {} ({})", student.name, student.id);
        self.students.push(student);
        Ok(&self.students[self.students.len() - 1])
    }

    /// Replace a student's attributes, keeping its identity.
    pub fn update_student(&mut self, id: StudentId, fields: StudentFields) -> Result<&Student, ClassroomError> {
        let fields = fields.normalized()?;
        let slot = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ClassroomError::StudentNotFound(id))?;
        *slot = Student::from_fields(id, fields);
        Ok(slot)
    }

    /// Remove the record only. Seats referencing the student must be
    /// cleared by the caller first.
    pub fn remove_student(&mut self, id: StudentId) -> Result<Student, ClassroomError> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(ClassroomError::StudentNotFound(id))?;
        Ok(self.students.remove(index))
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.get(id).is_some()
    }

    /// First student whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }
}
