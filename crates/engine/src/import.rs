//! Merge externally parsed roster rows into the roster.
//!
//! Rows arrive already column-mapped and validated by the spreadsheet
//! reader. A row whose name matches an existing student exactly is a
//! duplicate: it is either merged into that student or skipped. Seats are
//! never touched.

use serde::{Deserialize, Serialize};

use crate::roster::{Gender, Roster, StudentFields, StudentId};

/// One accepted spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportRow {
    pub name: String,
    pub external_id: Option<String>,
    pub gender: Gender,
    pub needs_front_seat: bool,
    pub notes: Option<String>,
}

impl ImportRow {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// What to do when a row names a student that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Merge the row's non-empty fields into the existing student.
    Overwrite,
    #[default]
    Skip,
}

impl DuplicatePolicy {
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            DuplicatePolicy::Overwrite
        } else {
            DuplicatePolicy::Skip
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Rows with a blank name; they cannot be matched or created.
    pub invalid: usize,
    pub created_ids: Vec<StudentId>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.invalid
    }

    pub fn changed_roster(&self) -> bool {
        self.created > 0 || self.updated > 0
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reconcile `rows` against `roster` in order.
///
/// Later rows see students created by earlier rows, so a name repeated
/// within one import is handled by the duplicate policy as well.
pub fn reconcile(roster: &mut Roster, rows: &[ImportRow], policy: DuplicatePolicy) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for row in rows {
        let name = row.name.trim();
        if name.is_empty() {
            summary.invalid += 1;
            continue;
        }

        if let Some(existing) = roster.find_by_name(name).map(|s| s.id) {
            match policy {
                DuplicatePolicy::Skip => summary.skipped += 1,
                DuplicatePolicy::Overwrite => {
                    if let Some(student) = roster.get_mut(existing) {
                        if let Some(id) = non_empty(&row.external_id) {
                            student.external_id = Some(id);
                        }
                        if row.gender.is_specified() {
                            student.gender = row.gender;
                        }
                        // The front-seat flag is always taken from the row
                        student.needs_front_seat = row.needs_front_seat;
                        if let Some(notes) = non_empty(&row.notes) {
                            student.notes = notes;
                        }
                    }
                    summary.updated += 1;
                }
            }
            continue;
        }

        let fields = StudentFields {
            name: name.to_string(),
            external_id: non_empty(&row.external_id),
            gender: row.gender,
            needs_front_seat: row.needs_front_seat,
            notes: non_empty(&row.notes).unwrap_or_default(),
        };
        match roster.add_student(fields) {
            Ok(student) => {
                summary.created_ids.push(student.id);
                summary.created += 1;
            }
            Err(_) => summary.invalid += 1,
        }
    }

    log::info!(
        "import: {} created, {} updated, {} skipped, {} invalid",
        summary.created,
        summary.updated,
        summary.skipped,
        summary.invalid
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with(name: &str) -> Roster {
        let mut roster = Roster::new();
        let fields = StudentFields {
            name: name.into(),
            external_id: Some("007".into()),
            gender: Gender::Male,
            needs_front_seat: true,
            notes: "keep".into(),
        };
        roster.add_student(fields).unwrap();
        roster
    }

    #[test]
    fn test_duplicate_skipped() {
        let mut roster = roster_with("张三");
        let before = roster.clone();

        let summary = reconcile(&mut roster, &[ImportRow::named("张三")], DuplicatePolicy::Skip);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.created, 0);
        assert_eq!(summary.updated, 0);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_duplicate_overwrite_merges_non_empty_fields() {
        let mut roster = roster_with("张三");
        let row = ImportRow {
            name: "张三".into(),
            external_id: Some(" ".into()),
            gender: Gender::Unspecified,
            needs_front_seat: false,
            notes: Some("班长".into()),
        };

        let summary = reconcile(&mut roster, &[row], DuplicatePolicy::Overwrite);

        assert_eq!(summary.updated, 1);
        let student = roster.find_by_name("张三").unwrap();
        assert_eq!(student.external_id.as_deref(), Some("007"));
        assert_eq!(student.gender, Gender::Male);
        assert!(!student.needs_front_seat);
        assert_eq!(student.notes, "班长");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_new_rows_created() {
        let mut roster = roster_with("张三");
        let rows = vec![
            ImportRow {
                name: "李四".into(),
                external_id: Some("002".into()),
                gender: Gender::Female,
                needs_front_seat: true,
                notes: None,
            },
            ImportRow::named("王五"),
        ];

        let summary = reconcile(&mut roster, &rows, DuplicatePolicy::Skip);

        assert_eq!(summary.created, 2);
        assert_eq!(summary.created_ids.len(), 2);
        assert_eq!(roster.len(), 3);
        let li = roster.find_by_name("李四").unwrap();
        assert_eq!(li.external_id.as_deref(), Some("002"));
        assert!(li.needs_front_seat);
    }

    #[test]
    fn test_repeat_within_one_import() {
        let mut roster = Roster::new();
        let rows = vec![ImportRow::named("赵六"), ImportRow::named("赵六")];

        let summary = reconcile(&mut roster, &rows, DuplicatePolicy::Skip);

        assert_eq!(summary.created, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_blank_name_counted_invalid() {
        let mut roster = Roster::new();
        let summary = reconcile(&mut roster, &[ImportRow::named("  ")], DuplicatePolicy::Overwrite);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.total(), 1);
        assert!(roster.is_empty());
    }
}
