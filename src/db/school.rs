//! Typed reads over the tables the bundled seed manifests create. Each helper
//! goes through [`DataStore::read_rows`] and returns nothing when its table is
//! absent, so a blank database still renders.

use anyhow::{anyhow, Context, Result};

use crate::models::{Grade, Homework, Note, NotesScope, Prof, SchoolClass, Student};

use super::store::{DataStore, ALL_ROWS};
use super::value::{Row, Value};

pub fn fetch_prof(store: &DataStore, prof_id: i64) -> Result<Option<Prof>> {
    if !store.table_exists("profs")? {
        return Ok(None);
    }
    let rows = store
        .read_rows(
            "profs",
            "prof_id, first_name, last_name, subject, is_coordinator",
            &format!("prof_id = {prof_id}"),
            1,
        )
        .context("failed to load profile")?;

    rows.first()
        .map(|row| -> Result<Prof> {
            Ok(Prof {
                id: int(row, 0)?,
                first_name: text(row, 1),
                last_name: text(row, 2),
                subject: text(row, 3),
                coordinator: row.get(4).and_then(Value::as_bool).unwrap_or(false),
            })
        })
        .transpose()
}

/// Classes ordered by year then section, the order the Classes menu shows.
pub fn fetch_classes(store: &DataStore) -> Result<Vec<SchoolClass>> {
    if !store.table_exists("classes")? {
        return Ok(Vec::new());
    }
    store
        .read_rows(
            "classes",
            "class_id, year, section",
            &format!("{ALL_ROWS} ORDER BY year, section"),
            0,
        )
        .context("failed to load classes")?
        .iter()
        .map(|row| -> Result<SchoolClass> {
            Ok(SchoolClass {
                id: int(row, 0)?,
                year: int(row, 1)?,
                section: text(row, 2),
            })
        })
        .collect()
}

pub fn fetch_students(store: &DataStore, class_id: i64) -> Result<Vec<Student>> {
    if !store.table_exists("students")? {
        return Ok(Vec::new());
    }
    store
        .read_rows(
            "students",
            "student_id, class_id, first_name, last_name",
            &format!("class_id = {class_id} ORDER BY last_name, first_name"),
            0,
        )
        .context("failed to load students")?
        .iter()
        .map(|row| -> Result<Student> {
            Ok(Student {
                id: int(row, 0)?,
                class_id: int(row, 1)?,
                first_name: text(row, 2),
                last_name: text(row, 3),
            })
        })
        .collect()
}

pub fn fetch_grades(store: &DataStore, student_id: i64) -> Result<Vec<Grade>> {
    if !store.table_exists("grades")? {
        return Ok(Vec::new());
    }
    store
        .read_rows(
            "grades",
            "subject, grade",
            &format!("student_id = {student_id} ORDER BY subject"),
            0,
        )
        .context("failed to load grades")?
        .iter()
        .map(|row| -> Result<Grade> {
            Ok(Grade {
                subject: text(row, 0),
                grade: real(row, 1)?,
            })
        })
        .collect()
}

pub fn fetch_homework(store: &DataStore, class_id: i64) -> Result<Vec<Homework>> {
    if !store.table_exists("homework")? {
        return Ok(Vec::new());
    }
    let rows = store
        .read_rows(
            "homework",
            "description, due",
            &format!("class_id = {class_id} ORDER BY due"),
            0,
        )
        .context("failed to load homework")?;

    Ok(rows
        .iter()
        .map(|row| Homework {
            description: text(row, 0),
            due: text(row, 1),
        })
        .collect())
}

pub fn fetch_notes(store: &DataStore, scope: &NotesScope) -> Result<Vec<Note>> {
    if !store.table_exists("notes")? {
        return Ok(Vec::new());
    }
    let condition = match scope {
        NotesScope::Class(class) => format!("class_id = {} AND student_id IS NULL", class.id),
        NotesScope::Student(student) => format!("student_id = {}", student.id),
    };
    let rows = store
        .read_rows("notes", "body", &format!("{condition} ORDER BY note_id"), 0)
        .context("failed to load notes")?;

    Ok(rows.iter().map(|row| Note { body: text(row, 0) }).collect())
}

/// Rows of the `images` table that already carry picture bytes.
pub fn count_pictures(store: &DataStore) -> Result<i64> {
    if !store.table_exists("images")? {
        return Ok(0);
    }
    store
        .count_rows("images", "image IS NOT NULL")
        .context("failed to count pictures")
}

fn text(row: &Row, idx: usize) -> String {
    row.get(idx).map(Value::to_string).unwrap_or_default()
}

fn int(row: &Row, idx: usize) -> Result<i64> {
    row.get(idx)
        .and_then(Value::as_i64)
        .ok_or_else(|| anyhow!("expected an integer in column {idx}"))
}

fn real(row: &Row, idx: usize) -> Result<f64> {
    match row.get(idx) {
        Some(Value::Real(v)) => Ok(*v),
        Some(Value::Integer(v)) => Ok(*v as f64),
        _ => Err(anyhow!("expected a number in column {idx}")),
    }
}
