//! Domain records read back from the seeded tables. They stay plain data
//! holders; the screens format them and the menus carry them inside actions.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// The teacher whose console this is.
pub struct Prof {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    /// Stored as `"True"` / `"False"` text in the `profs` table.
    pub coordinator: bool,
}

impl Prof {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A class is identified to users by year and section (`3A`).
pub struct SchoolClass {
    pub id: i64,
    pub year: i64,
    pub section: String,
}

impl fmt::Display for SchoolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.section)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub class_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub subject: String,
    pub grade: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Homework {
    pub description: String,
    pub due: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub body: String,
}

/// Notes hang either off a whole class or off a single student.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesScope {
    Class(SchoolClass),
    Student(Student),
}
