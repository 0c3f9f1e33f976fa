use anyhow::Result;

use crate::db::{
    count_pictures, fetch_classes, fetch_grades, fetch_homework, fetch_notes, fetch_prof,
    fetch_students, DataStore,
};
use crate::models::{NotesScope, SchoolClass, Student};

/// Profile shown on start-up and from `Menu > Profile`.
pub(crate) const DEFAULT_PROF_ID: i64 = 1;

/// Which page fills the window body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Screen {
    Blank,
    Profile,
    Class(SchoolClass),
    Student(Student),
    Homework(SchoolClass),
    Notes(NotesScope),
    Grades(Student),
}

impl Screen {
    /// Screens that install their own menu bar. The others reuse the bar of
    /// the screen they were opened from.
    pub(crate) fn owns_bar(&self) -> bool {
        matches!(
            self,
            Screen::Blank | Screen::Profile | Screen::Class(_) | Screen::Student(_)
        )
    }
}

/// Heading and body lines for the current screen, loaded once on open.
pub(crate) struct ScreenView {
    pub(crate) heading: String,
    pub(crate) lines: Vec<String>,
}

impl ScreenView {
    pub(crate) fn load(store: &DataStore, screen: &Screen) -> Result<Self> {
        let view = match screen {
            Screen::Blank => Self {
                heading: String::new(),
                lines: Vec::new(),
            },
            Screen::Profile => {
                let classes = fetch_classes(store)?;
                let pictures = count_pictures(store)?;
                match fetch_prof(store, DEFAULT_PROF_ID)? {
                    Some(prof) => {
                        let mut lines = vec![
                            format!("Subject: {}", prof.subject),
                            format!("Classes: {}", classes.len()),
                            format!("Pictures on file: {pictures}"),
                        ];
                        if prof.coordinator {
                            lines.push("Class coordinator".to_string());
                        }
                        Self {
                            heading: format!("Prof. {}", prof.full_name()),
                            lines,
                        }
                    }
                    None => Self {
                        heading: "Profile".to_string(),
                        lines: vec!["No profile on record.".to_string()],
                    },
                }
            }
            Screen::Class(class) => {
                let students = fetch_students(store, class.id)?;
                Self {
                    heading: format!("Class {class}"),
                    lines: with_placeholder(
                        students.iter().map(Student::full_name).collect(),
                        "No students enrolled.",
                    ),
                }
            }
            Screen::Student(student) => Self {
                heading: student.full_name(),
                lines: vec!["Open Grades or Notes from the menu bar.".to_string()],
            },
            Screen::Homework(class) => {
                let homework = fetch_homework(store, class.id)?;
                Self {
                    heading: format!("Homework for {class}"),
                    lines: with_placeholder(
                        homework
                            .iter()
                            .map(|item| format!("{}  (due {})", item.description, item.due))
                            .collect(),
                        "No homework assigned.",
                    ),
                }
            }
            Screen::Notes(scope) => {
                let notes = fetch_notes(store, scope)?;
                let heading = match scope {
                    NotesScope::Class(class) => format!("Notes for {class}"),
                    NotesScope::Student(student) => format!("Notes for {}", student.full_name()),
                };
                Self {
                    heading,
                    lines: with_placeholder(
                        notes.into_iter().map(|note| note.body).collect(),
                        "No notes yet.",
                    ),
                }
            }
            Screen::Grades(student) => {
                let grades = fetch_grades(store, student.id)?;
                let mut lines: Vec<String> = grades
                    .iter()
                    .map(|grade| format!("{:<16}{:>5.1}", grade.subject, grade.grade))
                    .collect();
                if !grades.is_empty() {
                    let average =
                        grades.iter().map(|grade| grade.grade).sum::<f64>() / grades.len() as f64;
                    lines.push(String::new());
                    lines.push(format!("{:<16}{:>5.1}", "Average", average));
                }
                Self {
                    heading: format!("Grades of {}", student.full_name()),
                    lines: with_placeholder(lines, "No grades recorded."),
                }
            }
        };
        Ok(view)
    }
}

fn with_placeholder(lines: Vec<String>, placeholder: &str) -> Vec<String> {
    if lines.is_empty() {
        vec![placeholder.to_string()]
    } else {
        lines
    }
}

/// Position inside the menu bar: the highlighted section and, while a group
/// is dropped down, the highlighted entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MenuCursor {
    pub(crate) section: usize,
    pub(crate) open: Option<usize>,
}

impl MenuCursor {
    /// Step across sections, wrapping at both ends. A dropdown that was open
    /// stays open on the new section when `open_next` says it can.
    pub(crate) fn move_section(&mut self, offset: isize, sections: usize, open_next: bool) {
        if sections == 0 {
            *self = Self::default();
            return;
        }
        let len = sections as isize;
        self.section = (self.section as isize + offset).rem_euclid(len) as usize;
        self.open = if self.open.is_some() && open_next {
            Some(0)
        } else {
            None
        };
    }

    /// Step within an open dropdown, clamped to its entries.
    pub(crate) fn move_item(&mut self, offset: isize, items: usize) {
        if let Some(current) = self.open {
            if items == 0 {
                self.open = Some(0);
                return;
            }
            let max = items as isize - 1;
            self.open = Some((current as isize + offset).clamp(0, max) as usize);
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = None;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
