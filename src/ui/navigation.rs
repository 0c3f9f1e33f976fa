use crate::menu::CommandSet;
use crate::models::{NotesScope, SchoolClass, Student};

/// Everything a menu entry can ask the application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OpenProfile,
    OpenClass(SchoolClass),
    OpenStudent(Student),
    OpenHomework(SchoolClass),
    OpenNotes(NotesScope),
    OpenGrades(Student),
    Exit,
}

/// Section names and command sets for one screen, index aligned.
pub(crate) struct MenuSpec {
    pub(crate) sections: Vec<&'static str>,
    pub(crate) commands: Vec<CommandSet<Action>>,
}

/// The `Menu` section every screen starts with.
fn menu_section() -> CommandSet<Action> {
    CommandSet::group([("Profile", Action::OpenProfile), ("Exit", Action::Exit)])
}

pub(crate) fn profile_menu(classes: &[SchoolClass]) -> MenuSpec {
    let class_entries = classes
        .iter()
        .map(|class| (class.to_string(), Action::OpenClass(class.clone())));

    MenuSpec {
        sections: vec!["Menu", "Classes"],
        commands: vec![menu_section(), CommandSet::group(class_entries)],
    }
}

pub(crate) fn class_menu(class: &SchoolClass, students: &[Student]) -> MenuSpec {
    let student_entries = students
        .iter()
        .map(|student| (student.full_name(), Action::OpenStudent(student.clone())));

    MenuSpec {
        sections: vec!["Menu", "Students", "Homework", "Notes"],
        commands: vec![
            menu_section(),
            CommandSet::group(student_entries),
            CommandSet::Leaf(Action::OpenHomework(class.clone())),
            CommandSet::Leaf(Action::OpenNotes(NotesScope::Class(class.clone()))),
        ],
    }
}

pub(crate) fn student_menu(student: &Student) -> MenuSpec {
    MenuSpec {
        sections: vec!["Menu", "Grades", "Notes"],
        commands: vec![
            menu_section(),
            CommandSet::Leaf(Action::OpenGrades(student.clone())),
            CommandSet::Leaf(Action::OpenNotes(NotesScope::Student(student.clone()))),
        ],
    }
}

/// Blank windows only offer a way out.
pub(crate) fn blank_menu() -> MenuSpec {
    MenuSpec {
        sections: vec!["Menu"],
        commands: vec![CommandSet::group([("Exit", Action::Exit)])],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_3a() -> SchoolClass {
        SchoolClass {
            id: 1,
            year: 3,
            section: "A".into(),
        }
    }

    #[test]
    fn every_menu_is_index_aligned() {
        let student = Student {
            id: 7,
            class_id: 1,
            first_name: "Giulia".into(),
            last_name: "Bianchi".into(),
        };
        for spec in [
            profile_menu(&[class_3a()]),
            class_menu(&class_3a(), &[student.clone()]),
            student_menu(&student),
            blank_menu(),
        ] {
            assert_eq!(spec.sections.len(), spec.commands.len());
        }
    }

    #[test]
    fn classes_are_labelled_by_year_and_section() {
        let spec = profile_menu(&[class_3a()]);
        match &spec.commands[1] {
            CommandSet::Group(entries) => {
                assert_eq!(entries, &vec![("3A".to_string(), Action::OpenClass(class_3a()))]);
            }
            other => panic!("expected a group, got {other:?}"),
        }
    }
}
