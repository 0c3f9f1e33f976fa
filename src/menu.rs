//! Two-level menu model: a bar holds sections, a section is either a single
//! command or a group of labelled commands. The action type is left to the
//! caller so the same builder serves the terminal shell and plain closures.

/// What a section does when chosen, decided when the menu is described.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandSet<A> {
    /// The section itself fires the action.
    Leaf(A),
    /// The section opens a list of labelled actions, kept in this order.
    Group(Vec<(String, A)>),
}

impl<A> CommandSet<A> {
    pub fn group<L, I>(entries: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, A)>,
    {
        CommandSet::Group(
            entries
                .into_iter()
                .map(|(label, action)| (label.into(), action))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<A> {
    pub label: String,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionCommand<A> {
    Leaf(A),
    Items(Vec<MenuItem<A>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section<A> {
    label: String,
    command: SectionCommand<A>,
}

impl<A> Section<A> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn command(&self) -> &SectionCommand<A> {
        &self.command
    }

    /// Leaf commands of a group section; empty for a leaf section.
    pub fn items(&self) -> &[MenuItem<A>] {
        match &self.command {
            SectionCommand::Items(items) => items,
            SectionCommand::Leaf(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.command, SectionCommand::Leaf(_))
    }
}

/// Top-level bar attached to a window.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBar<A> {
    sections: Vec<Section<A>>,
}

impl<A> Default for MenuBar<A> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<A> MenuBar<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section labelled `label` that runs `commands`.
    pub fn add_section(&mut self, label: impl Into<String>, commands: CommandSet<A>) {
        let command = match commands {
            CommandSet::Leaf(action) => SectionCommand::Leaf(action),
            CommandSet::Group(entries) => SectionCommand::Items(
                entries
                    .into_iter()
                    .map(|(label, action)| MenuItem { label, action })
                    .collect(),
            ),
        };
        self.sections.push(Section {
            label: label.into(),
            command,
        });
    }

    pub fn sections(&self) -> &[Section<A>] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section<A>> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Resolve the action behind a section (`item == None`) or one of its
    /// entries. Asking a group for itself, or a leaf for an entry, yields
    /// nothing.
    pub fn activate(&self, section: usize, item: Option<usize>) -> Option<&A> {
        match (&self.section(section)?.command, item) {
            (SectionCommand::Leaf(action), None) => Some(action),
            (SectionCommand::Items(items), Some(idx)) => items.get(idx).map(|item| &item.action),
            _ => None,
        }
    }
}
