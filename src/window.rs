use crate::config::WindowSize;
use crate::menu::{CommandSet, MenuBar};

/// A titled window with one attached menu bar. Rebuilding the bar replaces
/// whatever the previous screen installed.
#[derive(Debug, Clone)]
pub struct Window<A> {
    title: String,
    size: WindowSize,
    bar: MenuBar<A>,
}

impl<A> Window<A> {
    pub fn new(title: impl Into<String>, size: WindowSize) -> Self {
        Self {
            title: title.into(),
            size,
            bar: MenuBar::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> WindowSize {
        self.size
    }

    pub fn bar(&self) -> &MenuBar<A> {
        &self.bar
    }

    /// Attach a fresh bar with one section per name. `command_sets[i]` drives
    /// `section_names[i]`.
    ///
    /// # Panics
    ///
    /// When the two lists differ in length.
    pub fn build_bar<S: AsRef<str>>(&mut self, section_names: &[S], command_sets: Vec<CommandSet<A>>) {
        assert_eq!(
            section_names.len(),
            command_sets.len(),
            "every menu section needs exactly one command set"
        );

        let mut bar = MenuBar::new();
        for (name, commands) in section_names.iter().zip(command_sets) {
            bar.add_section(name.as_ref(), commands);
        }
        self.bar = bar;
    }
}
