//! Player-entry form model.
//!
//! Holds everything the terminal view needs to draw the form and turns
//! [`FormAction`]s into [`EntrySubmission`]s. This is the UI-side state:
//! only the UI loop mutates it, either directly from key input or through the
//! [`UiAdapter`] callbacks fed by session events.

use crate::types::{FormAction, DIFFICULTY_LABELS, INITIAL_STATUS_TEXT, TEAM_LABELS};
use crate::ui::UiAdapter;

/// Longest accepted player name, in characters.
pub const MAX_NAME_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Team,
    Difficulty,
    EntryButton,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Team,
        FormField::Difficulty,
        FormField::EntryButton,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Raw field values handed to the submitter.
///
/// Labels stay as text; mapping them to wire codes is the submitter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySubmission {
    pub name: String,
    pub team: String,
    pub difficulty: String,
}

/// What a single action did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Unchanged,
    Changed,
    Submit(EntrySubmission),
    Quit,
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    name: String,
    team: usize,
    difficulty: usize,
    focus: FormField,
    input_enabled: bool,
    status_text: String,
    revision: u64,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            team: 0,
            difficulty: 0,
            focus: FormField::Name,
            input_enabled: true,
            status_text: INITIAL_STATUS_TEXT.to_string(),
            revision: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_label(&self) -> &'static str {
        TEAM_LABELS[self.team]
    }

    pub fn difficulty_label(&self) -> &'static str {
        DIFFICULTY_LABELS[self.difficulty]
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Bumped on every visible change; the UI loop redraws when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) -> FormOutcome {
        self.revision = self.revision.wrapping_add(1);
        FormOutcome::Changed
    }

    pub fn apply(&mut self, action: FormAction) -> FormOutcome {
        match action {
            FormAction::Quit => FormOutcome::Quit,
            FormAction::NextField => {
                self.focus = self.focus.next();
                self.touch()
            }
            FormAction::PrevField => {
                self.focus = self.focus.prev();
                self.touch()
            }
            FormAction::SelectNext => self.cycle(1),
            FormAction::SelectPrev => self.cycle(-1),
            FormAction::Input(ch) => {
                if self.focus != FormField::Name
                    || ch.is_control()
                    || self.name.chars().count() >= MAX_NAME_CHARS
                {
                    return FormOutcome::Unchanged;
                }
                self.name.push(ch);
                self.touch()
            }
            FormAction::Backspace => {
                if self.focus != FormField::Name || self.name.pop().is_none() {
                    return FormOutcome::Unchanged;
                }
                self.touch()
            }
            FormAction::Submit => {
                // Locked forms swallow the submit; the button is drawn disabled.
                if !self.input_enabled {
                    return FormOutcome::Unchanged;
                }
                FormOutcome::Submit(EntrySubmission {
                    name: self.name.clone(),
                    team: self.team_label().to_string(),
                    difficulty: self.difficulty_label().to_string(),
                })
            }
        }
    }

    fn cycle(&mut self, step: isize) -> FormOutcome {
        let (slot, len) = match self.focus {
            FormField::Team => (&mut self.team, TEAM_LABELS.len()),
            FormField::Difficulty => (&mut self.difficulty, DIFFICULTY_LABELS.len()),
            _ => return FormOutcome::Unchanged,
        };
        *slot = (*slot as isize + step).rem_euclid(len as isize) as usize;
        self.touch()
    }
}

impl UiAdapter for EntryForm {
    fn set_status_text(&mut self, text: &str) {
        if self.status_text != text {
            self.status_text.clear();
            self.status_text.push_str(text);
            self.touch();
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            self.input_enabled = enabled;
            self.touch();
        }
    }
}
