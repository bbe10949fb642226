use crate::models::ContextInput;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    #[default]
    Text,
    Pdf,
}

impl SourceMode {
    pub fn toggled(self) -> Self {
        match self {
            SourceMode::Text => SourceMode::Pdf,
            SourceMode::Pdf => SourceMode::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    Source,
    #[default]
    Context,
    Count,
    Difficulty,
    Filter,
    NegativeMarking,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Source,
        FormField::Context,
        FormField::Count,
        FormField::Difficulty,
        FormField::Filter,
        FormField::NegativeMarking,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Editable text with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index();
        self.value.insert_str(idx, s);
        self.cursor += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Fields of the setup screen that are not quiz settings.
#[derive(Debug, Clone, Default)]
pub struct SetupForm {
    pub source: SourceMode,
    pub focus: FormField,
    pub context: TextField,
    pub pdf_path: TextField,
    pub filter: TextField,
}

impl SetupForm {
    /// The text field that receives typing for the focused field, if any.
    pub fn focused_text_mut(&mut self) -> Option<&mut TextField> {
        match (self.focus, self.source) {
            (FormField::Context, SourceMode::Text) => Some(&mut self.context),
            (FormField::Context, SourceMode::Pdf) => Some(&mut self.pdf_path),
            (FormField::Filter, _) => Some(&mut self.filter),
            _ => None,
        }
    }

    pub fn context_input(&self) -> ContextInput {
        match self.source {
            SourceMode::Text => ContextInput::Text(self.context.value().to_string()),
            SourceMode::Pdf => {
                // Terminals often quote dragged-in paths.
                let path = self
                    .pdf_path
                    .value()
                    .trim()
                    .trim_matches(|c| c == '\'' || c == '"');
                if path.is_empty() {
                    ContextInput::Pdf(None)
                } else {
                    ContextInput::Pdf(Some(PathBuf::from(path)))
                }
            }
        }
    }
}
