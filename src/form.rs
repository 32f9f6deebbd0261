//! The contact form: per-field validation and keyboard navigation.
//!
//! Fields are validated when focus leaves them and again on submit. Enter moves to the next
//! focusable field and submits from the last one. Nothing is sent anywhere; a successful submit
//! shows a notice and resets the form.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

/// Shortest accepted text input, in characters.
pub const MIN_TEXT_LEN: usize = 2;

/// Notice shown after a successful submit.
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Why a field's value was rejected.
pub enum FieldError {
    /// Required field left empty.
    #[error("This field is required")]
    Required,
    /// Email field without a plausible address.
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// Text field shorter than [`MIN_TEXT_LEN`].
    #[error("This field must be at least 2 characters")]
    TooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Input type of a field.
pub enum FieldKind {
    /// Single-line text, at least two characters.
    Text,
    /// Email address.
    Email,
    /// Free text, only checked when required.
    TextArea,
    /// Not shown and never focused.
    Hidden,
}

#[derive(Debug, Clone)]
/// One form control.
pub struct Field {
    /// Submission key.
    pub name: String,
    /// Label shown next to the input.
    pub label: String,
    /// Input type.
    pub kind: FieldKind,
    /// Current value.
    pub value: String,
    /// Value restored on reset.
    pub default_value: String,
    /// Whether an empty value is rejected.
    pub required: bool,
    /// Disabled fields are skipped by keyboard navigation.
    pub disabled: bool,
    /// Excluded from the tab order (`tabindex="-1"`).
    pub skip_tab: bool,
    /// Error currently displayed under the field.
    pub error: Option<FieldError>,
}

impl Field {
    #[must_use]
    /// An enabled, optional, empty field.
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            default_value: String::new(),
            required: false,
            disabled: false,
            skip_tab: false,
            error: None,
        }
    }

    #[must_use]
    /// Marks the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    /// Sets the value the field starts with and resets to.
    pub fn with_default(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.default_value = value.to_string();
        self
    }

    #[must_use]
    /// Whether keyboard navigation may land here.
    pub fn is_focusable(&self) -> bool {
        !self.disabled && !self.skip_tab && self.kind != FieldKind::Hidden
    }
}

/// Checks one field's trimmed value. A required field left empty always reports
/// [`FieldError::Required`].
///
/// # Errors
///
/// Returns the reason the value is rejected.
pub fn validate_field(field: &Field) -> Result<(), FieldError> {
    let value = field.value.trim();
    if field.required && value.is_empty() {
        return Err(FieldError::Required);
    }
    match field.kind {
        FieldKind::Email if !EMAIL.is_match(value) => Err(FieldError::InvalidEmail),
        FieldKind::Text if value.chars().count() < MIN_TEXT_LEN => Err(FieldError::TooShort),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of pressing Enter inside the form.
pub enum EnterOutcome {
    /// Focus moved to the field at this index.
    Focused(usize),
    /// The last field was focused, so the form was submitted.
    Submitted(bool),
}

#[derive(Debug, Clone)]
/// The contact form and its transient notices.
pub struct ContactForm {
    fields: Vec<Field>,
    focus: usize,
    success: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(vec![
            Field::new("name", "Name", FieldKind::Text).required(),
            Field::new("email", "Email", FieldKind::Email).required(),
            Field::new("message", "Message", FieldKind::TextArea).required(),
            Field::new("source", "Source", FieldKind::Hidden).with_default("folio"),
        ])
    }
}

impl ContactForm {
    #[must_use]
    /// A form over `fields`, focused on the first focusable one.
    pub fn new(fields: Vec<Field>) -> Self {
        let focus = fields.iter().position(Field::is_focusable).unwrap_or(0);
        Self {
            fields,
            focus,
            success: None,
        }
    }

    #[must_use]
    /// All fields in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    /// The success notice, while shown.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Validates field `index` as focus leaves it, recording any error. Returns whether it passed.
    pub fn blur(&mut self, index: usize) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return true;
        };
        field.error = validate_field(field).err();
        field.error.is_none()
    }

    /// Types `c` into the focused field, clearing its error.
    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
            field.error = None;
        }
    }

    /// Deletes the last character of the focused field, clearing its error.
    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
            field.error = None;
        }
    }

    /// Moves focus to the next focusable field, validating the one left. Wraps around.
    pub fn focus_next(&mut self) {
        if let Some(next) = self.focusable_after(self.focus, true) {
            self.move_focus(next);
        }
    }

    /// Moves focus to the previous focusable field, validating the one left. Wraps around.
    pub fn focus_prev(&mut self) {
        if let Some(prev) = self.focusable_before(self.focus) {
            self.move_focus(prev);
        }
    }

    /// Enter: focus the next focusable field, or submit from the last one.
    pub fn enter(&mut self) -> EnterOutcome {
        match self.focusable_after(self.focus, false) {
            Some(next) => {
                self.move_focus(next);
                EnterOutcome::Focused(next)
            }
            None => EnterOutcome::Submitted(self.submit()),
        }
    }

    /// Validates every field; on success shows the notice and resets the values.
    pub fn submit(&mut self) -> bool {
        let mut valid = true;
        for index in 0..self.fields.len() {
            valid &= self.blur(index);
        }
        if valid {
            info!(fields = self.fields.len(), "contact form submitted");
            self.success = Some(SUCCESS_MESSAGE.to_string());
            self.reset();
        }
        valid
    }

    /// Restores default values and clears errors.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clone_from(&field.default_value);
            field.error = None;
        }
        self.focus = self.fields.iter().position(Field::is_focusable).unwrap_or(0);
    }

    /// Hides the success notice.
    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    fn move_focus(&mut self, to: usize) {
        let from = self.focus;
        self.focus = to;
        self.blur(from);
    }

    fn focusable_after(&self, from: usize, wrap: bool) -> Option<usize> {
        let later = self
            .fields
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, f)| f.is_focusable())
            .map(|(i, _)| i);
        if later.is_some() || !wrap {
            return later;
        }
        self.fields
            .iter()
            .take(from)
            .position(Field::is_focusable)
    }

    fn focusable_before(&self, from: usize) -> Option<usize> {
        let earlier = self.fields[..from.min(self.fields.len())]
            .iter()
            .rposition(Field::is_focusable);
        earlier.or_else(|| {
            self.fields
                .iter()
                .rposition(Field::is_focusable)
                .filter(|&i| i > from)
        })
    }
}

#[cfg(test)]
#[path = "tests/form.rs"]
mod tests;
