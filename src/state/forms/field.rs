//! Form field value objects for the single-page forms

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// A single form field with its configuration, value, and current error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub error: Option<String>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
            error: None,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            is_multiline,
            error: None,
        }
    }

    /// Create a new boolean field
    pub fn flag(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Flag(false),
            is_multiline: false,
            error: None,
        }
    }

    /// Get the text value (returns empty string for flag fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the boolean value (returns false for text fields)
    pub fn as_flag(&self) -> bool {
        match &self.value {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    /// Trimmed text value
    pub fn trimmed(&self) -> &str {
        self.as_text().trim()
    }

    /// Push a character to the field value; editing clears the error
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
            self.error = None;
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
            self.error = None;
        }
    }

    /// Flip a flag field; editing clears the error
    pub fn toggle(&mut self) {
        if let FieldValue::Flag(b) = &mut self.value {
            *b = !*b;
            self.error = None;
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Flag(b) => *b = false,
        }
        self.error = None;
    }

    /// Record a validation failure on this field
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(b) => if *b { "[x]" } else { "[ ]" }.to_string(),
        }
    }
}
