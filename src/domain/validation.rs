use std::fmt;

use indexmap::IndexMap;

/// Field-level validation failures, keyed by form field name.
///
/// Kept in insertion order so messages come back in the order the form
/// declares its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: IndexMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message recorded for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Records `message` when `value` is empty or whitespace only.
pub(crate) fn require_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_message_per_field_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add("price", "Price must be greater than 0");
        errors.add("name", "Product name is required");
        errors.add("price", "ignored");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["price", "name"]);
        assert_eq!(
            errors.to_string(),
            "price: Price must be greater than 0; name: Product name is required"
        );
    }

    #[test]
    fn whitespace_only_text_is_missing() {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", "   ", "Product name is required");
        require_text(&mut errors, "image", "https://example.com/a.jpg", "unused");
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert!(errors.get("image").is_none());
        assert!(errors.into_result().is_err());
    }
}
