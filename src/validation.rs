use thiserror::Error;

use crate::expr::Expr;

/// A single structural problem found in a design.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{context}: {message}")]
pub struct ValidationError {
    /// Eval name of the offending node.
    pub context: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(context: &dyn Expr, message: impl Into<String>) -> Self {
        Self {
            context: context.eval_name(),
            message: message.into(),
        }
    }
}

/// Every validation failure found in a design, reported together.
///
/// An empty collection means the design is valid; use [`into_result`]
/// to turn it into a `Result`.
///
/// [`into_result`]: ValidationErrors::into_result
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", render(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

fn render(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `context`.
    pub fn add(&mut self, context: &dyn Expr, message: impl Into<String>) {
        self.errors.push(ValidationError::new(context, message));
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends the failures of `other`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
