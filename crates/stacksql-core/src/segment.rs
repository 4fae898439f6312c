//! Rendered SQL fragments.

use std::fmt;

use crate::driver::Statement;
use crate::error::Result;
use crate::param::Parameter;

/// A rendered piece of SQL together with the parameters of its placeholders.
///
/// The parameters are ordered exactly like the `?` placeholders in the text.
/// Segments are never modified after construction; composing segments moves
/// their parameters into the new segment in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    sql: String,
    parameters: Vec<Parameter>,
}

impl Segment {
    /// Creates a segment without parameters.
    #[must_use]
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a single-placeholder segment.
    #[must_use]
    pub fn placeholder(parameter: Parameter) -> Self {
        Self {
            sql: String::from("?"),
            parameters: vec![parameter],
        }
    }

    /// Creates a segment from `sql` and the segments it was built from.
    ///
    /// `parts` must be listed in the order they appear in `sql`.
    #[must_use]
    pub fn compose(sql: String, parts: impl IntoIterator<Item = Self>) -> Self {
        let mut parameters = Vec::new();
        for part in parts {
            parameters.extend(part.parameters);
        }
        Self { sql, parameters }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters in placeholder order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Consumes the segment and returns the SQL and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Parameter>) {
        (self.sql, self.parameters)
    }

    /// Binds every parameter to `statement`, starting at position 1.
    pub fn bind(&self, statement: &mut dyn Statement) -> Result<()> {
        for (index, parameter) in self.parameters.iter().enumerate() {
            parameter.bind(statement, index + 1)?;
        }
        Ok(())
    }

    /// Describes the statement and its parameters for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.parameters.is_empty() {
            return self.sql.clone();
        }
        let values: Vec<String> = self.parameters.iter().map(Parameter::describe).collect();
        format!("{} -- [{}]", self.sql, values.join(", "))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
