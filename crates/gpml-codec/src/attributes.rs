//! Typed attribute access backed by an [`AttributeTable`].
//!
//! # Overview
//!
//! - [`Attributes`] reads the attributes of one parsed element. Absent
//!   optional attributes fall back to the table default, absent required
//!   ones raise [`ConverterError::MissingRequiredAttribute`] and values that
//!   do not parse raise [`ConverterError::MalformedValue`].
//! - [`AttributeWriter`] assembles an element for writing and leaves out
//!   values equal to the table default.
//! - [`format_number`] renders floats the way both formats expect.

use std::{borrow::Cow, fmt::Display, str::FromStr};

use gpml_core::color::Color;

use crate::{
    dom::Element,
    error::{ConverterError, Result},
    schema::AttributeTable,
};

/// Read access to the attributes of one element.
pub(crate) struct Attributes<'a> {
    element: &'a Element,
    path: &'static str,
    table: &'static AttributeTable,
}

impl<'a> Attributes<'a> {
    pub fn new(element: &'a Element, path: &'static str, table: &'static AttributeTable) -> Self {
        Self {
            element,
            path,
            table,
        }
    }

    /// Whether the attribute is written in the document.
    pub fn is_present(&self, name: &str) -> bool {
        self.element.attribute(name).is_some()
    }

    /// The written value, or the table default.
    fn value(&self, name: &str) -> Option<Cow<'a, str>> {
        match self.element.attribute(name) {
            Some(value) => Some(Cow::Borrowed(value)),
            None => self
                .table
                .get(self.path, name)
                .and_then(|info| info.default())
                .map(Cow::Borrowed),
        }
    }

    fn require(&self, name: &str) -> Result<Cow<'a, str>> {
        self.value(name)
            .ok_or_else(|| ConverterError::missing(self.path, name))
    }

    pub fn text(&self, name: &str) -> Result<String> {
        self.require(name).map(Cow::into_owned)
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.value(name).map(Cow::into_owned)
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        let value = self.require(name)?;
        self.parse_float(name, &value)
    }

    pub fn optional_float(&self, name: &str) -> Result<Option<f64>> {
        self.value(name)
            .map(|value| self.parse_float(name, &value))
            .transpose()
    }

    fn parse_float(&self, name: &str, value: &str) -> Result<f64> {
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            Ok(_) => Err(ConverterError::malformed(self.path, name, value, "not a finite number")),
            Err(err) => Err(ConverterError::malformed(self.path, name, value, err.to_string())),
        }
    }

    pub fn optional_integer(&self, name: &str) -> Result<Option<i32>> {
        self.value(name)
            .map(|value| {
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|err| ConverterError::malformed(self.path, name, value.as_ref(), err.to_string()))
            })
            .transpose()
    }

    pub fn color(&self, name: &str) -> Result<Color> {
        let value = self.require(name)?;
        Color::new(&value).map_err(|reason| ConverterError::malformed(self.path, name, value.as_ref(), reason))
    }

    /// Parses a closed vocabulary value.
    pub fn parse<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.require(name)?;
        value
            .parse::<T>()
            .map_err(|err| ConverterError::malformed(self.path, name, value.as_ref(), err.to_string()))
    }

    /// The value, checked against the declared value kind.
    pub fn checked(&self, name: &str) -> Result<String> {
        let value = self.text(name)?;
        if let Some(info) = self.table.get(self.path, name) {
            info.kind()
                .check(&value)
                .map_err(|reason| ConverterError::malformed(self.path, name, &value, reason))?;
        }
        Ok(value)
    }
}

/// Builds one element, eliding defaults.
pub(crate) struct AttributeWriter {
    element: Element,
    path: &'static str,
    table: &'static AttributeTable,
}

impl AttributeWriter {
    pub fn new(name: &str, path: &'static str, table: &'static AttributeTable) -> Self {
        Self {
            element: Element::new(name),
            path,
            table,
        }
    }

    /// Writes the value unconditionally.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.element.set_attribute(name, value);
        self
    }

    /// Writes the value unless it equals the table default.
    pub fn set_non_default(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !self.table.is_default(self.path, name, &value) {
            self.element.set_attribute(name, value);
        }
        self
    }

    pub fn set_optional(&mut self, name: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.element.set_attribute(name, value);
        }
        self
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> &mut Self {
        self.set_non_default(name, format_number(value))
    }

    pub fn set_color(&mut self, name: &str, color: Color) -> &mut Self {
        self.set_non_default(name, color.to_gpml_hex())
    }

    pub fn child(&mut self, child: Element) -> &mut Self {
        self.element.push_child(child);
        self
    }

    /// Adds the child unless it has neither attributes nor children.
    pub fn child_if_filled(&mut self, child: Element) -> &mut Self {
        if !child.is_empty() {
            self.element.push_child(child);
        }
        self
    }

    pub fn finish(self) -> Element {
        self.element
    }
}

/// Renders a number so that integral values keep one decimal (`12.0`).
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
