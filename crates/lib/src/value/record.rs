//! Named records with ordered fields.
//!
//! A [`Record`] is the dynamic counterpart of a struct: it carries a type name and a fixed,
//! ordered set of [`Field`]s. Each field has a visibility flag (`exported`) and a mutability flag.
//! Path traversal only ever sees exported fields; writes additionally require the field to be
//! mutable.

use std::fmt;

use super::Value;

/// A single named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name, unique within the record
    pub name: String,
    /// Current field value
    pub value: Value,
    /// Whether path traversal may see this field
    pub exported: bool,
    /// Whether writes through a path may replace this field's value
    pub mutable: bool,
}

impl Field {
    /// Creates an exported, mutable field
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            exported: true,
            mutable: true,
        }
    }

    /// Returns true if the field is visible to path traversal and may be written
    pub fn is_writable(&self) -> bool {
        self.exported && self.mutable
    }
}

/// A named aggregate of ordered fields.
///
/// Fields cannot be added or removed through path operations; only their values change.
/// Deleting a field through a path resets it to its zero value.
///
/// # Examples
///
/// ```
/// # use dynpath::value::{Record, Value};
/// let person = Record::new("Person")
///     .field("Name", "Ada")
///     .field("Age", 36)
///     .private_field("secret", "hidden");
///
/// assert_eq!(person.name(), "Person");
/// assert_eq!(person.get("Name"), Some(&Value::from("Ada")));
/// assert_eq!(person.exported_fields().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

impl Record {
    /// Creates a record with the given type name and no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder: appends an exported, mutable field
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::new(name, value))
    }

    /// Builder: appends a field hidden from path traversal
    pub fn private_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field {
            exported: false,
            ..Field::new(name, value)
        })
    }

    /// Builder: appends an exported field that cannot be written through a path
    pub fn readonly_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field {
            mutable: false,
            ..Field::new(name, value)
        })
    }

    /// Builder: appends a fully specified field, replacing any field of the same name in place
    pub fn with_field(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Returns the record's type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of fields, exported or not
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name, regardless of visibility
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field mutably by name, regardless of visibility
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Gets the value of an exported field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field_by_name(name)
            .filter(|f| f.exported)
            .map(|f| &f.value)
    }

    /// Gets a mutable reference to the value of an exported field
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.field_mut(name)
            .filter(|f| f.exported)
            .map(|f| &mut f.value)
    }

    /// Replaces the value of a field, returning the previous value.
    ///
    /// Returns `None` if no field with that name exists. Visibility and mutability flags are not
    /// checked; they only constrain path-based access.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        let field = self.field_mut(name)?;
        Some(std::mem::replace(&mut field.value, value.into()))
    }

    /// Iterates over all fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Iterates mutably over all fields in declaration order
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut()
    }

    /// Iterates over exported fields in declaration order
    pub fn exported_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.exported)
    }

    /// Returns a copy of this record with every field reset to its zero value
    pub fn zeroed(&self) -> Self {
        Self {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| Field {
                    value: f.value.zeroed(),
                    ..f.clone()
                })
                .collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (i, field) in self.exported_fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        write!(f, "}}")
    }
}
