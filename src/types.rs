#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use mongodb::bson::{Bson, Document, spec::ElementType};
use serde::{Deserialize, Serialize};

/// The value of one expected key in a document, classified by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Field {
    /// The key is absent.
    #[default]
    Missing,
    /// The key holds `null` (or the deprecated `undefined`).
    Null,
    /// The key holds a string.
    Text(String),
    /// The key holds a double, 32-bit or 64-bit integer.
    Number(f64),
    /// The key holds any other BSON value, kept as read.
    Other(Bson),
}

impl Field {
    /// Classifies a BSON value looked up from a document.
    pub fn from_bson(value: Option<&Bson>) -> Self {
        match value {
            None => Field::Missing,
            Some(Bson::Null | Bson::Undefined) => Field::Null,
            Some(Bson::String(s)) => Field::Text(s.clone()),
            Some(Bson::Double(n)) => Field::Number(*n),
            Some(Bson::Int32(n)) => Field::Number(f64::from(*n)),
            Some(Bson::Int64(n)) => Field::Number(*n as f64),
            Some(other) => Field::Other(other.clone()),
        }
    }

    /// Returns the string if this field holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this field holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for text that is not empty.
    pub fn is_non_empty_text(&self) -> bool {
        self.as_text().is_some_and(|s| !s.is_empty())
    }

    /// True for any numeric value, `NaN` included.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Short name of what this field holds, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Field::Missing => "missing",
            Field::Null => "null",
            Field::Text(s) if s.is_empty() => "an empty string",
            Field::Text(_) => "a string",
            Field::Number(_) => "a number",
            Field::Other(value) => type_name(value),
        }
    }

    /// A key under which equal values collide, used to count distinct values.
    ///
    /// Numbers compare by value (`0` and `-0` collide, as do all `NaN`s),
    /// sub-documents and arrays by content.
    pub fn distinct_key(&self) -> String {
        match self {
            Field::Missing => "missing".to_string(),
            Field::Null => "null".to_string(),
            Field::Text(s) => Bson::String(s.clone()).into_relaxed_extjson().to_string(),
            Field::Number(n) if *n == 0.0 => "0".to_string(),
            Field::Number(n) => Bson::Double(*n).into_relaxed_extjson().to_string(),
            Field::Other(value) => value.clone().into_relaxed_extjson().to_string(),
        }
    }
}

/// Readable name of a BSON value's type, with an article.
pub fn type_name(value: &Bson) -> &'static str {
    match value.element_type() {
        ElementType::Double | ElementType::Int32 | ElementType::Int64 => "a number",
        ElementType::String => "a string",
        ElementType::EmbeddedDocument => "a document",
        ElementType::Array => "an array",
        ElementType::Binary => "binary data",
        ElementType::ObjectId => "an ObjectId",
        ElementType::Boolean => "a boolean",
        ElementType::DateTime => "a date",
        ElementType::Null | ElementType::Undefined => "null",
        ElementType::RegularExpression => "a regular expression",
        ElementType::JavaScriptCode | ElementType::JavaScriptCodeWithScope => "JavaScript code",
        ElementType::Timestamp => "a timestamp",
        ElementType::Decimal128 => "a Decimal128",
        _ => "an unsupported value",
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

/// One employee document from the graded collection.
///
/// Only the four keys the lab queries against are kept; anything else in the
/// document (including `_id`) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Employee name, expected to be non-empty text.
    pub name:       Field,
    /// Department, expected to be non-empty text.
    pub department: Field,
    /// Salary, expected to be numeric.
    pub salary:     Field,
    /// Age, expected to be numeric.
    pub age:        Field,
}

impl Record {
    /// Creates a well-typed record.
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        salary: impl Into<Field>,
        age: impl Into<Field>,
    ) -> Self {
        Self {
            name:       Field::Text(name.into()),
            department: Field::Text(department.into()),
            salary:     salary.into(),
            age:        age.into(),
        }
    }

    /// Reads the expected keys out of a BSON document.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            name:       Field::from_bson(doc.get("name")),
            department: Field::from_bson(doc.get("department")),
            salary:     Field::from_bson(doc.get("salary")),
            age:        Field::from_bson(doc.get("age")),
        }
    }

    /// Returns the first key whose value does not have the expected type,
    /// along with the offending value.
    pub fn schema_violation(&self) -> Option<(&'static str, &Field)> {
        [
            ("name", &self.name, self.name.is_non_empty_text()),
            ("department", &self.department, self.department.is_non_empty_text()),
            ("salary", &self.salary, self.salary.is_number()),
            ("age", &self.age, self.age.is_number()),
        ]
        .into_iter()
        .find(|(_, _, ok)| !ok)
        .map(|(key, field, _)| (key, field))
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{Decimal128, doc, oid::ObjectId};

    use super::*;

    #[test]
    fn classifies_bson_numbers_and_text() {
        let doc = doc! {
            "_id": ObjectId::new(),
            "name": "Rahul",
            "department": "IT",
            "salary": 60000_i64,
            "age": 22_i32,
        };
        let record = Record::from_document(&doc);

        assert_eq!(record, Record::new("Rahul", "IT", 60000.0, 22.0));
        assert_eq!(record.schema_violation(), None);
    }

    #[test]
    fn missing_null_and_foreign_types_are_kept_apart() {
        let doc = doc! {
            "name": mongodb::bson::Bson::Null,
            "salary": "60000",
            "age": true,
        };
        let record = Record::from_document(&doc);

        assert_eq!(record.name, Field::Null);
        assert_eq!(record.department, Field::Missing);
        assert_eq!(record.salary, Field::Text("60000".into()));
        assert_eq!(record.age, Field::Other(Bson::Boolean(true)));
        assert_eq!(record.age.kind(), "a boolean");
    }

    #[test]
    fn foreign_types_have_readable_names() {
        let doc = doc! { "name": "Asha", "department": { "code": 7 }, "age": [30, 31] };
        let record = Record::from_document(&doc);

        assert_eq!(record.department.kind(), "a document");
        assert_eq!(record.age.kind(), "an array");
        assert_eq!(
            record.schema_violation().map(|(key, field)| (key, field.kind())),
            Some(("department", "a document"))
        );
    }

    #[test]
    fn distinct_keys_compare_values_not_types() {
        let key = |bson: Bson| Field::from_bson(Some(&bson)).distinct_key();

        assert_ne!(key(Bson::Boolean(true)), key(Bson::Boolean(false)));
        assert_ne!(key(Bson::Document(doc! { "a": 1 })), key(Bson::Document(doc! { "b": 2 })));
        assert_eq!(key(Bson::Document(doc! { "a": 1 })), key(Bson::Document(doc! { "a": 1 })));
        assert_ne!(key(Bson::String("1".into())), key(Bson::Int32(1)));
        assert_eq!(key(Bson::Int32(1)), key(Bson::Double(1.0)));
        assert_eq!(key(Bson::Double(0.0)), key(Bson::Double(-0.0)));
        assert_eq!(key(Bson::Double(f64::NAN)), key(Bson::Double(f64::NAN)));
        assert_ne!(Field::Missing.distinct_key(), Field::Null.distinct_key());
    }

    #[test]
    fn decimal128_is_not_treated_as_a_number() {
        let doc = doc! { "salary": Decimal128::from_bytes([0; 16]) };
        let record = Record::from_document(&doc);

        assert!(matches!(record.salary, Field::Other(_)));
    }

    #[test]
    fn schema_violation_reports_first_bad_key() {
        let record = Record {
            salary: Field::Text("60000".into()),
            age: Field::Missing,
            ..Record::new("Asha", "HR", 0.0, 0.0)
        };

        let (key, field) = record.schema_violation().expect("salary is text");
        assert_eq!(key, "salary");
        assert_eq!(field.kind(), "a string");
    }

    #[test]
    fn empty_name_violates_schema() {
        let record = Record::new("", "HR", 25000.0, 40.0);

        assert_eq!(record.schema_violation().map(|(key, _)| key), Some("name"));
    }
}
