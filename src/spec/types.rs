use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP methods an operation can be registered under.
///
/// Declaration order is the comparison order used when walking a path item's
/// operations, so `Ord` must stay derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::Cookie => write!(f, "Cookie"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl std::fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParameterStyle::Matrix => "Matrix",
            ParameterStyle::Label => "Label",
            ParameterStyle::Form => "Form",
            ParameterStyle::Simple => "Simple",
            ParameterStyle::SpaceDelimited => "SpaceDelimited",
            ParameterStyle::PipeDelimited => "PipeDelimited",
            ParameterStyle::DeepObject => "DeepObject",
        };
        write!(f, "{}", s)
    }
}

/// Either an inline object or a `$ref` pointer to a reusable component.
///
/// Only schemas use this in practice; the reference name doubles as the
/// schema's identity for cycle detection during comparison.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrReference<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Object(T),
}

/// Root of a parsed specification document.
///
/// Unknown top-level fields (`info`, `servers`, vendor extensions, ...) are
/// ignored on deserialization; the comparison only walks `paths` and resolves
/// schema references through `components`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Document {
    pub paths: BTreeMap<String, PathItem>,
    pub components: Option<Components>,
}

impl Document {
    /// Resolve a `#/components/schemas/<name>` reference to its definition.
    pub fn resolve_schema(&self, ref_path: &str) -> Option<&Schema> {
        let name = ref_path.strip_prefix("#/components/schemas/")?;
        self.components.as_ref()?.schemas.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Components {
    pub schemas: BTreeMap<String, Schema>,
}

/// The operations available at one route, plus route-level shared parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathItem {
    pub parameters: Vec<Parameter>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Iterate the operations present on this path item in [`Method`] order.
    pub fn methods(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::Get, self.get.as_ref()),
            (Method::Put, self.put.as_ref()),
            (Method::Post, self.post.as_ref()),
            (Method::Delete, self.delete.as_ref()),
            (Method::Options, self.options.as_ref()),
            (Method::Head, self.head.as_ref()),
            (Method::Patch, self.patch.as_ref()),
            (Method::Trace, self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub deprecated: bool,
    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: Option<ParameterLocation>,
    pub required: bool,
    pub deprecated: bool,
    pub allow_reserved: bool,
    pub explode: bool,
    pub style: Option<ParameterStyle>,
    pub content: BTreeMap<String, MediaType>,
    pub schema: Option<ObjectOrReference<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub content: BTreeMap<String, MediaType>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Response {
    pub content: BTreeMap<String, MediaType>,
    pub headers: BTreeMap<String, Header>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub encoding: BTreeMap<String, Encoding>,
    pub schema: Option<ObjectOrReference<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Encoding {
    pub headers: BTreeMap<String, Header>,
    pub style: Option<ParameterStyle>,
    pub explode: bool,
    pub allow_reserved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Header {
    pub content: BTreeMap<String, MediaType>,
    pub required: bool,
    pub deprecated: bool,
    pub allow_reserved: bool,
    pub explode: bool,
    pub style: Option<ParameterStyle>,
    pub schema: Option<ObjectOrReference<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: Option<String>,
    pub mapping: BTreeMap<String, String>,
}

/// One typed constant in a schema's `enum` list.
///
/// JSON does not distinguish int widths, so deserialization takes the first
/// representation that fits. `Other` captures constants of kinds the
/// comparison does not support (booleans, arrays, objects); encountering one
/// during a comparison is a configuration error, not a parse failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Other(serde_json::Value),
}

impl EnumValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnumValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            EnumValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EnumValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EnumValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnumValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumValue::Integer(v) => write!(f, "{}", v),
            EnumValue::Long(v) => write!(f, "{}", v),
            EnumValue::Double(v) => write!(f, "{}", v),
            EnumValue::String(v) => write!(f, "{}", v),
            EnumValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A type schema: scalar constraints, object properties, composition rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    pub deprecated: bool,
    pub nullable: bool,
    pub exclusive_maximum: bool,
    pub exclusive_minimum: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub unique_items: bool,
    /// Wire form is `additionalProperties: <bool | schema>`; a schema value
    /// means additional properties are allowed.
    #[serde(
        rename = "additionalProperties",
        deserialize_with = "de_additional_properties"
    )]
    pub additional_properties_allowed: bool,
    pub format: Option<String>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub pattern: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub min_properties: Option<u64>,
    pub multiple_of: Option<f64>,
    pub discriminator: Option<Discriminator>,
    pub required: Vec<String>,
    pub not: Option<Box<ObjectOrReference<Schema>>>,
    #[serde(rename = "enum")]
    pub enum_values: Vec<EnumValue>,
    pub one_of: Vec<ObjectOrReference<Schema>>,
    pub all_of: Vec<ObjectOrReference<Schema>>,
    pub any_of: Vec<ObjectOrReference<Schema>>,
    pub properties: BTreeMap<String, ObjectOrReference<Schema>>,
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            deprecated: false,
            nullable: false,
            exclusive_maximum: false,
            exclusive_minimum: false,
            read_only: false,
            write_only: false,
            unique_items: false,
            additional_properties_allowed: true,
            format: None,
            maximum: None,
            minimum: None,
            pattern: None,
            schema_type: None,
            max_items: None,
            min_items: None,
            max_length: None,
            min_length: None,
            min_properties: None,
            multiple_of: None,
            discriminator: None,
            required: Vec::new(),
            not: None,
            enum_values: Vec::new(),
            one_of: Vec::new(),
            all_of: Vec::new(),
            any_of: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

fn de_additional_properties<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(flag) => flag,
        _ => true,
    })
}
