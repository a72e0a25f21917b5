use super::context::DiffContext;
use super::merge::{compare_key_set, compare_keyed};
use super::result::{DiffError, DiffKind, DiffResult};
use super::scalar::{compare_bool, compare_optional, compare_scalar};
use crate::spec::{Discriminator, Document, EnumValue, ObjectOrReference, Schema};
use std::cmp::Ordering;
use std::fmt;

/// Recursive comparator for type schemas.
///
/// One instance lives for one top-level document comparison: it resolves each
/// side's `$ref`s against that side's own document and tracks the schema
/// identities currently being compared so self-referencing type graphs
/// terminate. Re-entering an identity already on the stack skips recursion
/// for that occurrence; the cycle's content is compared at its first
/// occurrence.
///
/// Composition members (`oneOf`/`allOf`/`anyOf`) with a `$ref` identity are
/// matched by reference name, so reordering named members alone produces no
/// diff. Anonymous members have no stable identity and are matched by
/// position — a best-effort that misreports pure reorders of anonymous
/// members as content changes.
pub(crate) struct SchemaComparator<'a> {
    previous_doc: &'a Document,
    actual_doc: &'a Document,
    visiting: Vec<(Option<&'a str>, Option<&'a str>)>,
}

fn resolve<'a>(
    doc: &'a Document,
    schema: &'a ObjectOrReference<Schema>,
) -> Result<(Option<&'a str>, &'a Schema), DiffError> {
    match schema {
        ObjectOrReference::Object(schema) => Ok((None, schema)),
        ObjectOrReference::Ref { ref_path } => doc
            .resolve_schema(ref_path)
            .map(|schema| (Some(ref_path.as_str()), schema))
            .ok_or_else(|| DiffError::UnresolvedReference {
                ref_path: ref_path.clone(),
            }),
    }
}

fn schema_name(ref_path: &str) -> &str {
    ref_path
        .strip_prefix("#/components/schemas/")
        .unwrap_or(ref_path)
}

impl<'a> SchemaComparator<'a> {
    pub(crate) fn new(previous_doc: &'a Document, actual_doc: &'a Document) -> Self {
        SchemaComparator {
            previous_doc,
            actual_doc,
            visiting: Vec::new(),
        }
    }

    /// Entry point for optional schema slots (media types, headers).
    pub(crate) fn compare(
        &mut self,
        previous: Option<&'a ObjectOrReference<Schema>>,
        actual: Option<&'a ObjectOrReference<Schema>>,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_optional(
            previous,
            actual,
            context,
            |prev, act, ctx, out| self.compare_existing(prev, act, ctx, out),
            out,
        )
    }

    fn compare_existing(
        &mut self,
        previous: &'a ObjectOrReference<Schema>,
        actual: &'a ObjectOrReference<Schema>,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        let (previous_name, previous_schema) = resolve(self.previous_doc, previous)?;
        let (actual_name, actual_schema) = resolve(self.actual_doc, actual)?;

        // Anonymous inline schemas are finite trees; only named references
        // can close a cycle, so only they go on the stack.
        let identity = (previous_name, actual_name);
        if identity.0.is_none() && identity.1.is_none() {
            return self.compare_fields(previous_schema, actual_schema, context, out);
        }
        if self.visiting.contains(&identity) {
            return Ok(());
        }
        self.visiting.push(identity);
        let result = self.compare_fields(previous_schema, actual_schema, context, out);
        self.visiting.pop();
        result
    }

    fn compare_fields(
        &mut self,
        previous: &'a Schema,
        actual: &'a Schema,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_bool(
            previous.deprecated,
            actual.deprecated,
            &context.append_schema("deprecated"),
            "schema is no more deprecated",
            "schema is now deprecated",
            out,
        );
        compare_bool(
            previous.nullable,
            actual.nullable,
            &context.append_schema("nullable"),
            "schema does not allow null any more",
            "schema allows null value from now",
            out,
        );
        compare_bool(
            previous.exclusive_maximum,
            actual.exclusive_maximum,
            &context.append_schema("exclusiveMaximum"),
            "schema max value is no more exclusive",
            "schema max value is now exclusive",
            out,
        );
        compare_bool(
            previous.exclusive_minimum,
            actual.exclusive_minimum,
            &context.append_schema("exclusiveMinimum"),
            "schema min value is no more exclusive",
            "schema min value is now exclusive",
            out,
        );
        compare_bool(
            previous.read_only,
            actual.read_only,
            &context.append_schema("readOnly"),
            "value is not readonly any more",
            "value is now readonly",
            out,
        );
        compare_bool(
            previous.unique_items,
            actual.unique_items,
            &context.append_schema("uniqueItems"),
            "elements are no more unique",
            "all elements are now unique",
            out,
        );
        compare_bool(
            previous.write_only,
            actual.write_only,
            &context.append_schema("writeOnly"),
            "value is not writeonly any more",
            "value is now writeonly",
            out,
        );
        compare_bool(
            previous.additional_properties_allowed,
            actual.additional_properties_allowed,
            &context.append_schema("additionalProperties"),
            "additional properties are not allowed any more",
            "additional properties are now allowed",
            out,
        );

        compare_scalar(
            previous.format.as_ref(),
            actual.format.as_ref(),
            &context.append_schema("format"),
            "schema format has changed",
            out,
        );
        compare_scalar(
            previous.maximum.as_ref(),
            actual.maximum.as_ref(),
            &context.append_schema("maximum"),
            "schema maximum value has changed",
            out,
        );
        compare_scalar(
            previous.minimum.as_ref(),
            actual.minimum.as_ref(),
            &context.append_schema("minimum"),
            "schema minimum value has changed",
            out,
        );
        compare_scalar(
            previous.pattern.as_ref(),
            actual.pattern.as_ref(),
            &context.append_schema("pattern"),
            "schema pattern has changed",
            out,
        );
        compare_scalar(
            previous.schema_type.as_ref(),
            actual.schema_type.as_ref(),
            &context.append_schema("type"),
            "schema type has changed",
            out,
        );
        compare_scalar(
            previous.max_items.as_ref(),
            actual.max_items.as_ref(),
            &context.append_schema("maxItems"),
            "array max items has changed",
            out,
        );
        compare_scalar(
            previous.min_items.as_ref(),
            actual.min_items.as_ref(),
            &context.append_schema("minItems"),
            "array min items has changed",
            out,
        );
        compare_scalar(
            previous.max_length.as_ref(),
            actual.max_length.as_ref(),
            &context.append_schema("maxLength"),
            "max length has changed",
            out,
        );
        compare_scalar(
            previous.min_length.as_ref(),
            actual.min_length.as_ref(),
            &context.append_schema("minLength"),
            "min length has changed",
            out,
        );
        compare_scalar(
            previous.min_properties.as_ref(),
            actual.min_properties.as_ref(),
            &context.append_schema("minProperties"),
            "min properties has changed",
            out,
        );
        compare_scalar(
            previous.multiple_of.as_ref(),
            actual.multiple_of.as_ref(),
            &context.append_schema("multipleOf"),
            "value 'multiple of' has changed",
            out,
        );

        compare_optional(
            previous.discriminator.as_ref(),
            actual.discriminator.as_ref(),
            context.append_schema("discriminator"),
            compare_discriminator,
            out,
        )?;

        // Required is a name set: matched entries carry no content to diff.
        compare_key_set(
            previous.required.iter().map(String::as_str).collect(),
            actual.required.iter().map(String::as_str).collect(),
            |_| context.append_schema("required"),
            out,
        )?;

        self.compare(
            previous.not.as_deref(),
            actual.not.as_deref(),
            context.append_schema("not"),
            out,
        )?;

        compare_enum_values(
            &previous.enum_values,
            &actual.enum_values,
            context.append_schema("enum"),
            out,
        )?;

        self.compare_composition(
            &previous.one_of,
            &actual.one_of,
            context.append_schema("oneOf"),
            out,
        )?;
        self.compare_composition(
            &previous.all_of,
            &actual.all_of,
            context.append_schema("allOf"),
            out,
        )?;
        self.compare_composition(
            &previous.any_of,
            &actual.any_of,
            context.append_schema("anyOf"),
            out,
        )?;

        let prev_props: Vec<(&str, &ObjectOrReference<Schema>)> = previous
            .properties
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
            .collect();
        let act_props: Vec<(&str, &ObjectOrReference<Schema>)> = actual
            .properties
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
            .collect();
        compare_keyed(
            prev_props,
            act_props,
            |name| context.append_schema(name),
            |prev, act, ctx, out| self.compare_existing(prev, act, ctx, out),
            out,
        )
    }

    fn compare_composition(
        &mut self,
        previous: &'a [ObjectOrReference<Schema>],
        actual: &'a [ObjectOrReference<Schema>],
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        let (prev_named, prev_anon) = split_members(previous);
        let (act_named, act_anon) = split_members(actual);

        compare_keyed(
            prev_named,
            act_named,
            |name| context.append_schema(name),
            |prev, act, ctx, out| self.compare_existing(prev, act, ctx, out),
            out,
        )?;

        for (prev, act) in prev_anon.iter().zip(act_anon.iter()) {
            self.compare_existing(prev, act, context.clone(), out)?;
        }
        let matched = prev_anon.len().min(act_anon.len());
        for _ in &prev_anon[matched..] {
            out.push(DiffResult::with_message(
                DiffKind::Removed,
                context.clone(),
                "anonymous member has been removed",
            ));
        }
        for _ in &act_anon[matched..] {
            out.push(DiffResult::with_message(
                DiffKind::Added,
                context.clone(),
                "anonymous member has been added",
            ));
        }
        Ok(())
    }
}

type NamedMembers<'a> = Vec<(&'a str, &'a ObjectOrReference<Schema>)>;

fn split_members(members: &[ObjectOrReference<Schema>]) -> (NamedMembers<'_>, Vec<&ObjectOrReference<Schema>>) {
    let mut named = Vec::new();
    let mut anonymous = Vec::new();
    for member in members {
        match member {
            ObjectOrReference::Ref { ref_path } => named.push((schema_name(ref_path), member)),
            ObjectOrReference::Object(_) => anonymous.push(member),
        }
    }
    (named, anonymous)
}

fn compare_discriminator(
    previous: &Discriminator,
    actual: &Discriminator,
    context: DiffContext,
    out: &mut Vec<DiffResult>,
) -> Result<(), DiffError> {
    compare_scalar(
        previous.property_name.as_ref(),
        actual.property_name.as_ref(),
        &context.append_schema("propertyName"),
        "discriminator property has changed",
        out,
    );

    let mapping_context = context.append_schema("mapping");
    let prev_mapping: Vec<(&str, &String)> = previous
        .mapping
        .iter()
        .map(|(name, target)| (name.as_str(), target))
        .collect();
    let act_mapping: Vec<(&str, &String)> = actual
        .mapping
        .iter()
        .map(|(name, target)| (name.as_str(), target))
        .collect();
    compare_keyed(
        prev_mapping,
        act_mapping,
        |name| mapping_context.append_schema(name),
        |prev, act, ctx, out| {
            compare_scalar(
                Some(prev),
                Some(act),
                &ctx,
                "discriminator mapping has changed",
                out,
            );
            Ok(())
        },
        out,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstantKind {
    String,
    Integer,
    Long,
    Double,
}

fn constant_kind(value: &EnumValue, context: &DiffContext) -> Result<ConstantKind, DiffError> {
    match value {
        EnumValue::String(_) => Ok(ConstantKind::String),
        EnumValue::Integer(_) => Ok(ConstantKind::Integer),
        EnumValue::Long(_) => Ok(ConstantKind::Long),
        EnumValue::Double(_) => Ok(ConstantKind::Double),
        EnumValue::Other(_) => Err(DiffError::UnsupportedEnumValue {
            context: context.clone(),
        }),
    }
}

/// Compare two enum constant lists.
///
/// The first element's type selects the comparator for the whole list. Equal
/// sample types reduce to a set difference under the type's natural order;
/// differing sample types are a full list replacement with no element
/// correspondence across types.
fn compare_enum_values(
    previous: &[EnumValue],
    actual: &[EnumValue],
    context: DiffContext,
    out: &mut Vec<DiffResult>,
) -> Result<(), DiffError> {
    let same_kind = match (previous.first(), actual.first()) {
        (None, None) => return Ok(()),
        (Some(prev), Some(act)) => {
            constant_kind(prev, &context)? == constant_kind(act, &context)?
        }
        (Some(prev), None) => {
            constant_kind(prev, &context)?;
            false
        }
        (None, Some(act)) => {
            constant_kind(act, &context)?;
            false
        }
    };

    if !same_kind {
        // A supported sample does not vouch for the rest of the list.
        for value in previous.iter().chain(actual) {
            constant_kind(value, &context)?;
        }
        for value in previous {
            out.push(DiffResult::with_message(
                DiffKind::Removed,
                context.clone(),
                format!("enum value '{value}'"),
            ));
        }
        for value in actual {
            out.push(DiffResult::with_message(
                DiffKind::Added,
                context.clone(),
                format!("enum value '{value}'"),
            ));
        }
        return Ok(());
    }

    match (previous.first(), actual.first()) {
        (Some(sample), Some(_)) => match constant_kind(sample, &context)? {
            ConstantKind::String => compare_key_set(
                typed_keys(previous, EnumValue::as_str, &context)?,
                typed_keys(actual, EnumValue::as_str, &context)?,
                |_| context.clone(),
                out,
            ),
            ConstantKind::Integer => compare_key_set(
                typed_keys(previous, EnumValue::as_i32, &context)?,
                typed_keys(actual, EnumValue::as_i32, &context)?,
                |_| context.clone(),
                out,
            ),
            ConstantKind::Long => compare_key_set(
                typed_keys(previous, EnumValue::as_i64, &context)?,
                typed_keys(actual, EnumValue::as_i64, &context)?,
                |_| context.clone(),
                out,
            ),
            ConstantKind::Double => compare_key_set(
                typed_keys(previous, |v| v.as_f64().map(DoubleKey), &context)?,
                typed_keys(actual, |v| v.as_f64().map(DoubleKey), &context)?,
                |_| context.clone(),
                out,
            ),
        },
        _ => Ok(()),
    }
}

fn typed_keys<'s, T>(
    values: &'s [EnumValue],
    read: impl Fn(&'s EnumValue) -> Option<T>,
    context: &DiffContext,
) -> Result<Vec<T>, DiffError> {
    values
        .iter()
        .map(|value| {
            read(value).ok_or_else(|| DiffError::UnsupportedEnumValue {
                context: context.clone(),
            })
        })
        .collect()
}

/// `f64` under its total order so doubles can act as merge keys.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DoubleKey(f64);

impl Eq for DoubleKey {}

impl PartialOrd for DoubleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DoubleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DoubleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
