use super::context::DiffContext;
use super::merge::compare_keyed;
use super::result::{DiffError, DiffKind, DiffResult};
use super::scalar::{compare_bool, compare_optional};
use super::schema::SchemaComparator;
use crate::spec::{
    Document, Encoding, Header, MediaType, Operation, Parameter, PathItem, RequestBody, Response,
};
use std::collections::BTreeMap;
use std::fmt;

/// Compare two specification documents and report every structural
/// difference as an ordered sequence of [`DiffResult`]s.
///
/// The walk descends route → operation → parameter/request body/response →
/// media type → schema, narrowing the location context at every step. Output
/// order is comparison order and does not depend on either document's input
/// ordering. An empty result means the documents are structurally identical.
///
/// # Errors
///
/// Fails without a partial result when both path items of a route declare
/// shared parameters, when an enum constant list holds an unsupported value
/// kind, or when a schema `$ref` does not resolve (see [`DiffError`]).
pub fn compare_documents(
    previous: &Document,
    actual: &Document,
) -> Result<Vec<DiffResult>, DiffError> {
    let mut comparator = DocumentComparator {
        schemas: SchemaComparator::new(previous, actual),
    };
    let mut out = Vec::new();
    comparator.compare_paths(&previous.paths, &actual.paths, &mut out)?;
    Ok(out)
}

struct DocumentComparator<'a> {
    schemas: SchemaComparator<'a>,
}

fn entries<'a, V>(map: &'a BTreeMap<String, V>) -> Vec<(&'a str, &'a V)> {
    map.iter().map(|(key, value)| (key.as_str(), value)).collect()
}

fn display_or_none<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

impl<'a> DocumentComparator<'a> {
    fn compare_paths(
        &mut self,
        previous: &'a BTreeMap<String, PathItem>,
        actual: &'a BTreeMap<String, PathItem>,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(previous),
            entries(actual),
            |route| DiffContext::from_route(*route),
            |prev, act, ctx, out| self.compare_path_item(prev, act, ctx, out),
            out,
        )
    }

    fn compare_path_item(
        &mut self,
        previous: &'a PathItem,
        actual: &'a PathItem,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        // Shared parameters would have to be merged into every operation's
        // own parameter set before comparing; refuse rather than produce an
        // incomplete comparison.
        if !previous.parameters.is_empty() && !actual.parameters.is_empty() {
            return Err(DiffError::SharedPathParameters {
                route: context.route.clone(),
            });
        }

        let prev_ops: Vec<_> = previous.methods().collect();
        let act_ops: Vec<_> = actual.methods().collect();
        compare_keyed(
            prev_ops,
            act_ops,
            |method| context.clone().with_method(*method),
            |prev, act, ctx, out| self.compare_operation(prev, act, ctx, out),
            out,
        )
    }

    fn compare_operation(
        &mut self,
        previous: &'a Operation,
        actual: &'a Operation,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        let prev_params: Vec<(&str, &Parameter)> = previous
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p))
            .collect();
        let act_params: Vec<(&str, &Parameter)> = actual
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p))
            .collect();
        compare_keyed(
            prev_params,
            act_params,
            |name| context.append_request(name),
            |prev, act, ctx, out| self.compare_parameter(prev, act, ctx, out),
            out,
        )?;

        compare_optional(
            previous.request_body.as_ref(),
            actual.request_body.as_ref(),
            context.clone().with_request("<Body>"),
            |prev, act, ctx, out| self.compare_request_body(prev, act, ctx, out),
            out,
        )?;

        compare_bool(
            previous.deprecated,
            actual.deprecated,
            &context,
            "operation is no more deprecated",
            "operation is now deprecated",
            out,
        );

        compare_keyed(
            entries(&previous.responses),
            entries(&actual.responses),
            |status| context.append_response(status),
            |prev, act, ctx, out| self.compare_response(prev, act, ctx, out),
            out,
        )
    }

    fn compare_request_body(
        &mut self,
        previous: &'a RequestBody,
        actual: &'a RequestBody,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.content),
            entries(&actual.content),
            |media| context.append_request(&format!("<{media}>")),
            |prev, act, ctx, out| self.compare_media_type(prev, act, ctx, out),
            out,
        )?;

        compare_bool(
            previous.required,
            actual.required,
            &context,
            "request body is no more required",
            "request body is now required",
            out,
        );
        Ok(())
    }

    fn compare_parameter(
        &mut self,
        previous: &'a Parameter,
        actual: &'a Parameter,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.content),
            entries(&actual.content),
            |media| context.append_request(&format!("<{media}>")),
            |prev, act, ctx, out| self.compare_media_type(prev, act, ctx, out),
            out,
        )?;

        compare_bool(
            previous.deprecated,
            actual.deprecated,
            &context,
            "parameter is no more deprecated",
            "parameter is now deprecated",
            out,
        );
        compare_bool(
            previous.required,
            actual.required,
            &context,
            "parameter is no more required",
            "parameter is now required",
            out,
        );
        compare_bool(
            previous.allow_reserved,
            actual.allow_reserved,
            &context,
            "parameter does not allow reserved characters any more",
            "parameter now allows reserved characters",
            out,
        );
        compare_bool(
            previous.explode,
            actual.explode,
            &context,
            "parameter cannot be exploded any more",
            "parameter now allows to be exploded",
            out,
        );

        if previous.style != actual.style {
            out.push(DiffResult::with_message(
                DiffKind::Modified,
                context.clone(),
                format!(
                    "parameter style has changed from {} to {}",
                    display_or_none(previous.style.as_ref()),
                    display_or_none(actual.style.as_ref())
                ),
            ));
        }
        if previous.location != actual.location {
            out.push(DiffResult::with_message(
                DiffKind::Modified,
                context,
                format!(
                    "parameter position has changed from {} to {}",
                    display_or_none(previous.location.as_ref()),
                    display_or_none(actual.location.as_ref())
                ),
            ));
        }
        Ok(())
    }

    fn compare_response(
        &mut self,
        previous: &'a Response,
        actual: &'a Response,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.content),
            entries(&actual.content),
            |media| context.append_response(&format!("<{media}>")),
            |prev, act, ctx, out| self.compare_media_type(prev, act, ctx, out),
            out,
        )?;

        compare_keyed(
            entries(&previous.headers),
            entries(&actual.headers),
            |name| context.append_response(name),
            |prev, act, ctx, out| self.compare_header(prev, act, ctx, out),
            out,
        )
    }

    fn compare_media_type(
        &mut self,
        previous: &'a MediaType,
        actual: &'a MediaType,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.encoding),
            entries(&actual.encoding),
            |name| context.append_request(&format!("<{name}>")),
            |prev, act, ctx, out| self.compare_encoding(prev, act, ctx, out),
            out,
        )?;

        self.schemas
            .compare(previous.schema.as_ref(), actual.schema.as_ref(), context, out)
    }

    fn compare_encoding(
        &mut self,
        previous: &'a Encoding,
        actual: &'a Encoding,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.headers),
            entries(&actual.headers),
            |name| context.append_request(name),
            |prev, act, ctx, out| self.compare_header(prev, act, ctx, out),
            out,
        )?;

        if previous.style != actual.style {
            out.push(DiffResult::with_message(
                DiffKind::Modified,
                context.clone(),
                format!(
                    "style has changed from {} to {}",
                    display_or_none(previous.style.as_ref()),
                    display_or_none(actual.style.as_ref())
                ),
            ));
        }
        compare_bool(
            previous.explode,
            actual.explode,
            &context,
            "cannot be exploded any more",
            "now allows to be exploded",
            out,
        );
        compare_bool(
            previous.allow_reserved,
            actual.allow_reserved,
            &context,
            "does not allow reserved characters any more",
            "now allows reserved characters",
            out,
        );
        Ok(())
    }

    fn compare_header(
        &mut self,
        previous: &'a Header,
        actual: &'a Header,
        context: DiffContext,
        out: &mut Vec<DiffResult>,
    ) -> Result<(), DiffError> {
        compare_keyed(
            entries(&previous.content),
            entries(&actual.content),
            |media| context.append_request(&format!("<{media}>")),
            |prev, act, ctx, out| self.compare_media_type(prev, act, ctx, out),
            out,
        )?;

        compare_bool(
            previous.deprecated,
            actual.deprecated,
            &context,
            "header is no more deprecated",
            "header is now deprecated",
            out,
        );
        compare_bool(
            previous.required,
            actual.required,
            &context,
            "header is no more required",
            "header is now required",
            out,
        );
        compare_bool(
            previous.allow_reserved,
            actual.allow_reserved,
            &context,
            "header does not allow reserved characters any more",
            "header now allows reserved characters",
            out,
        );
        compare_bool(
            previous.explode,
            actual.explode,
            &context,
            "header cannot be exploded any more",
            "header now allows to be exploded",
            out,
        );

        if previous.style != actual.style {
            out.push(DiffResult::with_message(
                DiffKind::Modified,
                context.clone(),
                format!(
                    "header style has changed from {} to {}",
                    display_or_none(previous.style.as_ref()),
                    display_or_none(actual.style.as_ref())
                ),
            ));
        }

        self.schemas
            .compare(previous.schema.as_ref(), actual.schema.as_ref(), context, out)
    }
}
