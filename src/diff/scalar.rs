use super::context::DiffContext;
use super::result::{DiffError, DiffKind, DiffResult};
use std::fmt;

/// Diff a boolean flag whose two flip directions carry distinct meaning
/// (deprecation, requiredness, reserved characters, explode behaviour).
///
/// Emits nothing when equal, `Modified(off_message)` on `true -> false` and
/// `Modified(on_message)` on `false -> true`.
pub(crate) fn compare_bool(
    previous: bool,
    actual: bool,
    context: &DiffContext,
    off_message: &str,
    on_message: &str,
    out: &mut Vec<DiffResult>,
) {
    if previous == actual {
        return;
    }
    let message = if previous { off_message } else { on_message };
    out.push(DiffResult::with_message(
        DiffKind::Modified,
        context.clone(),
        message,
    ));
}

/// Diff two optional scalars of the same comparable type.
///
/// Presence flips report `Added`/`Removed`; unequal present values report
/// `Modified` with `"{label} from {previous} to {actual}"`.
pub(crate) fn compare_scalar<T>(
    previous: Option<&T>,
    actual: Option<&T>,
    context: &DiffContext,
    label: &str,
    out: &mut Vec<DiffResult>,
) where
    T: PartialEq + fmt::Display + ?Sized,
{
    match (previous, actual) {
        (None, None) => {}
        (None, Some(value)) => out.push(DiffResult::with_message(
            DiffKind::Added,
            context.clone(),
            format!("'{value}' has been added"),
        )),
        (Some(value), None) => out.push(DiffResult::with_message(
            DiffKind::Removed,
            context.clone(),
            format!("'{value}' has been removed"),
        )),
        (Some(prev), Some(act)) if prev != act => out.push(DiffResult::with_message(
            DiffKind::Modified,
            context.clone(),
            format!("{label} from {prev} to {act}"),
        )),
        _ => {}
    }
}

/// Diff two optional substructures: `Added`/`Removed` on presence mismatch,
/// otherwise delegate to the existing-pair comparator.
///
/// `T` is instantiated with a reference so comparators tied to the document
/// lifetime (the schema engine in particular) can be passed directly.
pub(crate) fn compare_optional<T, C>(
    previous: Option<T>,
    actual: Option<T>,
    context: DiffContext,
    compare_existing: C,
    out: &mut Vec<DiffResult>,
) -> Result<(), DiffError>
where
    C: FnOnce(T, T, DiffContext, &mut Vec<DiffResult>) -> Result<(), DiffError>,
{
    match (previous, actual) {
        (None, None) => Ok(()),
        (None, Some(_)) => {
            out.push(DiffResult::new(DiffKind::Added, context));
            Ok(())
        }
        (Some(_), None) => {
            out.push(DiffResult::new(DiffKind::Removed, context));
            Ok(())
        }
        (Some(prev), Some(act)) => compare_existing(prev, act, context, out),
    }
}
