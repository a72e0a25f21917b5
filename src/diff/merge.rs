use super::context::DiffContext;
use super::result::{DiffError, DiffKind, DiffResult};
use std::cmp::Ordering;
use std::fmt;

/// Walk two key→value collections in sorted-key lock-step and classify every
/// key as added, removed, or matched.
///
/// Keys present only on the previous side emit one `Removed` record, keys
/// present only on the actual side one `Added` record, and matched keys
/// delegate to `compare_value` with the previous-side context for that key.
/// Output order follows the key order, independent of the input collections'
/// iteration order. Keys must be unique within each side; an empty side is an
/// empty mapping, never an error.
pub(crate) fn compare_keyed<'v, K, V, C>(
    mut previous: Vec<(K, &'v V)>,
    mut actual: Vec<(K, &'v V)>,
    context_for: impl Fn(&K) -> DiffContext,
    mut compare_value: C,
    out: &mut Vec<DiffResult>,
) -> Result<(), DiffError>
where
    K: Ord + fmt::Display,
    C: FnMut(&'v V, &'v V, DiffContext, &mut Vec<DiffResult>) -> Result<(), DiffError>,
{
    previous.sort_by(|a, b| a.0.cmp(&b.0));
    actual.sort_by(|a, b| a.0.cmp(&b.0));

    let mut previous = previous.into_iter().peekable();
    let mut actual = actual.into_iter().peekable();

    loop {
        let decision = match (previous.peek(), actual.peek()) {
            (Some((prev_key, _)), Some((actual_key, _))) => prev_key.cmp(actual_key),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match decision {
            Ordering::Less => {
                if let Some((key, _)) = previous.next() {
                    out.push(DiffResult::with_message(
                        DiffKind::Removed,
                        context_for(&key),
                        format!("'{key}' has been removed"),
                    ));
                }
            }
            Ordering::Greater => {
                if let Some((key, _)) = actual.next() {
                    out.push(DiffResult::with_message(
                        DiffKind::Added,
                        context_for(&key),
                        format!("'{key}' has been added"),
                    ));
                }
            }
            Ordering::Equal => {
                if let (Some((key, prev_value)), Some((_, actual_value))) =
                    (previous.next(), actual.next())
                {
                    compare_value(prev_value, actual_value, context_for(&key), out)?;
                }
            }
        }
    }
    Ok(())
}

/// Set-difference form of [`compare_keyed`]: matched keys emit nothing, so
/// only membership changes are reported. Used for required-property names and
/// same-typed enum constants.
pub(crate) fn compare_key_set<K>(
    previous: Vec<K>,
    actual: Vec<K>,
    context_for: impl Fn(&K) -> DiffContext,
    out: &mut Vec<DiffResult>,
) -> Result<(), DiffError>
where
    K: Ord + fmt::Display,
{
    let previous: Vec<(K, &())> = previous.into_iter().map(|k| (k, &())).collect();
    let actual: Vec<(K, &())> = actual.into_iter().map(|k| (k, &())).collect();
    compare_keyed(previous, actual, context_for, |_, _, _, _| Ok(()), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DiffContext {
        DiffContext::from_route("/test")
    }

    fn run_set(previous: Vec<&str>, actual: Vec<&str>) -> Vec<DiffResult> {
        let mut out = Vec::new();
        compare_key_set(previous, actual, |_| ctx(), &mut out).expect("set compare");
        out
    }

    #[test]
    fn both_sides_empty_yield_nothing() {
        assert!(run_set(vec![], vec![]).is_empty());
    }

    #[test]
    fn disjoint_keys_classify_as_added_and_removed() {
        let diffs = run_set(vec!["only-previous"], vec!["only-actual"]);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DiffKind::Added);
        assert_eq!(diffs[0].message.as_deref(), Some("'only-actual' has been added"));
        assert_eq!(diffs[1].kind, DiffKind::Removed);
        assert_eq!(
            diffs[1].message.as_deref(),
            Some("'only-previous' has been removed")
        );
    }

    #[test]
    fn drains_the_longer_side_completely() {
        // One matched key, then the actual side still holds two more entries.
        let diffs = run_set(vec!["a"], vec!["a", "b", "c"]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| d.kind == DiffKind::Added));

        let diffs = run_set(vec!["a", "b", "c"], vec!["c"]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| d.kind == DiffKind::Removed));
    }

    #[test]
    fn output_order_is_key_order_not_input_order() {
        let diffs = run_set(vec!["z", "a"], vec![]);
        let names: Vec<&str> = diffs.iter().filter_map(|d| d.message.as_deref()).collect();
        assert_eq!(
            names,
            vec!["'a' has been removed", "'z' has been removed"]
        );
    }

    #[test]
    fn matched_keys_delegate_with_the_key_context() {
        let previous = vec![("k", &1), ("p", &2)];
        let actual = vec![("k", &3)];
        let mut out = Vec::new();
        let mut seen = Vec::new();
        compare_keyed(
            previous,
            actual,
            |k| ctx().append_request(k),
            |prev, act, context, _| {
                seen.push((*prev, *act, context));
                Ok(())
            },
            &mut out,
        )
        .expect("merge");
        assert_eq!(seen, vec![(1, 3, ctx().append_request("k"))]);
        assert_eq!(out.len(), 1); // removal of 'p'
    }

    #[test]
    fn value_comparator_errors_abort_the_merge() {
        let previous = vec![("k", &1)];
        let actual = vec![("k", &2)];
        let mut out = Vec::new();
        let result = compare_keyed(
            previous,
            actual,
            |_| ctx(),
            |_, _, _, _| {
                Err(DiffError::UnresolvedReference {
                    ref_path: "#/components/schemas/Gone".to_string(),
                })
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
