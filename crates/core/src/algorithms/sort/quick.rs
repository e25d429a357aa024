use algoviz_protocol::Role;

use crate::recorder::Recorder;

/// Lomuto quicksort over the whole slice.
pub fn quick(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder) {
    let n = values.len();
    sort_range(values, roles, rec, 0, n);
}

/// Sort `lo..hi`. A singleton range is already in place.
fn sort_range(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder, lo: usize, hi: usize) {
    match hi.saturating_sub(lo) {
        0 => {}
        1 => {
            roles[lo] = Role::Sorted;
            rec.record_with(values, roles, format!("{} is in place", values[lo]));
        }
        _ => {
            let pivot = partition(values, roles, rec, lo, hi);
            roles[pivot] = Role::Sorted;
            rec.record_with(values, roles, format!("Pivot {} is in place", values[pivot]));
            sort_range(values, roles, rec, lo, pivot);
            sort_range(values, roles, rec, pivot + 1, hi);
        }
    }
}

/// Partition `lo..hi` around its last element; returns the pivot's final index.
fn partition(
    values: &mut [i64],
    roles: &mut [Role],
    rec: &mut Recorder,
    lo: usize,
    hi: usize,
) -> usize {
    let last = hi - 1;
    let pivot = values[last];
    roles[last] = Role::Swapping;

    let mut store = lo;
    for j in lo..last {
        roles[j] = Role::Comparing;
        rec.record_with(values, roles, format!("Compare {} with pivot {pivot}", values[j]));

        if values[j] < pivot {
            values.swap(store, j);
            rec.record_with(
                values,
                roles,
                format!("{} < {pivot}, move left", values[store]),
            );
            store += 1;
        }
        roles[j] = Role::Default;
    }

    values.swap(store, last);
    roles[last] = Role::Default;
    rec.record_with(values, roles, format!("Place pivot {pivot} at {store}"));
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[i64]) -> (Vec<i64>, crate::model::FrameStore) {
        let mut values = input.to_vec();
        let mut roles = vec![Role::Default; input.len()];
        let mut rec = Recorder::new();
        quick(&mut values, &mut roles, &mut rec);
        assert!(roles.iter().all(|r| *r == Role::Sorted));
        (values, rec.finish())
    }

    #[test]
    fn sorts_with_duplicates() {
        let (values, _) = run(&[3, 7, 3, 1, 9, 1]);
        assert_eq!(values, vec![1, 1, 3, 3, 7, 9]);
    }

    #[test]
    fn pivot_is_last_of_range() {
        let (_, store) = run(&[2, 9, 5]);
        let first = store.first().cloned().expect("frame");
        assert_eq!(first.role(2), Role::Swapping);
        assert_eq!(first.role(0), Role::Comparing);
        assert!(first.caption.ends_with("pivot 5"));
    }

    #[test]
    fn pivot_goes_default_then_sorted() {
        let (_, store) = run(&[2, 9, 5]);
        let place = store
            .iter()
            .position(|s| s.caption.starts_with("Place pivot"))
            .unwrap_or(0);
        let placed = store.at(place).cloned().expect("frame");
        assert_eq!(placed.values, vec![2, 5, 9]);
        assert_eq!(placed.role(1), Role::Default);
        let resolved = store.at(place + 1).cloned().expect("frame");
        assert_eq!(resolved.role(1), Role::Sorted);
    }
}
