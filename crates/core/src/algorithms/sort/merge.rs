use algoviz_protocol::Role;

use crate::recorder::Recorder;

/// Top-down merge sort. Ranges being merged carry `Swapping`; the slot
/// receiving an element is flashed `Comparing` for one frame.
pub fn merge(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder) {
    let n = values.len();
    sort_range(values, roles, rec, 0, n);
}

fn sort_range(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder, lo: usize, hi: usize) {
    if hi.saturating_sub(lo) < 2 {
        return;
    }
    // Left half takes the extra element, like `(l + r) / 2` on inclusive bounds.
    let mid = (lo + hi - 1) / 2 + 1;
    sort_range(values, roles, rec, lo, mid);
    sort_range(values, roles, rec, mid, hi);
    merge_halves(values, roles, rec, lo, mid, hi);
}

fn merge_halves(
    values: &mut [i64],
    roles: &mut [Role],
    rec: &mut Recorder,
    lo: usize,
    mid: usize,
    hi: usize,
) {
    let left = values[lo..mid].to_vec();
    let right = values[mid..hi].to_vec();

    for role in &mut roles[lo..hi] {
        *role = Role::Swapping;
    }
    rec.record_with(values, roles, format!("Merge {lo}..{} with {mid}..{}", mid - 1, hi - 1));

    let (mut i, mut j) = (0, 0);
    for k in lo..hi {
        // Ties take from the left half, which keeps the sort stable.
        let take_left = j >= right.len() || (i < left.len() && left[i] <= right[j]);
        values[k] = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        roles[k] = Role::Comparing;
        rec.record_with(values, roles, format!("Place {} at {k}", values[k]));
        roles[k] = Role::Swapping;
    }

    for role in &mut roles[lo..hi] {
        *role = Role::Default;
    }
    rec.record_with(values, roles, format!("Merged {lo}..{}", hi - 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[i64]) -> (Vec<i64>, Vec<Role>, crate::model::FrameStore) {
        let mut values = input.to_vec();
        let mut roles = vec![Role::Default; input.len()];
        let mut rec = Recorder::new();
        merge(&mut values, &mut roles, &mut rec);
        (values, roles, rec.finish())
    }

    #[test]
    fn sorts_and_leaves_roles_default() {
        let (values, roles, _) = run(&[8, 3, 5, 1, 9]);
        assert_eq!(values, vec![1, 3, 5, 8, 9]);
        // Only the caller's final frame marks everything sorted.
        assert!(roles.iter().all(|r| *r == Role::Default));
    }

    #[test]
    fn one_frame_per_placement() {
        let (_, _, store) = run(&[2, 1]);
        // range highlight, two placements, revert
        assert_eq!(store.len(), 4);
        let highlight = store.first().cloned().expect("frame");
        assert_eq!(highlight.roles, vec![Role::Swapping, Role::Swapping]);
        let first_place = store.at(1).cloned().expect("frame");
        assert_eq!(first_place.roles, vec![Role::Comparing, Role::Swapping]);
        assert_eq!(first_place.values[0], 1);
        let second_place = store.at(2).cloned().expect("frame");
        assert_eq!(second_place.roles, vec![Role::Swapping, Role::Comparing]);
        assert_eq!(store.last().map(|s| s.roles.clone()), Some(vec![Role::Default; 2]));
    }

    #[test]
    fn split_matches_inclusive_midpoint() {
        let (_, _, store) = run(&[3, 2, 1]);
        let first = store.first().cloned().expect("frame");
        // [3, 2] is merged before the singleton on the right joins.
        assert_eq!(first.caption, "Merge 0..0 with 1..1");
        let last_merge = store
            .iter()
            .rev()
            .find(|s| s.caption.starts_with("Merge "))
            .map(|s| s.caption.clone());
        assert_eq!(last_merge.as_deref(), Some("Merge 0..1 with 2..2"));
    }
}
