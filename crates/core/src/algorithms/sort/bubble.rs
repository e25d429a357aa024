use algoviz_protocol::Role;

use crate::recorder::Recorder;

/// Compare each adjacent pair, swap if inverted, and after every pass mark
/// the trailing element that bubbled into place as sorted.
pub fn bubble(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder) {
    let n = values.len();
    for pass in 0..n {
        for j in 0..n - pass - 1 {
            roles[j] = Role::Comparing;
            roles[j + 1] = Role::Comparing;
            rec.record_with(
                values,
                roles,
                format!("Compare {} and {}", values[j], values[j + 1]),
            );

            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                roles[j] = Role::Swapping;
                roles[j + 1] = Role::Swapping;
                rec.record_with(
                    values,
                    roles,
                    format!("Swap {} and {}", values[j + 1], values[j]),
                );
            }

            roles[j] = Role::Default;
            roles[j + 1] = Role::Default;
        }

        let last = n - pass - 1;
        roles[last] = Role::Sorted;
        rec.record_with(values, roles, format!("{} is in place", values[last]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[i64]) -> crate::model::FrameStore {
        let mut values = input.to_vec();
        let mut roles = vec![Role::Default; input.len()];
        let mut rec = Recorder::new();
        bubble(&mut values, &mut roles, &mut rec);
        rec.finish()
    }

    fn pairs_with(store: &crate::model::FrameStore, role: Role) -> Vec<(usize, usize)> {
        store
            .iter()
            .map(|s| s.indices_with(role))
            .filter(|idx| idx.len() == 2)
            .map(|idx| (idx[0], idx[1]))
            .collect()
    }

    #[test]
    fn fully_inverted_three() {
        let store = run(&[5, 3, 1]);

        let comparing = pairs_with(&store, Role::Comparing);
        assert_eq!(&comparing[..2], &[(0, 1), (1, 2)]);
        assert_eq!(comparing, vec![(0, 1), (1, 2), (0, 1)]);

        let swapping = pairs_with(&store, Role::Swapping);
        assert_eq!(swapping, vec![(0, 1), (1, 2), (0, 1)]);

        // Swap frames directly follow their comparisons and show the
        // exchanged values.
        assert_eq!(store.at(1).map(|s| s.values.clone()).ok(), Some(vec![3, 5, 1]));
        assert_eq!(store.at(3).map(|s| s.values.clone()).ok(), Some(vec![3, 1, 5]));
    }

    #[test]
    fn pass_end_marks_trailing_element() {
        let store = run(&[5, 3, 1]);
        let first_sorted = store
            .iter()
            .find(|s| s.roles.contains(&Role::Sorted))
            .map(|s| s.indices_with(Role::Sorted));
        assert_eq!(first_sorted, Some(vec![2]));
        assert_eq!(store.last().map(|s| s.all_terminal()), Some(true));
    }

    #[test]
    fn sorted_input_never_swaps() {
        let store = run(&[1, 2, 3, 4]);
        assert!(pairs_with(&store, Role::Swapping).is_empty());
        // 3 + 2 + 1 comparisons, one pass-end frame per pass.
        assert_eq!(store.len(), 6 + 4);
    }
}
