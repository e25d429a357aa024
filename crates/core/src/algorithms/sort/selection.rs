use algoviz_protocol::Role;

use crate::recorder::Recorder;

/// Select the minimum of the unsorted suffix and move it to the front.
///
/// The outer slot and the running minimum carry `Swapping`; each scanned
/// slot carries `Comparing` while it is looked at.
pub fn selection(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder) {
    let n = values.len();
    for i in 0..n {
        let mut min_idx = i;
        roles[i] = Role::Swapping;
        rec.record_with(values, roles, format!("Position {i}: candidate {}", values[i]));

        for j in i + 1..n {
            roles[j] = Role::Comparing;
            rec.record_with(
                values,
                roles,
                format!("Compare {} with minimum {}", values[j], values[min_idx]),
            );

            if values[j] < values[min_idx] {
                roles[min_idx] = Role::Default;
                min_idx = j;
                roles[min_idx] = Role::Swapping;
                rec.record_with(values, roles, format!("New minimum {}", values[min_idx]));
            } else {
                roles[j] = Role::Default;
            }
        }

        let caption = if min_idx == i {
            format!("{} already in place", values[i])
        } else {
            values.swap(i, min_idx);
            format!("Swap {} into position {i}", values[i])
        };
        roles[min_idx] = Role::Default;
        roles[i] = Role::Sorted;
        rec.record_with(values, roles, caption);
    }
}
