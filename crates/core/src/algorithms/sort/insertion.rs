use algoviz_protocol::Role;

use crate::recorder::Recorder;

/// Grow a sorted prefix one key at a time, shifting larger elements right.
pub fn insertion(values: &mut [i64], roles: &mut [Role], rec: &mut Recorder) {
    let n = values.len();
    if n == 0 {
        return;
    }
    roles[0] = Role::Sorted;

    for i in 1..n {
        let key = values[i];
        roles[i] = Role::Swapping;
        rec.record_with(values, roles, format!("Insert {key}"));

        let mut slot = i;
        while slot > 0 && key < values[slot - 1] {
            roles[slot - 1] = Role::Comparing;
            rec.record_with(
                values,
                roles,
                format!("{} > {key}, shift right", values[slot - 1]),
            );
            values[slot] = values[slot - 1];
            // The shifted slot stays inside the growing sorted prefix.
            roles[slot - 1] = Role::Sorted;
            slot -= 1;
        }
        values[slot] = key;

        for role in roles.iter_mut().take(i + 1) {
            *role = Role::Sorted;
        }
        rec.record_with(values, roles, format!("{key} inserted at {slot}"));
    }
}
