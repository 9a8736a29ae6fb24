use crate::diff::render_package_diff;
use crate::snapshot::SystemSnapshot;

pub fn failure_record_body(upgrade_output: &str) -> String {
    format!("UPDATE FAILED:\n{upgrade_output}")
}

pub fn success_record_body(
    before: &SystemSnapshot,
    after: &SystemSnapshot,
    upgrade_output: &str,
) -> String {
    let mut body = String::new();
    body.push_str("=== SYSTEM UPDATED ===\n");
    body.push_str(&format!("Before Generation:\n{}\n", before.generation.value));
    body.push_str(&format!("After Generation:\n{}\n", after.generation.value));

    body.push_str("\n=== PACKAGE DIFF ===\n");
    body.push_str(&render_package_diff(
        &before.packages.value,
        &after.packages.value,
    ));

    body.push_str("\n=== RAW REBUILD LOG ===\n");
    body.push_str(upgrade_output);
    body
}
