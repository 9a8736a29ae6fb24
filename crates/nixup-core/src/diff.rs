use std::collections::HashSet;

/// Lines of `after` that are non-empty and absent from `before`, in `after` order.
///
/// Only additions are reported. Repeated lines in `after` are kept as repeated.
pub fn added_packages<'a>(before: &str, after: &'a str) -> Vec<&'a str> {
    let before_set: HashSet<&str> = before.split('\n').collect();

    after
        .split('\n')
        .filter(|line| !line.is_empty() && !before_set.contains(line))
        .collect()
}

pub fn render_package_diff(before: &str, after: &str) -> String {
    let mut rendered = String::new();
    for package in added_packages(before, after) {
        rendered.push_str("+ ");
        rendered.push_str(package);
        rendered.push('\n');
    }
    rendered
}
