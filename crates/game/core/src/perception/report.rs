use std::fmt::Display;

use crate::state::{D4, Orientation};

/// Renders directional lists as lines relative to the observer's facing.
///
/// Lines run ahead, right, behind, left; empty directions are skipped.
pub fn build_object_report_text<T: Display>(facing: Orientation, objects: &D4<T>) -> String {
    let mut lines: [Option<String>; 4] = Default::default();

    for (absolute, list) in objects.iter() {
        if list.is_empty() {
            continue;
        }
        let relative = absolute.relative_to(facing);
        let names: Vec<String> = list.iter().map(ToString::to_string).collect();
        lines[relative.index()] = Some(format!(
            "{}: {}.",
            relative_label(relative),
            names.join(", ")
        ));
    }

    let lines: Vec<String> = lines.into_iter().flatten().collect();
    if lines.is_empty() {
        return "You see nothing of interest.".to_owned();
    }
    lines.join("\n")
}

fn relative_label(relative: Orientation) -> &'static str {
    match relative {
        Orientation::Up => "Ahead",
        Orientation::Right => "To the right",
        Orientation::Down => "Behind",
        Orientation::Left => "To the left",
    }
}
