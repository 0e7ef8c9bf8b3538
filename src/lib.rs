pub mod control_lib;
pub mod data_structure;
pub mod logger_lib;

/// Current local wall-clock time in ctime style, e.g. `Tue Aug  4 17:03:52 2026`.
/// No trailing newline and no commas, so it fits in a single CSV field.
pub fn current_timestamp() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}
