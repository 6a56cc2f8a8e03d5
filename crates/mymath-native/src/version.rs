pub const VERSION_MAJOR: i32 = 1;
pub const VERSION_MINOR: i32 = 5;
pub const VERSION_PATCH: i32 = 0;

/// Prints `mymath version <major>.<minor>.<patch>` to stdout.
pub fn print_version() {
    println!("mymath version {}", version());
}

pub fn version_major() -> i32 {
    VERSION_MAJOR
}

/// Returns the provider version as a freshly allocated string.
///
/// Every call produces an independent value, so callers may keep results
/// from earlier calls around.
pub fn version() -> String {
    format!("{}.{}.{}", VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}
