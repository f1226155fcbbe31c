pub mod account;
pub mod admin;
pub mod catalog;
pub mod migrate;
pub mod seed;
pub mod submit;

/// Write command output to stdout. Logs go to stderr.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}
