pub mod common;
pub mod generate;
pub mod inspect;

/// Run a command body, printing its error to stderr and mapping it to an
/// exit code.
pub fn run_cli<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
