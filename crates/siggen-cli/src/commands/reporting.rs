use colored::Colorize;
use siggen_backend::SynthError;
use siggen_spec::{BackendError, ValidationError, ValidationWarning};

/// Print validation errors, one per line.
pub(crate) fn print_errors(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{}", "Errors:".red().bold());
    for error in errors {
        print_issue("x".red(), error.code.code(), &error.message, error.path.as_deref());
    }
}

/// Print validation warnings, one per line.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        print_issue(
            "!".yellow(),
            warning.code.code(),
            &warning.message,
            warning.path.as_deref(),
        );
    }
}

fn print_issue(marker: colored::ColoredString, code: &str, message: &str, path: Option<&str>) {
    let path_info = path.map(|p| format!(" at {}", p)).unwrap_or_default();
    println!("  {} [{}]{}: {}", marker, code, path_info.dimmed(), message);
}

/// Print a synthesis failure to stderr.
///
/// Validation failures are expanded into their individual errors.
pub(crate) fn print_synth_error(err: &SynthError) {
    eprintln!(
        "{} [{}] {}",
        "FAILED".red().bold(),
        err.code(),
        err.message()
    );
    if let SynthError::ValidationFailed(errors) = err {
        for error in errors {
            eprintln!("  {} {}", "x".red(), error);
        }
    }
}
