/*
[INPUT]:  Raw user-entered strings
[OUTPUT]: Email shape verdicts and sanitized input
[POS]:    Validation layer - pure input checks
[UPDATE]: When accepted email shapes change
*/

/// Conservative `local@domain.tld` check.
///
/// Accepts exactly one `@`, a non-empty local part, and a domain holding a
/// `.` with text on both sides. Any whitespace rejects the input.
pub fn validate_email(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

/// Trim and lowercase user input before it reaches the controller
pub fn sanitize_input(input: &str) -> String {
    input.trim().to_lowercase()
}
