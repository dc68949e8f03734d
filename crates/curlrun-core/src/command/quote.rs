//! Shell quoting for the reproducible command lines.

/// Characters that never need quoting in bash, besides ASCII alphanumerics.
const BASH_SAFE: &str = "_-./=,+@%";

/// PowerShell treats `,` and `@` as operators.
const POWERSHELL_SAFE: &str = "_-./=+%";

fn is_plain(arg: &str, safe: &str) -> bool {
    !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || safe.contains(c))
}

/// Quote `arg` for bash: single quotes, embedded `'` written as `'\''`.
pub fn quote_bash(arg: &str) -> String {
    if is_plain(arg, BASH_SAFE) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Quote `arg` for PowerShell: single quotes, embedded `'` doubled.
pub fn quote_powershell(arg: &str) -> String {
    if is_plain(arg, POWERSHELL_SAFE) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "''"))
}
