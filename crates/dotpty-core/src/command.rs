//! Building the shell command line for the child process.

/// Quote and join command words so a shell's `-c` sees them as given.
///
/// # Example
/// ```
/// use dotpty_core::command::shell_command_line;
///
/// let words = vec!["./app".to_string(), "--name".to_string(), "two words".to_string()];
/// assert_eq!(shell_command_line(&words), "./app --name 'two words'");
/// ```
pub fn shell_command_line(words: &[String]) -> String {
    shell_words::join(words)
}

/// Arguments for running `command_line` through `shell -c`.
pub fn shell_args(command_line: &str) -> Vec<String> {
    vec!["-c".to_string(), command_line.to_string()]
}
