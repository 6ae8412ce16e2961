/// Placeholder replaced by the organism name
pub const NAME_TOKEN: &str = "%";

/// Placeholder replaced by the organism's increment
pub const INCREMENT_TOKEN: &str = "?";

/// Suffix appended to the organism name to form its script file name
pub const SCRIPT_SUFFIX: &str = ".sql";

/// Substitute both placeholders in `template`.
///
/// Plain find-and-replace-all: every `%` becomes `organism`, then every `?`
/// becomes the decimal `increment`. Placeholder counts are not checked and
/// there is no escaping, so a literal `%` or `?` elsewhere in the template is
/// substituted too.
pub fn expand(template: &str, organism: &str, increment: u64) -> String {
    template
        .replace(NAME_TOKEN, organism)
        .replace(INCREMENT_TOKEN, &increment.to_string())
}

/// File name of the generated script for `organism`
pub fn script_file_name(organism: &str) -> String {
    format!("{}{}", organism, SCRIPT_SUFFIX)
}
