/// Replaced with the current document's resolved path.
pub const CURRENT_PLACEHOLDER: &str = "%fc";
/// Replaced with the target document's resolved path.
pub const TARGET_PLACEHOLDER: &str = "%ft";

const PLACEHOLDER_PREFIX: &str = "%f";

/// Substitute both placeholders in `template`.
///
/// The template is scanned once from left to right, so text coming from a
/// substituted path is never scanned again. Paths are inserted verbatim:
/// quoting is up to the template, and shell metacharacters in a path are
/// passed through to the shell as they are.
pub fn build(template: &str, current_path: &str, target_path: &str) -> String {
    let mut command =
        String::with_capacity(template.len() + current_path.len() + target_path.len());
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER_PREFIX) {
        command.push_str(&rest[..pos]);
        let token = &rest[pos..];

        if token.starts_with(TARGET_PLACEHOLDER) {
            command.push_str(target_path);
            rest = &token[TARGET_PLACEHOLDER.len()..];
        } else if token.starts_with(CURRENT_PLACEHOLDER) {
            command.push_str(current_path);
            rest = &token[CURRENT_PLACEHOLDER.len()..];
        } else {
            command.push_str(PLACEHOLDER_PREFIX);
            rest = &token[PLACEHOLDER_PREFIX.len()..];
        }
    }

    command.push_str(rest);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_quoted_template() {
        let command = build("diff -u \"%ft\" \"%fc\"", "/a/cur.txt", "/b/tgt.txt");
        assert_eq!(command, "diff -u \"/b/tgt.txt\" \"/a/cur.txt\"");
    }

    #[test]
    fn test_build_replaces_every_occurrence() {
        let command = build("%fc %ft %fc %ft", "cur", "tgt");
        assert_eq!(command, "cur tgt cur tgt");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let command = build("tool %fc %ft", "/tmp/%ft", "/tmp/%fc");
        assert_eq!(command, "tool /tmp/%ft /tmp/%fc");
    }

    #[test]
    fn test_unknown_tokens_are_kept() {
        assert_eq!(build("echo %fx %f", "a", "b"), "echo %fx %f");
        assert_eq!(build("echo %%fc", "a", "b"), "echo %a");
    }

    #[test]
    fn test_template_without_placeholders() {
        assert_eq!(build("true", "a", "b"), "true");
        assert_eq!(build("", "a", "b"), "");
    }

    #[test]
    fn test_paths_are_not_escaped() {
        let command = build("diff '%fc' '%ft'", "/x/it's.txt", "/y/$HOME");
        assert_eq!(command, "diff '/x/it's.txt' '/y/$HOME'");
    }
}
