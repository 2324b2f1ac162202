use test_context::test_context;

use super::DiffContext;
use super::test_utils::{entries, write_file};
use crate::config::Settings;
use crate::error::DiffError;
use crate::integrations::{ActionRegistry, Document, DocumentId, EditorHost};

fn echo_paths() -> Settings {
    let mut settings = Settings::new();
    settings.use_custom("printf '%s|%s' \"%fc\" \"%ft\"", true);
    settings
}

fn open_three(ctx: &DiffContext) -> [(DocumentId, String); 3] {
    ["one.txt", "two.txt", "three.txt"].map(|name| {
        let path = write_file(ctx.files.path(), name, name);
        let id = ctx.editor.open(Document::from_file(&path).unwrap());
        (id, path.display().to_string())
    })
}

fn output_text(ctx: &DiffContext, id: Option<DocumentId>) -> String {
    let doc = ctx.editor.document(id.unwrap()).unwrap();
    String::from_utf8(doc.text().to_vec()).unwrap()
}

#[test_context(DiffContext)]
#[test]
fn test_diff_left_and_right(ctx: &mut DiffContext) {
    let [(_, one), (two_id, two), (_, three)] = open_three(ctx);
    let registry = ActionRegistry::with_defaults();
    let settings = echo_paths();

    ctx.editor.focus(two_id);
    let left = registry
        .invoke("diff-left", &ctx.editor, &ctx.pipeline, &settings, None)
        .unwrap();
    assert_eq!(output_text(ctx, left.output_document), format!("{}|{}", two, one));

    // The output buffer took focus; go back to the middle tab.
    ctx.editor.focus(two_id);
    let right = registry
        .invoke("diff-right", &ctx.editor, &ctx.pipeline, &settings, None)
        .unwrap();
    assert_eq!(output_text(ctx, right.output_document), format!("{}|{}", two, three));
}

#[test_context(DiffContext)]
#[test]
fn test_diff_left_of_first_tab(ctx: &mut DiffContext) {
    let [(one_id, _), _, _] = open_three(ctx);
    ctx.editor.focus(one_id);
    let before = ctx.editor.documents().len();

    let err = ActionRegistry::with_defaults()
        .invoke("diff-left", &ctx.editor, &ctx.pipeline, &echo_paths(), None)
        .unwrap_err();

    assert!(matches!(err, DiffError::NoTarget(_)));
    assert_eq!(ctx.editor.documents().len(), before);
    assert_eq!(
        ctx.editor.last_status().as_deref(),
        Some("difftool: No document to compare with: no document to the left")
    );
}

#[test_context(DiffContext)]
#[test]
fn test_diff_saved_with_edits(ctx: &mut DiffContext) {
    let [_, _, (three_id, three)] = open_three(ctx);
    ctx.editor.update(three_id, |d| d.edit(b"edited".to_vec()));

    let mut settings = Settings::new();
    settings.use_custom("cat \"%fc\"; printf '|%s' \"%ft\"", true);

    let outcome = ActionRegistry::with_defaults()
        .invoke("diff-saved", &ctx.editor, &ctx.pipeline, &settings, None)
        .unwrap();

    assert_eq!(output_text(ctx, outcome.output_document), format!("edited|{}", three));
    assert_eq!(entries(ctx.snapshots.path()), 0);
}

#[test_context(DiffContext)]
#[test]
fn test_diff_document_from_menu(ctx: &mut DiffContext) {
    let [(one_id, one), _, (three_id, three)] = open_three(ctx);
    ctx.editor.focus(three_id);

    let outcome = ActionRegistry::with_defaults()
        .invoke("diff-document", &ctx.editor, &ctx.pipeline, &echo_paths(), Some(one_id))
        .unwrap();

    assert_eq!(output_text(ctx, outcome.output_document), format!("{}|{}", three, one));
}
