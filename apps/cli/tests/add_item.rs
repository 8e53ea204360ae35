//! Authoring new items through a stand-in editor.

mod common;

use std::fs;
use std::io::Cursor;
use std::path::Path;

use pretty_assertions::assert_eq;

use askme_cli::commands::add::{self, AddOutcome, Editor, TEMPLATE};
use askme_cli::commands::Console;
use askme_cli::{AppError, Result};
use askme_core::CoreError;

use common::fixtures::record;
use common::TestContext;

/// Replaces the file content, like a user typing and saving.
struct WritingEditor(&'static str);

impl Editor for WritingEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        fs::write(path, self.0)?;
        Ok(())
    }
}

/// Quits without saving.
struct UntouchedEditor;

impl Editor for UntouchedEditor {
    fn edit(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

struct CrashingEditor;

impl Editor for CrashingEditor {
    fn edit(&self, _path: &Path) -> Result<()> {
        Err(AppError::Editor {
            command: "crash".to_string(),
            reason: "exit status: 1".to_string(),
        })
    }
}

fn run_add(ctx: &TestContext, name: Option<&str>, editor: &dyn Editor) -> (Result<AddOutcome>, String) {
    let mut input = Cursor::new(String::new());
    let mut output = Vec::new();
    let outcome = {
        let mut console = Console {
            input: &mut input,
            output: &mut output,
            use_color: false,
        };
        add::run(&ctx.config, name, editor, &mut console)
    };
    (outcome, String::from_utf8(output).unwrap())
}

#[test]
fn added_item_is_indexed_with_initial_state() {
    let ctx = TestContext::new();
    ctx.seed(vec![record("existing.md", 3, 1.3, 15.0, None)]);

    let editor = WritingEditor("Tags: rust\n\n# What is a lifetime?\n\nA region of code.\n");
    let (outcome, output) = run_add(&ctx, Some("lifetimes"), &editor);

    assert_eq!(outcome.unwrap(), AddOutcome::Added("lifetimes.md".to_string()));
    assert!(output.contains("Added lifetimes.md."));

    let index = ctx.load_index();
    let ids: Vec<&str> = index.records().iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["existing.md", "lifetimes.md"]);

    let fresh = index.get("lifetimes.md").unwrap();
    assert_eq!(fresh.repetitions, 0);
    assert_eq!(fresh.easiness, 2.5);
    assert_eq!(fresh.interval, 0.0);
    assert_eq!(fresh.due, None);
}

#[test]
fn unnamed_items_get_a_generated_identifier() {
    let ctx = TestContext::new();

    let (outcome, _) = run_add(&ctx, None, &WritingEditor("# Q\n\nA\n"));

    let identifier = match outcome.unwrap() {
        AddOutcome::Added(identifier) => identifier,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert!(identifier.ends_with(".md"));
    assert!(ctx.data_dir().join(&identifier).is_file());
    assert!(ctx.load_index().contains(&identifier));
}

#[test]
fn untouched_template_is_discarded() {
    let ctx = TestContext::new();

    let (outcome, output) = run_add(&ctx, Some("draft"), &UntouchedEditor);

    assert_eq!(outcome.unwrap(), AddOutcome::Discarded("draft.md".to_string()));
    assert!(output.contains("discarded"));
    assert!(!ctx.data_dir().join("draft.md").exists());
    assert!(!ctx.index_path().exists());
}

#[test]
fn editor_failure_removes_the_draft() {
    let ctx = TestContext::new();

    let (outcome, _) = run_add(&ctx, Some("draft"), &CrashingEditor);

    assert!(matches!(outcome, Err(AppError::Editor { .. })));
    assert!(!ctx.data_dir().join("draft.md").exists());
}

#[test]
fn duplicate_names_are_rejected() {
    let ctx = TestContext::new();
    ctx.seed(vec![record("taken.md", 0, 2.5, 0.0, None)]);
    let before = fs::read_to_string(ctx.data_dir().join("taken.md")).unwrap();

    let (outcome, _) = run_add(&ctx, Some("taken"), &WritingEditor("new text"));

    assert!(matches!(
        outcome,
        Err(AppError::Core(CoreError::DuplicateIdentifier(ref id))) if id == "taken.md"
    ));
    assert_eq!(fs::read_to_string(ctx.data_dir().join("taken.md")).unwrap(), before);
}

#[test]
fn template_declares_a_tags_line() {
    assert!(TEMPLATE.starts_with(askme_core::TAGS_MARKER));
}
