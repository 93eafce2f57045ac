use core_state::{Clipboard, EditCommand, EditorState, HistoryEngine};
use core_text::{LineBuffer, Position};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn state(lines: &[&str]) -> EditorState {
    EditorState::new(LineBuffer::from_lines(lines.iter().copied()).unwrap())
}

fn snapshot(s: &EditorState) -> Vec<String> {
    s.buffer().lines().map(str::to_owned).collect()
}

#[test]
fn cut_paste_undo_scenario() {
    let mut s = state(&["hello world"]);
    s.cut_text(0, 5, 6).unwrap();
    assert_eq!(s.line(0), Some("hello"));
    assert_eq!(s.clipboard().contents(), " world");
    s.paste_text(0, 5).unwrap();
    assert_eq!(s.line(0), Some("hello world"));
    assert!(s.undo().unwrap());
    assert_eq!(s.line(0), Some("hello"));
}

#[test]
fn undo_cut_does_not_restore_clipboard() {
    let mut s = state(&["abcdef"]);
    s.copy_text(0, 0, 2).unwrap();
    s.cut_text(0, 2, 2).unwrap();
    assert_eq!(s.clipboard().contents(), "cd");
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("abcdef"));
    assert_eq!(s.clipboard().contents(), "cd");
}

#[test]
fn redo_after_undo_restores_post_execute_state() {
    let mut s = state(&["hello world", "second"]);
    s.delete_text(0, 0, 6).unwrap();
    let after = snapshot(&s);
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("hello world"));
    s.redo().unwrap();
    assert_eq!(snapshot(&s), after);
}

#[test]
fn new_edit_after_undo_invalidates_redo() {
    let mut s = state(&["abc"]);
    s.insert_text(0, 3, "1").unwrap();
    s.insert_text(0, 4, "2").unwrap();
    s.insert_text(0, 5, "3").unwrap();
    s.undo().unwrap();
    s.undo().unwrap();
    assert_eq!(s.history().redo_depth(), 2);
    s.insert_text(0, 0, "X").unwrap();
    let before = snapshot(&s);
    assert!(!s.redo().unwrap());
    assert_eq!(snapshot(&s), before);
    assert_eq!(s.line(0), Some("Xabc1"));
}

#[test]
fn undo_after_redo_after_cut() {
    let mut s = state(&["one two three"]);
    s.cut_text(0, 3, 4).unwrap();
    assert_eq!(s.line(0), Some("one three"));
    s.undo().unwrap();
    s.redo().unwrap();
    assert_eq!(s.line(0), Some("one three"));
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("one two three"));
}

#[test]
fn insert_replace_undo_after_later_edit_is_undone_first() {
    let mut s = state(&["abc"]);
    s.insert_replace_text(0, 0, "X").unwrap();
    assert_eq!(s.line(0), Some("Xabc"));
    s.delete_text(0, 1, 2).unwrap();
    assert_eq!(s.line(0), Some("Xc"));
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("Xabc"));
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("abc"));
}

#[test]
fn insert_replace_undo_discards_intervening_edits() {
    let mut history = HistoryEngine::new();
    let mut buffer = LineBuffer::from_lines(["abc"]).unwrap();
    let mut clipboard = Clipboard::new();
    let cmd = EditCommand::insert_replace(&buffer, Position::new(0, 0), "X").unwrap();
    history.perform(cmd, &mut buffer, &mut clipboard).unwrap();
    assert_eq!(buffer.line(0), Some("Xabc"));
    // Edit outside the history, still applied when the replace is undone.
    buffer.delete(0, 1, 2).unwrap();
    assert_eq!(buffer.line(0), Some("Xc"));
    assert!(history.undo(&mut buffer).unwrap());
    assert_eq!(buffer.line(0), Some("abc"));
}

#[test]
fn insert_replace_round_trips_through_undo_and_redo() {
    let mut s = state(&["abc"]);
    s.insert_replace_text(0, 1, "ZZ").unwrap();
    assert_eq!(s.line(0), Some("aZZbc"));
    s.undo().unwrap();
    assert_eq!(s.line(0), Some("abc"));
    s.redo().unwrap();
    assert_eq!(s.line(0), Some("aZZbc"));
}

#[test]
fn search_scenario() {
    let s = state(&["ababab"]);
    assert_eq!(
        s.search_text("ab"),
        vec![Position::new(0, 0), Position::new(0, 2), Position::new(0, 4)]
    );
}

#[test]
fn boundary_insert_errors_leave_buffer_unchanged() {
    let mut s = state(&["abc"]);
    assert!(s.insert_text(0, 4, "x").is_err());
    assert!(s.insert_text(1, 0, "x").is_err());
    assert_eq!(snapshot(&s), vec!["abc".to_string()]);
    s.insert_text(0, 3, "d").unwrap();
    assert_eq!(s.line(0), Some("abcd"));
}

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, usize, String),
    Delete(usize, usize, usize),
    Cut(usize, usize, usize),
    Paste(usize, usize),
    Replace(usize, usize, String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 0usize..12, "[a-z]{0,4}").prop_map(|(l, i, t)| Op::Insert(l, i, t)),
        (0usize..3, 0usize..12, 0usize..6).prop_map(|(l, i, n)| Op::Delete(l, i, n)),
        (0usize..3, 0usize..12, 0usize..6).prop_map(|(l, i, n)| Op::Cut(l, i, n)),
        (0usize..3, 0usize..12).prop_map(|(l, i)| Op::Paste(l, i)),
        (0usize..3, 0usize..12, "[A-Z]{1,3}").prop_map(|(l, i, t)| Op::Replace(l, i, t)),
    ]
}

proptest! {
    #[test]
    fn undoing_every_edit_restores_initial_content(ops in prop::collection::vec(op_strategy(), 0..24)) {
        let mut s = state(&["alpha", "beta gamma", ""]);
        let initial = snapshot(&s);
        for op in ops {
            let _ = match op {
                Op::Insert(l, i, t) => s.insert_text(l, i, &t),
                Op::Delete(l, i, n) => s.delete_text(l, i, n),
                Op::Cut(l, i, n) => s.cut_text(l, i, n),
                Op::Paste(l, i) => s.paste_text(l, i),
                Op::Replace(l, i, t) => s.insert_replace_text(l, i, &t),
            };
        }
        let edited = snapshot(&s);
        while s.undo().unwrap() {}
        prop_assert_eq!(snapshot(&s), initial);
        while s.redo().unwrap() {}
        prop_assert_eq!(snapshot(&s), edited);
    }
}
