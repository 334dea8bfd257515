use super::*;
use tempfile::tempdir;

#[test]
fn test_default_document_is_empty_and_clean() {
    let doc = Document::default();
    assert_eq!(doc.text(), "");
    assert_eq!(doc.cursor_offset(), 0);
    assert_eq!(doc.path(), None);
    assert!(!doc.is_dirty());
}

#[test]
fn test_cursor_line_and_offset() {
    let mut doc = Document::from_text("fn main() {\n    call();\n}\n");
    doc.set_cursor_offset(16);

    assert_eq!(doc.cursor_line(), 1);
    assert_eq!(doc.cursor_line_offset(), 4);
    assert_eq!(doc.current_line(), "    call();\n");
}

#[test]
fn test_cursor_is_clamped() {
    let mut doc = Document::from_text("abc");
    doc.set_cursor_offset(99);
    assert_eq!(doc.cursor_offset(), 3);

    doc.set_text("a");
    assert_eq!(doc.cursor_offset(), 1);
}

#[test]
fn test_selection_text() {
    let mut doc = Document::from_text("hello world");
    assert!(!doc.has_selection());

    doc.set_selection(Some(6..11));
    assert_eq!(doc.selection().as_deref(), Some("world"));

    doc.set_selection(Some(3..3));
    assert!(doc.selection().is_none());
}

#[test]
fn test_insert_moves_cursor_after_text() {
    let mut doc = Document::from_text(">> ");
    doc.set_cursor_offset(3);
    doc.insert_at_cursor("1+1");

    assert_eq!(doc.text(), ">> 1+1");
    assert_eq!(doc.cursor_offset(), 6);
    assert!(doc.is_dirty());
}

#[test]
fn test_scroll_to_line_is_clamped() {
    let mut doc = Document::from_text("a\nb\nc");
    doc.scroll_to_line(10);
    assert_eq!(doc.scroll_line(), 2);
}

#[test]
fn test_save_writes_file_backed_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "old").unwrap();

    let mut doc = Document::open(&path).unwrap();
    doc.set_text("new contents\n");
    doc.save().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents\n");
    assert!(!doc.is_dirty());
}

#[test]
fn test_save_without_path_is_noop() {
    let mut doc = Document::from_text("scratch");
    doc.save().unwrap();
    assert_eq!(doc.text(), "scratch");
}
