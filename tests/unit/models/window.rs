use super::*;

#[test]
fn test_new_tab_assigns_unique_ids() {
    let mut win = Window::new(WindowId(1));
    let a = win.new_tab("a", TabKind::Other);
    let b = win.new_tab("b", TabKind::Edit(Document::new()));

    assert_ne!(a, b);
    assert_eq!(win.tab_ids(), vec![a, b]);
    assert!(win.tab(b).unwrap().document().is_some());
    assert!(win.tab(a).unwrap().document().is_none());
}

#[test]
fn test_focussed_tab_is_lookup_only() {
    let mut win = Window::new(WindowId(1));
    let a = win.new_tab("a", TabKind::Other);
    assert!(win.focussed_tab().is_none());

    assert!(win.set_focussed_tab(a));
    assert_eq!(win.focussed_tab().map(Tab::title), Some("a"));

    win.remove_tab(a);
    assert!(win.focussed_tab().is_none());
    assert!(!win.set_focussed_tab(a));
}

#[test]
fn test_tabs_span_panes() {
    let mut win = Window::new(WindowId(1));
    let a = win.new_tab("a", TabKind::Other);
    win.split();
    let b = win.new_tab("b", TabKind::Other);

    assert_eq!(win.panes().len(), 2);
    assert_eq!(win.panes()[1].tabs()[0].id(), b);
    assert_eq!(win.tabs().count(), 2);

    assert!(win.set_focussed_tab(a));
    let c = win.new_tab("c", TabKind::Other);
    assert_eq!(win.panes()[0].tabs().len(), 2);
    assert_eq!(win.panes()[0].tabs()[1].id(), c);
}
