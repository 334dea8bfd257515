use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::NewWindow.name(), "newWindow");
    assert_eq!(Command::CommitRepl.name(), "commitRepl");
    assert_eq!(Command::Quit.name(), "quit");
    assert_eq!(Command::Custom("myCommand".to_string()).name(), "myCommand");
}

#[test]
fn test_from_name_inverts_name() {
    for command in [
        Command::NewWindow,
        Command::CloseWindow,
        Command::Quit,
        Command::OpenCalcRepl,
        Command::OpenShellRepl,
        Command::CommitRepl,
    ] {
        assert_eq!(Command::from_name(command.name()), command);
    }
    assert_eq!(
        Command::from_name("bundle.run"),
        Command::Custom("bundle.run".to_string())
    );
}

#[test]
fn test_is_repl_command() {
    assert!(Command::CommitRepl.is_repl_command());
    assert!(Command::OpenShellRepl.is_repl_command());
    assert!(!Command::Quit.is_repl_command());
}
