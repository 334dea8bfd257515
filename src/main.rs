use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use zcore::core::Command;
use zcore::kernel::repl;
use zcore::kernel::services::adapters::AppPaths;
use zcore::kernel::{App, LoopHandle};
use zcore::logging::{self, LogTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReplKind {
    Calc,
    Shell,
}

#[derive(Debug, Parser)]
#[command(name = "zcore", version, about = "Line-driven REPL on top of the zcore application core")]
struct Cli {
    /// Write a per-process log file under the application root
    #[arg(long)]
    log: bool,

    /// Application root (settings, cache, logs)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Evaluation strategy of the opened REPL
    #[arg(long, value_enum, default_value_t = ReplKind::Calc)]
    repl: ReplKind,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let paths = cli
        .root
        .map(AppPaths::new)
        .unwrap_or_else(AppPaths::platform_default);
    paths.ensure_root()?;

    let target = if cli.log {
        LogTarget::File {
            dir: paths.root().to_path_buf(),
        }
    } else {
        LogTarget::Discard
    };
    let _logging = logging::init(target);

    let handle = LoopHandle::new();
    let mut app = App::new(paths, Box::new(handle.clone()));
    app.load()?;
    repl::install(&mut app);
    app.new_window(true)?;
    app.execute(match cli.repl {
        ReplKind::Calc => Command::OpenCalcRepl,
        ReplKind::Shell => Command::OpenShellRepl,
    })?;

    let mut stdout = io::stdout().lock();
    print_from(&app, 0, &mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            write!(stdout, "{}", repl::PROMPT)?;
            stdout.flush()?;
            continue;
        }
        let Some(doc) = app.focussed_document_mut() else {
            break;
        };
        doc.insert_at_cursor(input);
        let input_end = doc.len_chars();

        app.execute(Command::CommitRepl)?;
        print_from(&app, input_end, &mut stdout)?;
        if handle.should_exit() {
            break;
        }
    }

    writeln!(stdout)?;
    app.quit()?;
    Ok(())
}

/// Prints the focussed document from char offset `from` to its end.
fn print_from(app: &App, from: usize, out: &mut impl Write) -> io::Result<()> {
    if let Some(doc) = app.focussed_document() {
        let from = from.min(doc.len_chars());
        for chunk in doc.rope().slice(from..).chunks() {
            out.write_all(chunk.as_bytes())?;
        }
    }
    out.flush()
}
