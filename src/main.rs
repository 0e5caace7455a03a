//! richpad - drive the editor headlessly from a script or stdin

mod cli;

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{CliArgs, StartupConfig, StartupMode};
use richpad::script::{load_script_file, parse_step, run_step};
use richpad::toolbar::{CancelPrompt, StdioPrompt};
use richpad::{EditorConfig, RichTextEditor};

const HELP: &str = "\
Enter one step per line, e.g.:
  type: Hello world      key: enter         exec: bold
  exec: { command: formatBlock, arg: h2 }   caret: [0, 3]
  click: { action: link }                   font-size: 18px
  blur   show   stats   toolbar   help   quit";

fn main() -> Result<()> {
    richpad::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    run(startup)
}

fn run(startup: StartupConfig) -> Result<()> {
    let config = match &startup.config_path {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };

    let value = match &startup.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };

    let notifications = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&notifications);
    let echo = startup.echo_notifications;
    let mut editor = RichTextEditor::with_config(config, &value, move |content| {
        counter.set(counter.get() + 1);
        if echo {
            eprintln!("change: {}", content);
        }
    });
    if let Some(placeholder) = &startup.placeholder {
        editor = editor.with_placeholder(placeholder);
    }

    match &startup.mode {
        StartupMode::Script(path) => {
            let script = load_script_file(path)
                .with_context(|| format!("Failed to load script {}", path.display()))?;
            script
                .run(&mut editor, &mut CancelPrompt)
                .with_context(|| format!("Script {} failed", path.display()))?;
        }
        StartupMode::Interactive => interactive(&mut editor)?,
    }

    let content = editor.content();
    match &startup.output {
        Some(path) => std::fs::write(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", content),
    }

    if startup.show_stats {
        let stats = editor.stats();
        eprintln!(
            "{} words, {} characters, {} min read, {} notifications",
            stats.words,
            stats.characters,
            stats.reading_minutes,
            notifications.get()
        );
    }
    Ok(())
}

/// Read steps from stdin until EOF or `quit`. Prompts read from the same
/// stream.
fn interactive(editor: &mut RichTextEditor) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", HELP)?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(stdout, "{}", HELP)?,
            "show" => {
                let content = editor.content();
                if content.is_empty() {
                    writeln!(stdout, "({})", editor.placeholder())?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
            }
            "stats" => {
                let stats = editor.stats();
                writeln!(
                    stdout,
                    "{} words, {} characters, {} min read",
                    stats.words, stats.characters, stats.reading_minutes
                )?;
            }
            "toolbar" => {
                let labels: Vec<String> = editor
                    .toolbar()
                    .iter()
                    .map(|a| format!("{} ({})", a.label, a.identifier))
                    .collect();
                writeln!(stdout, "{}", labels.join(", "))?;
            }
            step => match parse_step(step) {
                Ok(step) => {
                    let mut prompt = StdioPrompt::new(&mut input, io::stdout());
                    match run_step(editor, &step, &mut prompt) {
                        Ok(true) => writeln!(stdout, "{}", editor.content())?,
                        Ok(false) => {}
                        Err(e) => writeln!(stdout, "error: {}", e)?,
                    }
                }
                Err(e) => writeln!(stdout, "error: {}", e)?,
            },
        }
    }
    Ok(())
}
