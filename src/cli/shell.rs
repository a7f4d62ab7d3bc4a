use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};
use shell_words::split;

use crate::cli::commands::{LoopControl, ShellContext};
use crate::cli::{output, CommandError};
use crate::core::BooksManager;
use crate::storage::FileStore;

/// Entry point for the shell. Interactive by default; setting
/// `OBRA_CORE_SCRIPT` switches to a non-interactive mode that reads
/// commands from stdin, one per line.
pub fn run_cli() -> Result<(), CommandError> {
    let script_mode = std::env::var_os("OBRA_CORE_SCRIPT").is_some();
    let storage = FileStore::new_default()?;
    let manager = BooksManager::open_default(Box::new(storage));
    let mut context = ShellContext::new(manager, script_mode);

    if script_mode {
        run_script(&mut context)
    } else {
        output::section("Obra Core");
        output::info("Escribe `help` para ver los comandos disponibles.");
        run_interactive(&mut context)
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CommandError> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("obra> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => output::error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Hasta luego.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CommandError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => output::error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Línea ilegible: {}", err));
            return Ok(LoopControl::Continue);
        }
    };
    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }
    let command = tokens[0].to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.dispatch(&command, &args)
}
