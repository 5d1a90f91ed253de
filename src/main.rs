// heaptty: scripted heap allocator simulator with memory visualization

mod interpreter;
mod memory;
mod parser;
mod snapshot;
mod ui;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use interpreter::engine::Interpreter;
use ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("heaptty");

    let use_tui = args.iter().any(|a| a == "--tui");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| *a != "--tui").collect();

    let script_file = match positional.first() {
        Some(path) => path.as_str(),
        None => {
            eprintln!("Error: No script file provided");
            eprintln!();
            eprintln!("Usage: {} <script> [heap-size] [--tui]", program_name);
            eprintln!();
            eprintln!("Examples:");
            eprintln!(
                "  {} demos/aliasing.heap 100          # run and print dump output",
                program_name
            );
            eprintln!(
                "  {} demos/aliasing.heap 100 --tui    # replay the run step by step",
                program_name
            );
            eprintln!();
            eprintln!("With no heap size argument, the size is read from stdin.");
            std::process::exit(1);
        }
    };

    if !Path::new(script_file).exists() {
        eprintln!("Error: File '{}' not found", script_file);
        eprintln!("Usage: {} <script> [heap-size] [--tui]", program_name);
        std::process::exit(1);
    }

    let script = fs::read_to_string(script_file)?;

    // Heap size from the second argument, or interactively
    let heap_size = match positional.get(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(size) => size,
            Err(_) => {
                eprintln!("Error: heap size '{}' is not a valid integer", arg);
                std::process::exit(1);
            }
        },
        None => prompt_heap_size()?,
    };

    if heap_size == 0 {
        eprintln!("Error: heap size must be positive");
        std::process::exit(1);
    }

    let mut interpreter = Interpreter::new(&script, heap_size);
    let run_result = interpreter.run();

    // Dump output first; reports produced before a syntax error are part
    // of the run
    for report in interpreter.output().reports() {
        print!("{}", report.text);
    }

    match &run_result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{}", e);
            if !use_tui {
                std::process::exit(1);
            }
            eprintln!("Entering TUI with partial execution history...");
        }
    }

    if !use_tui {
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(interpreter, script);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if run_result.is_err() {
        std::process::exit(1);
    }

    Ok(())
}

/// Read the heap size from stdin when it isn't given as an argument.
fn prompt_heap_size() -> Result<u64, Box<dyn std::error::Error>> {
    print!("Please enter the initial freelist (heap) size: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    match line.trim().parse::<u64>() {
        Ok(size) => Ok(size),
        Err(_) => {
            eprintln!("Error: heap size '{}' is not a valid integer", line.trim());
            std::process::exit(1);
        }
    }
}
