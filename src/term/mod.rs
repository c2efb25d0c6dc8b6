extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::Args;
use ansi_term::Style;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Signal, Terminal};
use minibasic::lang::{ast::Command, Error, LineNumber, MAX_LINE_LEN};
use minibasic::mach::{Edit, Event, Listing, Runtime, State};
use minibasic::error;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const HELP: &str = "\
STATEMENTS
  REM text                 comment
  LET var = expr           assign
  PRINT expr               print a value
  INPUT var                read a whole number
  GOTO n                   continue at line n
  IF expr THEN n           continue at line n unless expr is 0
  END                      stop the program
OPERATORS
  **  * /  + -  = < >      tightest first, ** groups to the right
COMMANDS
  RUN LOAD LIST CLEAR HELP QUIT
Type a numbered line to store it, or the number alone to delete it.";

pub fn main(args: Args) {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
        return;
    }
    if let Err(error) = main_loop(&args, interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(args: &Args, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let mut runtime = Runtime::new();
    let command = Interface::new("BASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);
    let file_name = Interface::new("LOAD")?;
    file_name.set_prompt("FILE? ")?;

    if let Some(path) = &args.file {
        open(&command, &mut runtime, path, args.tree)?;
    }
    command.write_fmt(format_args!("READY.\n"))?;

    loop {
        let saved_completer = command.completer();
        command.set_completer(Arc::new(LineCompleter::new(runtime.get_listing())));
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        command.set_completer(saved_completer);
        if string.len() > MAX_LINE_LEN {
            report(&command, &error!(LineBufferOverflow))?;
            continue;
        }
        let cmd = match runtime.enter(&string) {
            Edit::NoOp => continue,
            Edit::Malformed(error) => {
                report(&command, &error)?;
                continue;
            }
            Edit::Updated(_) | Edit::Deleted(_) => {
                command.add_history_unique(string);
                if args.tree {
                    let tree = runtime.get_listing().dump_tree();
                    command.write_fmt(format_args!("{}", tree))?;
                }
                continue;
            }
            Edit::Command(cmd) => cmd,
        };
        command.add_history_unique(string);
        match cmd {
            Command::Quit => break,
            Command::Run => {
                interrupted.store(false, Ordering::SeqCst);
                runtime.start();
                drive(&mut runtime, &command, &input, args.cycles, &interrupted)?;
            }
            Command::Load => match file_name.read_line()? {
                ReadResult::Input(name) => {
                    open(&command, &mut runtime, Path::new(name.trim()), args.tree)?
                }
                ReadResult::Signal(_) | ReadResult::Eof => {}
            },
            Command::List => {
                for line in runtime.get_listing().lines() {
                    command.write_fmt(format_args!("{}\n", line))?;
                }
            }
            Command::Clear => runtime.clear(),
            Command::Help => command.write_fmt(format_args!("{}\n", HELP))?,
        }
        command.write_fmt(format_args!("READY.\n"))?;
    }
    Ok(())
}

/// Run until the program ends, stopping every `cycles` statements to
/// look for Ctrl-C.
fn drive<T: Terminal>(
    runtime: &mut Runtime,
    command: &Interface<T>,
    input: &Interface<T>,
    cycles: usize,
    interrupted: &AtomicBool,
) -> std::io::Result<()> {
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
            return brk(command);
        }
        let mut waiting = None;
        for event in runtime.steps().take(cycles.max(1)) {
            match event {
                Event::Print(s) => command.write_fmt(format_args!("{}\n", s))?,
                Event::Warning(s) => command.write_fmt(format_args!(
                    "{}\n",
                    Style::new().dimmed().paint(format!("WARNING: {}", s))
                ))?,
                Event::Errors(error) => return report(command, &error),
                Event::Input(name) => waiting = Some(name),
                Event::Finished => return Ok(()),
                Event::Idle | Event::Running | Event::Jumped(_) => {}
            }
        }
        if let Some(name) = waiting {
            if !read_input(runtime, input, &name)? {
                runtime.interrupt();
                return brk(command);
            }
        } else if runtime.state() == State::Idle {
            return Ok(());
        }
    }
}

/// Prompt until the value is accepted. False means the user gave up.
fn read_input<T: Terminal>(
    runtime: &mut Runtime,
    input: &Interface<T>,
    name: &str,
) -> std::io::Result<bool> {
    input.set_prompt(&format!("{}? ", name))?;
    loop {
        match input.read_line()? {
            ReadResult::Input(string) => {
                if runtime.input(&string) {
                    input.add_history_unique(string);
                    return Ok(true);
                }
                input.write_fmt(format_args!("?REDO FROM START\n"))?;
            }
            ReadResult::Signal(Signal::Interrupt) => {
                input.set_buffer("")?;
                input.lock_reader().cancel_read_line()?;
                return Ok(false);
            }
            ReadResult::Signal(_) | ReadResult::Eof => return Ok(false),
        }
    }
}

fn brk<T: Terminal>(command: &Interface<T>) -> std::io::Result<()> {
    command.write_fmt(format_args!("{}\n", Style::new().bold().paint("BREAK")))
}

fn report<T: Terminal>(command: &Interface<T>, error: &Error) -> std::io::Result<()> {
    command.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(format!("?{}", error))
    ))
}

fn open<T: Terminal>(
    command: &Interface<T>,
    runtime: &mut Runtime,
    path: &Path,
    tree: bool,
) -> std::io::Result<()> {
    match load(path) {
        Ok(lines) => {
            runtime.load_all(lines.iter().map(String::as_str));
            if tree {
                let tree = runtime.get_listing().dump_tree();
                command.write_fmt(format_args!("{}", tree))?;
            }
            Ok(())
        }
        Err(error) => report(command, &error),
    }
}

fn load(path: &Path) -> Result<Vec<String>, Error> {
    let reader = match File::open(path) {
        Ok(file) => BufReader::new(file),
        Err(error) => {
            let msg = error.to_string();
            match error.kind() {
                ErrorKind::NotFound => return Err(error!(FileNotFound; msg.as_str())),
                _ => return Err(error!(InternalError; msg.as_str())),
            }
        }
    };
    let mut lines = vec![];
    for line in reader.lines() {
        match line {
            Ok(line) => lines.push(line),
            Err(error) => return Err(error!(InternalError; error.to_string().as_str())),
        }
    }
    Ok(lines)
}

/// Tab after a bare line number brings back that line for editing.
struct LineCompleter {
    listing: Listing,
}

impl LineCompleter {
    fn new(listing: Listing) -> LineCompleter {
        LineCompleter { listing }
    }
}

impl<Term: Terminal> Completer<Term> for LineCompleter {
    fn complete(
        &self,
        _word: &str,
        prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let number = prompter.buffer().trim().parse::<LineNumber>().ok()?;
        let s = self.listing.line(number)?;
        let mut comp = Completion::simple(s);
        comp.suffix = linefeed::complete::Suffix::None;
        Some(vec![comp])
    }
}
