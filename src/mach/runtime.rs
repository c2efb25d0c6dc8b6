use super::{Edit, Flow, Listing, Var};
use crate::lang::{Error, LineNumber};
use std::collections::VecDeque;

/// ## Execution state
///
/// `Idle` until a run starts. `AwaitingInput` parks the machine after an
/// `INPUT` until a number arrives through `Runtime::input`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum State {
    Idle,
    Running,
    AwaitingInput,
    Finished,
}

impl Default for State {
    fn default() -> State {
        State::Idle
    }
}

/// One report per call to `Runtime::step`.
#[derive(Debug, PartialEq, Clone)]
pub enum Event {
    /// No run is active.
    Idle,
    /// A statement ran without anything to show.
    Running,
    Jumped(LineNumber),
    Print(String),
    Warning(String),
    /// Waiting on a value for the named variable.
    Input(String),
    Finished,
    Errors(Error),
}

#[derive(Debug, Default)]
pub struct Runtime {
    listing: Listing,
    program: Listing,
    state: State,
    pc: Option<LineNumber>,
    var: Var,
    pending: Option<String>,
    queued: VecDeque<Event>,
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn pc(&self) -> Option<LineNumber> {
        self.pc
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn get_listing(&self) -> Listing {
        self.listing.clone()
    }

    pub fn set_listing(&mut self, listing: Listing) {
        self.listing = listing;
    }

    /// Edits go to the listing only. A run in progress keeps executing
    /// the copy it took in `start`.
    pub fn enter(&mut self, s: &str) -> Edit {
        self.listing.enter(s)
    }

    pub fn load_all<'a, T: IntoIterator<Item = &'a str>>(&mut self, lines: T) {
        self.listing.load_all(lines)
    }

    pub fn clear(&mut self) {
        self.listing.clear()
    }

    pub fn start(&mut self) {
        self.program = self.listing.clone();
        self.var.clear();
        self.pending = None;
        self.queued.clear();
        self.pc = self.program.first();
        self.state = match self.pc {
            Some(_) => State::Running,
            None => State::Finished,
        };
    }

    /// Abandon the current run.
    pub fn interrupt(&mut self) {
        self.state = State::Idle;
        self.pc = None;
        self.pending = None;
        self.queued.clear();
    }

    /// Supply the value for a pending `INPUT`. Returns false, leaving
    /// everything as it was, unless the text is a whole number.
    pub fn input(&mut self, s: &str) -> bool {
        if self.state() != State::AwaitingInput {
            return false;
        }
        let value = match s.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => return false,
        };
        if let Some(name) = self.pending.take() {
            self.var.store(&name, value);
        }
        self.state = State::Running;
        true
    }

    /// Advance by one statement.
    pub fn step(&mut self) -> Event {
        if let Some(event) = self.queued.pop_front() {
            return event;
        }
        match self.state() {
            State::Idle => Event::Idle,
            State::Finished => Event::Finished,
            State::AwaitingInput => Event::Input(self.pending.clone().unwrap_or_default()),
            State::Running => self.execute(),
        }
    }

    /// Pull events until the run pauses for input, ends, or fails.
    pub fn steps(&mut self) -> Steps<'_> {
        Steps {
            runtime: self,
            done: false,
        }
    }

    fn finish(&mut self) {
        self.state = State::Finished;
        self.pc = None;
    }

    fn execute(&mut self) -> Event {
        let pc = match self.pc {
            Some(pc) => pc,
            None => {
                self.finish();
                return Event::Finished;
            }
        };
        // A jump to a line that does not exist ends the program here.
        let statement = match self.program.statement(pc) {
            Some(statement) => statement,
            None => {
                self.finish();
                return Event::Finished;
            }
        };
        self.pc = self.program.after(pc);
        let mut warnings = vec![];
        let event = match statement.run(&mut self.var, &mut warnings) {
            Ok(Flow::Next) => Event::Running,
            Ok(Flow::Print(s)) => Event::Print(s),
            Ok(Flow::Input(name)) => {
                self.pending = Some(name.clone());
                self.state = State::AwaitingInput;
                Event::Input(name)
            }
            Ok(Flow::Jump(number)) => {
                self.pc = Some(number);
                Event::Jumped(number)
            }
            Ok(Flow::Halt) => {
                self.finish();
                Event::Finished
            }
            Err(error) => {
                self.finish();
                Event::Errors(error.in_line_number(pc))
            }
        };
        if warnings.is_empty() {
            return event;
        }
        self.queued.extend(warnings.into_iter().map(Event::Warning));
        self.queued.push_back(event);
        self.queued.pop_front().unwrap_or(Event::Running)
    }
}

/// Lazy sequence of events for the active run. It ends after an
/// `Input`, `Finished` or `Errors` event; dropping it early simply
/// leaves the machine where it was.
pub struct Steps<'a> {
    runtime: &'a mut Runtime,
    done: bool,
}

impl<'a> Iterator for Steps<'a> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.done {
            return None;
        }
        let event = self.runtime.step();
        match event {
            Event::Idle => {
                self.done = true;
                return None;
            }
            Event::Input(_) | Event::Finished | Event::Errors(_) => self.done = true,
            _ => {}
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(lines: &[&str]) -> Runtime {
        let mut r = Runtime::new();
        r.load_all(lines.iter().cloned());
        r
    }

    #[test]
    fn test_idle_until_started() {
        let mut r = runtime(&["10 END"]);
        assert_eq!(r.state(), State::Idle);
        assert_eq!(r.step(), Event::Idle);
        assert_eq!(r.steps().count(), 0);
    }

    #[test]
    fn test_empty_program_finishes() {
        let mut r = Runtime::new();
        r.start();
        assert_eq!(r.state(), State::Finished);
        assert_eq!(r.step(), Event::Finished);
    }

    #[test]
    fn test_print_then_end() {
        let mut r = runtime(&["10 LET x = 5", "20 PRINT x", "30 END"]);
        r.start();
        let events: Vec<Event> = r.steps().collect();
        assert_eq!(
            events,
            vec![Event::Running, Event::Print("5".to_string()), Event::Finished]
        );
    }

    #[test]
    fn test_warning_comes_before_print() {
        let mut r = runtime(&["10 PRINT y"]);
        r.start();
        let events: Vec<Event> = r.steps().collect();
        assert_eq!(
            events,
            vec![
                Event::Warning("unknown variable `y`".to_string()),
                Event::Print("0".to_string()),
                Event::Finished
            ]
        );
    }

    #[test]
    fn test_fallthrough_off_the_end() {
        let mut r = runtime(&["10 PRINT 1"]);
        r.start();
        assert_eq!(r.step(), Event::Print("1".to_string()));
        assert_eq!(r.pc(), None);
        assert_eq!(r.step(), Event::Finished);
        assert_eq!(r.state(), State::Finished);
    }

    #[test]
    fn test_interrupt() {
        let mut r = runtime(&["10 GOTO 10"]);
        r.start();
        assert_eq!(r.steps().take(100).count(), 100);
        r.interrupt();
        assert_eq!(r.state(), State::Idle);
        assert_eq!(r.step(), Event::Idle);
    }

    #[test]
    fn test_input_rejected_when_not_waiting() {
        let mut r = runtime(&["10 END"]);
        assert!(!r.input("5"));
        r.start();
        assert!(!r.input("5"));
    }

    #[test]
    fn test_runtime_error_stops_the_run() {
        let mut r = runtime(&["10 LET z = 0", "20 PRINT 5 / z", "30 PRINT 1"]);
        r.start();
        assert_eq!(r.step(), Event::Running);
        match r.step() {
            Event::Errors(e) => assert_eq!(e.to_string(), "DIVISION BY ZERO IN 20"),
            other => panic!("{:?}", other),
        }
        assert_eq!(r.state(), State::Finished);
    }

    #[test]
    fn test_warning_kept_when_statement_fails() {
        let mut r = runtime(&["10 PRINT y / 0"]);
        r.start();
        let events: Vec<Event> = r.steps().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::Warning("unknown variable `y`".to_string()));
        match &events[1] {
            Event::Errors(e) => assert_eq!(e.to_string(), "DIVISION BY ZERO IN 10"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_edits_during_run_wait_for_next_run() {
        let mut r = runtime(&["10 PRINT 1", "20 PRINT 2"]);
        r.start();
        assert_eq!(r.step(), Event::Print("1".to_string()));
        assert_eq!(r.enter("20"), Edit::Deleted(20));
        assert_eq!(r.step(), Event::Print("2".to_string()));
        r.start();
        assert_eq!(r.step(), Event::Print("1".to_string()));
        assert_eq!(r.step(), Event::Finished);
    }
}
