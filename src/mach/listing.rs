use crate::lang::ast::{Command, Dump, Node, Statement};
use crate::lang::{Error, Line, LineNumber};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::Arc;

/// What a single line of input did to the listing.
#[derive(Debug, PartialEq, Clone)]
pub enum Edit {
    Updated(LineNumber),
    Deleted(LineNumber),
    Command(Command),
    Malformed(Error),
    NoOp,
}

#[derive(Debug, Clone)]
struct Entry {
    line: Line,
    statement: Statement,
}

/// ## Program store
///
/// Numbered statements kept in ascending order. Cloning is cheap and
/// the clone is unaffected by later edits to the original, which is
/// how a run gets its own copy of the program.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: Arc<BTreeMap<LineNumber, Entry>>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source = Arc::default();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Replace everything with the numbered statements found in `lines`.
    /// Anything else in the input is skipped.
    pub fn load_all<'a, T: IntoIterator<Item = &'a str>>(&mut self, lines: T) {
        let mut source = BTreeMap::new();
        for s in lines {
            let line = Line::new(s);
            if let Node::Line(number, statement) = line.ast() {
                source.insert(number, Entry { line, statement });
            }
        }
        self.source = Arc::new(source);
    }

    /// Parse one line and apply it. Only numbered statements and bare
    /// line numbers change the listing; everything else is handed back.
    pub fn enter(&mut self, s: &str) -> Edit {
        let line = Line::new(s);
        match line.ast() {
            Node::Line(number, statement) => {
                Arc::make_mut(&mut self.source).insert(number, Entry { line, statement });
                Edit::Updated(number)
            }
            Node::Delete(number) => {
                Arc::make_mut(&mut self.source).remove(&number);
                Edit::Deleted(number)
            }
            Node::Command(command) => Edit::Command(command),
            Node::Nop => Edit::NoOp,
            Node::Invalid(error) => Edit::Malformed(error),
        }
    }

    pub fn statement(&self, number: LineNumber) -> Option<&Statement> {
        self.source.get(&number).map(|entry| &entry.statement)
    }

    /// Source text of one line, if present.
    pub fn line(&self, number: LineNumber) -> Option<String> {
        self.source.get(&number).map(|entry| entry.line.to_string())
    }

    pub fn first(&self) -> Option<LineNumber> {
        self.source.keys().next().copied()
    }

    /// The line that follows `number` when nothing jumps.
    pub fn after(&self, number: LineNumber) -> Option<LineNumber> {
        self.source
            .range((Excluded(number), Unbounded))
            .next()
            .map(|(k, _)| *k)
    }

    /// Source text in line number order.
    pub fn lines(&self) -> Vec<String> {
        self.source
            .values()
            .map(|entry| entry.line.to_string())
            .collect()
    }

    pub fn dump_tree(&self) -> String {
        let mut s = String::new();
        for (number, entry) in self.source.iter() {
            Node::Line(*number, entry.statement.clone()).dump_into(0, &mut s);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_all_filters() {
        let mut listing = Listing::default();
        listing.load_all(vec![
            "20 PRINT 2",
            "",
            "RUN",
            "10 PRINT 1",
            "just words",
            "30 LET = 1",
            "40",
        ]);
        assert_eq!(listing.lines(), vec!["10 PRINT 1", "20 PRINT 2"]);
    }

    #[test]
    fn test_long_lines_are_kept() {
        let long = format!("10 PRINT 1{}", "+1".repeat(150));
        let mut listing = Listing::default();
        listing.load_all(vec![long.as_str(), "20 END"]);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.enter(&long), Edit::Updated(10));
        assert_eq!(listing.line(10), Some(long));
    }

    #[test]
    fn test_load_all_replaces() {
        let mut listing = Listing::default();
        listing.enter("5 END");
        listing.load_all(vec!["10 END"]);
        assert_eq!(listing.first(), Some(10));
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_enter_and_delete() {
        let mut listing = Listing::default();
        assert_eq!(listing.enter("10 PRINT 1"), Edit::Updated(10));
        assert_eq!(listing.enter("10 PRINT 2"), Edit::Updated(10));
        assert_eq!(listing.lines(), vec!["10 PRINT 2"]);
        assert_eq!(listing.line(10), Some("10 PRINT 2".to_string()));
        assert_eq!(listing.enter("10"), Edit::Deleted(10));
        assert!(listing.is_empty());
        assert_eq!(listing.enter("   "), Edit::NoOp);
        assert_eq!(listing.enter("LIST"), Edit::Command(Command::List));
        match listing.enter("LIST 10") {
            Edit::Malformed(e) => assert_eq!(e.text(), "unexpected token after command"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_clone_is_a_snapshot() {
        let mut listing = Listing::default();
        listing.enter("10 END");
        let snapshot = listing.clone();
        listing.enter("20 END");
        listing.enter("10");
        assert_eq!(snapshot.lines(), vec!["10 END"]);
        assert_eq!(listing.lines(), vec!["20 END"]);
    }

    #[test]
    fn test_after() {
        let mut listing = Listing::default();
        listing.load_all(vec!["30 END", "10 END", "20 END"]);
        assert_eq!(listing.after(10), Some(20));
        assert_eq!(listing.after(15), Some(20));
        assert_eq!(listing.after(30), None);
    }

    #[test]
    fn test_dump_tree() {
        let mut listing = Listing::default();
        listing.load_all(vec!["20 END", "10 GOTO 20"]);
        assert_eq!(listing.dump_tree(), "10\n\tGOTO\n\t\t20\n20\n\tEND\n");
    }
}
