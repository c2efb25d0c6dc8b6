//! # Mini BASIC
//!
//! A tiny line-numbered BASIC. Variables are 64-bit integers and control
//! flow is `GOTO` and `IF ... THEN`.
//!
//! ```text
//! 10 REM count to three
//! 20 LET n = 1
//! 30 PRINT n
//! 40 LET n = n + 1
//! 50 IF n < 4 THEN 30
//! 60 END
//! ```
//!
//! The [`lang`] module turns a line of text into a syntax tree. The
//! [`mach`] module keeps the program and runs it one statement at a time,
//! pausing whenever an `INPUT` needs a value:
//!
//! ```
//! use minibasic::mach::{Event, Runtime};
//!
//! let mut runtime = Runtime::new();
//! runtime.load_all(vec!["10 INPUT n", "20 PRINT n * 2"]);
//! runtime.start();
//! assert_eq!(runtime.step(), Event::Input("n".to_string()));
//! assert!(runtime.input("21"));
//! assert_eq!(runtime.step(), Event::Print("42".to_string()));
//! ```

pub mod lang;
pub mod mach;
