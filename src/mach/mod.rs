/*!
## Rust Machine Module

This Rust module stores the program and runs it one statement at a time.

*/

mod exec;
mod listing;
mod operation;
mod runtime;
mod var;

pub use exec::Flow;
pub use listing::Edit;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::State;
pub use runtime::Steps;
pub use var::Var;
