//! One module per menu action.  Every `execute` takes the controller,
//! prompts for whatever it needs, and renders the outcome.

pub mod delete;
pub mod history;
pub mod list;
pub mod login;
pub mod logout;
pub mod register;
pub mod retrieve;
pub mod store;
