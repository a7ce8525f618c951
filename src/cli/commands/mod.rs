//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod check;
pub mod completions;
pub mod decrypt;
pub mod delete;
pub mod encrypt;
pub mod generate;
pub mod list;
pub mod show;
pub mod update;
