mod migrate;
mod root;

pub use root::Cli;
