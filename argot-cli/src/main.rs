//! Demonstration command-line surface for the argot engine
//!
//! Usage:
//!   argot serve [--port <port>] [--host <host>] [-v]   - Start a demo server
//!   argot echo [--repeat <n>] [--upper] <text>...      - Print text back
//!   argot complete <words>...                          - Suggest completions

mod grammar;
mod render;
mod runner;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(runner::run(&args));
}
