//! Argv acquisition, layered standard flags, dispatch and exit codes
//!
//! `--help` and `--version` are runner features layered in front of the
//! grammar, not grammar primitives: they short-circuit before a parse pass
//! starts, so they work regardless of how broken the rest of the line is.

use crate::grammar::{grammar, Invocation};
use crate::render;
use argot_parser::argot::bind::EnvVars;
use argot_parser::argot::context::Annotations;
use argot_parser::argot::docs::document;
use argot_parser::argot::matching::parse_with;
use argot_parser::argot::parser::Parser;
use argot_parser::argot::suggest::complete;

const PROGRAM: &str = "argot";

pub fn run(args: &[String]) -> i32 {
    let env = EnvVars::from_process();
    let cli = grammar(&env);

    if args.iter().any(|a| a == "--help" || a == "-h") || args.is_empty() {
        print!("{}", render::help_page(PROGRAM, &document(&cli)));
        return 0;
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", PROGRAM, env!("CARGO_PKG_VERSION"));
        return 0;
    }

    let mut ctx = Annotations::new();
    env.annotate(&mut ctx);

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    match parse_with(&cli, &arg_refs, &ctx) {
        Ok(invocation) => {
            dispatch(invocation, &ctx, &env);
            0
        }
        Err(failure) => {
            eprint!("{}", render::failure(PROGRAM, &failure, &cli.usage()));
            1
        }
    }
}

fn dispatch(invocation: Invocation, ctx: &Annotations, env: &EnvVars) {
    match invocation {
        Invocation::Serve {
            port,
            host,
            verbose,
        } => {
            println!("serving on {}:{}", host, port);
            if verbose {
                println!("verbose logging enabled");
            }
        }
        Invocation::Echo { text, repeat, upper } => {
            let line = text.join(" ");
            let line = if upper { line.to_uppercase() } else { line };
            for _ in 0..repeat {
                println!("{}", line);
            }
        }
        Invocation::Complete { words } => {
            let cli = grammar(env);
            let (consumed, prefix) = match words.split_last() {
                Some((last, rest)) => (rest.to_vec(), last.clone()),
                None => (Vec::new(), String::new()),
            };
            let suggestions = complete(&cli, &consumed, &prefix, ctx);
            match serde_json::to_string_pretty(&suggestions) {
                Ok(json) => println!("{}", json),
                Err(err) => {
                    eprintln!("{}: error: {}", PROGRAM, err);
                    std::process::exit(1);
                }
            }
        }
    }
}
