//! Interactive TTY frontend for the devcon console engine.
//!
//! Thin presentation glue: registers a handful of demo commands, forwards
//! stdin lines to the engine, and prints the text lines the engine emits.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use devcon_core::console::Console;
use devcon_core::{CommandDescriptor, ConsoleConfig, ConsoleEvent, ParamKind, ParamValue};

#[derive(Parser, Debug)]
#[command(name = "devcon", version, about = "Interactive frontend for the devcon command console")]
struct Args {
    /// Match command names case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Disable `&`-separated compound input
    #[arg(long)]
    no_multi: bool,

    /// Keep duplicate entries in the execution history
    #[arg(long)]
    track_duplicates: bool,

    /// Suppress the unrecognized-command report
    #[arg(long)]
    quiet_unknown: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ConsoleConfig::default()
        .with_case_sensitive(args.case_sensitive)
        .with_multiple_commands(!args.no_multi)
        .with_track_duplicates(args.track_duplicates)
        .with_print_unrecognized(!args.quiet_unknown);

    let mut console = Console::new(config);
    console.subscribe(|event| {
        if let ConsoleEvent::Log { text } = event {
            println!("{text}");
        }
    });
    register_demo_commands(&console);
    console.activate();

    println!(
        "devcon {} - 'commands' lists commands, 'history' shows input, 'exit' quits",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }

        // frontend-level affordances, not engine commands
        match line {
            "exit" => break,
            "commands" => {
                console.print_all_commands();
                continue;
            }
            "history" => {
                for entry in console.history() {
                    println!("{entry}");
                }
                continue;
            }
            _ => {}
        }

        console.try_execute_command(line);
    }

    Ok(())
}

fn register_demo_commands(console: &Console) {
    console.register_command(
        CommandDescriptor::sync("echo", "echo", |values| {
            let text = values[0].as_ref().and_then(ParamValue::as_str).unwrap_or("");
            println!("{text}");
            Ok(())
        })
        .with_params([ParamKind::Str])
        .with_optional_from(0)
        .with_default_value("text")
        .with_info("print the argument text back"),
    );

    console.register_command(
        CommandDescriptor::sync("add", "add", |values| {
            let a = values[0].as_ref().and_then(ParamValue::as_i32).unwrap_or(0);
            let b = values[1].as_ref().and_then(ParamValue::as_i32).unwrap_or(0);
            println!("{}", a + b);
            Ok(())
        })
        .with_params([ParamKind::Int32, ParamKind::Int32])
        .with_default_value("1,2")
        .with_info("add two integers"),
    );

    console.register_command(
        CommandDescriptor::sync("teleport", "teleport", |values| {
            if let Some(target) = values[0].as_ref().and_then(ParamValue::as_vec3) {
                println!("teleporting to ({}, {}, {})", target.x, target.y, target.z);
            }
            Ok(())
        })
        .with_params([ParamKind::Vector3])
        .with_default_value("0,0,0")
        .with_info("move the player to a position"),
    );

    console.register_command(
        CommandDescriptor::detached("countdown", "countdown", |value| {
            let seconds = value.and_then(|v| v.as_i32()).unwrap_or(3).max(0);
            for remaining in (1..=seconds).rev() {
                println!("{remaining}...");
                std::thread::sleep(std::time::Duration::from_secs(1));
            }
            println!("liftoff");
        })
        .with_params([ParamKind::Int32])
        .with_optional_from(0)
        .with_default_value("3")
        .with_info("count down in the background"),
    );
}
