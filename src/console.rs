use std::io::{self, BufRead};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::control::ControlState;
use crate::ephemeris::Body;
use crate::mount::{Alignment, Dispatcher};

const USAGE: &str =
    "commands: target sun|moon|none, track on|off, align north|south|east|west, quit";

#[derive(Debug, PartialEq)]
enum Command {
    Target(Option<Body>),
    Track(bool),
    Align(Alignment),
    Quit,
}

/// Operator command loop on stdin, one command per line. This is the thin
/// stand-in for a graphical control surface; manual commands go straight to
/// the dispatcher, never through the tracker.
pub fn run_console(control: Arc<ControlState>, dispatcher: Dispatcher, token: CancellationToken) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if token.is_cancelled() {
            break;
        }
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Target(target)) => {
                control.set_target(target);
                match target {
                    Some(body) => log::info!("target set to {body}"),
                    None => log::info!("target cleared"),
                }
            }
            Some(Command::Track(on)) => {
                control.set_tracking(on);
                log::info!("tracking {}", if on { "enabled" } else { "disabled" });
            }
            Some(Command::Align(alignment)) => dispatcher.align(alignment),
            Some(Command::Quit) => {
                token.cancel();
                break;
            }
            None => eprintln!("{USAGE}"),
        }
    }
    log::info!("console stopped");
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next()) {
        ("quit" | "exit", None) => Command::Quit,
        ("target", Some("none")) => Command::Target(None),
        ("target", Some(name)) => Command::Target(Some(name.parse().ok()?)),
        ("track", Some("on")) => Command::Track(true),
        ("track", Some("off")) => Command::Track(false),
        ("align", Some(name)) => Command::Align(name.parse().ok()?),
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}
