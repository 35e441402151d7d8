//! CLI parse tests.

use super::{Cli, CliCommand, RequestArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn request_args(args: &[&str]) -> RequestArgs {
    match parse(args) {
        CliCommand::Get(a) | CliCommand::Post(a) | CliCommand::Put(a) | CliCommand::Delete(a) => a,
        other => panic!("expected a verb command, got {:?}", other),
    }
}
