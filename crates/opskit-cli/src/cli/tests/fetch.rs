use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn fetch_sources_in_order() {
    match parse(&[
        "opskit",
        "fetch",
        "-o",
        "out/list.txt",
        "https://a.example/list.txt",
        "cmd:cat /usr/share/list.txt",
    ]) {
        CliCommand::Fetch { output, sources } => {
            assert_eq!(output, Some(PathBuf::from("out/list.txt")));
            assert_eq!(
                sources,
                vec!["https://a.example/list.txt", "cmd:cat /usr/share/list.txt"]
            );
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn fetch_requires_a_source() {
    assert!(Cli::try_parse_from(["opskit", "fetch"]).is_err());
}
