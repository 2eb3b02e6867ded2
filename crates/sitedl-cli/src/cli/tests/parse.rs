use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[test]
fn cli_parse_domain() {
    match parse(&["sitedl", "domain", "streamingcommunity"]) {
        CliCommand::Domain { site } => assert_eq!(site, "streamingcommunity"),
        _ => panic!("expected Domain"),
    }
}

#[test]
fn cli_parse_search_defaults() {
    match parse(&["sitedl", "search", "animeunity"]) {
        CliCommand::Search { site, catalog } => {
            assert_eq!(site, "animeunity");
            assert!(catalog.is_none());
        }
        _ => panic!("expected Search"),
    }
}

#[test]
fn cli_parse_search_with_catalog() {
    match parse(&["sitedl", "search", "animeunity", "--catalog", "/tmp/au.toml"]) {
        CliCommand::Search { catalog, .. } => {
            assert_eq!(catalog, Some(PathBuf::from("/tmp/au.toml")))
        }
        _ => panic!("expected Search"),
    }
}

#[test]
fn cli_parse_sites() {
    assert!(matches!(parse(&["sitedl", "sites"]), CliCommand::Sites));
}

#[test]
fn cli_parse_completions() {
    match parse(&["sitedl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_missing_site() {
    assert!(Cli::try_parse_from(["sitedl", "domain"]).is_err());
}

#[test]
fn cli_rejects_unknown_shell() {
    assert!(Cli::try_parse_from(["sitedl", "completions", "cmd"]).is_err());
}
