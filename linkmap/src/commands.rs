use crate::CLAP_STYLING;
use clap::{Arg, arg, command};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_SEED: &str = "https://www.digitalocean.com";

fn crawl_args() -> [Arg; 3] {
    [
        arg!(-u --"url" <URL>)
            .required(false)
            .help("Seed URL; only assets on the same host are mapped")
            .default_value(DEFAULT_SEED),
        arg!(-m --"max-pages" <NUM>)
            .required(false)
            .help("Maximum number of queued URLs to process")
            .value_parser(clap::value_parser!(usize))
            .default_value("10"),
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Per-request timeout in seconds (default: none)")
            .value_parser(clap::value_parser!(u64)),
    ]
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkmap")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about("Crawl a single host and print (or save) its link graph")
                .args(crawl_args())
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, dot, markdown")
                        .value_parser(["text", "json", "csv", "dot", "markdown"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("serve")
                .about("Crawl a single host once, then serve the graph viewer and /graph.json")
                .args(crawl_args())
                .arg(
                    arg!(-b --"bind" <ADDR>)
                        .required(false)
                        .help("Address to listen on")
                        .value_parser(clap::value_parser!(SocketAddr))
                        .default_value("0.0.0.0:8080"),
                )
                .arg(
                    arg!(--"index" <PATH>)
                        .required(false)
                        .help("HTML file served at / instead of the built-in viewer")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["linkmap", "crawl"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "crawl");
        assert_eq!(sub.get_one::<String>("url").unwrap(), DEFAULT_SEED);
        assert_eq!(*sub.get_one::<usize>("max-pages").unwrap(), 10);
        assert_eq!(sub.get_one::<String>("format").unwrap(), "text");
        assert!(sub.get_one::<u64>("timeout").is_none());
    }

    #[test]
    fn test_serve_arguments() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "linkmap", "serve", "-m", "3", "--bind", "127.0.0.1:9000", "-q",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "serve");
        assert_eq!(*sub.get_one::<usize>("max-pages").unwrap(), 3);
        assert_eq!(
            sub.get_one::<SocketAddr>("bind").unwrap().to_string(),
            "127.0.0.1:9000"
        );
        assert!(sub.get_flag("quiet"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result =
            command_argument_builder().try_get_matches_from(["linkmap", "crawl", "-f", "html"]);
        assert!(result.is_err());
    }
}
