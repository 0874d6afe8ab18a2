use clap::{Arg, ArgAction, Command};
use log::debug;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    Command::new("go2rtc-bridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mirrors go2rtc streams as webcams, proxies snapshots and manages the go2rtc server.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom settings file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("server-url")
                .long("server-url")
                .value_name("URL")
                .help("Overrides the go2rtc server URL from the settings file")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("ignore-ssl")
                .long("ignore-ssl")
                .help("Skip TLS certificate validation for go2rtc API calls")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand_required(true)
        .subcommand(Command::new("webcams").about("Lists the webcams derived from the live go2rtc configuration"))
        .subcommand(
            Command::new("snapshot")
                .about("Captures a single snapshot from a webcam")
                .arg(Arg::new("webcam").long("webcam").value_name("NAME").required(true).help("Stream name or namespaced webcam name").action(ArgAction::Set))
                .arg(Arg::new("output").short('o').long("output").value_name("DIR").help("Output directory for the image").action(ArgAction::Set)),
        )
        .subcommand(
            Command::new("add-stream")
                .about("Registers a stream with go2rtc")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true).help("Stream name (non-alphanumerics become '_')").action(ArgAction::Set))
                .arg(Arg::new("src").long("src").value_name("SOURCE").required(true).help("Stream source, e.g. rtsp://... or ffmpeg:device?video=0").action(ArgAction::Set)),
        )
        .subcommand(
            Command::new("remove-stream")
                .about("Removes a stream from go2rtc")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true).help("Stream name").action(ArgAction::Set)),
        )
        .subcommand(Command::new("enable-cors").about("Sets api.origin to '*' and restarts go2rtc"))
        .subcommand(Command::new("test-url").about("Checks that the server URL answers with a go2rtc config"))
        .subcommand(Command::new("sources").about("Lists capture sources (ffmpeg devices) known to go2rtc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["go2rtc-bridge", "snapshot", "--webcam", "printer", "--server-url", "http://h:1984"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "snapshot");
        assert_eq!(sub.get_one::<String>("server-url").map(String::as_str), Some("http://h:1984"));
        assert_eq!(sub.get_one::<String>("webcam").map(String::as_str), Some("printer"));
    }

    #[test]
    fn add_stream_requires_src() {
        assert!(build_cli().try_get_matches_from(["go2rtc-bridge", "add-stream", "--name", "x"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
