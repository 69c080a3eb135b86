//! Unit tests for listen address configuration.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use clap::Parser;

use super::listen::{DEFAULT_PORT, ListenArgs};

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    listen: ListenArgs,
}

#[test]
fn test_listen_args_default() {
    let args = ListenArgs::default();
    assert_eq!(args.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(args.port, DEFAULT_PORT);
    assert_eq!(args.to_string(), "0.0.0.0:8080");
}

#[test]
fn test_localhost_constructor() {
    let args = ListenArgs::localhost(3000);
    assert_eq!(args.socket_addr().to_string(), "127.0.0.1:3000");
}

#[test]
fn test_ipv6_display() {
    let args = ListenArgs::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 9000);
    assert_eq!(args.to_string(), "[::1]:9000");
}

#[test]
fn test_cli_parses_host_and_port() {
    let cli = TestCli::try_parse_from(["tts-gateway", "--host", "127.0.0.1", "--port", "9090"])
        .unwrap();
    assert_eq!(cli.listen, ListenArgs::localhost(9090));
}

#[test]
fn test_cli_rejects_invalid_port() {
    let result = TestCli::try_parse_from(["tts-gateway", "--port", "99999"]);
    assert!(result.is_err(), "Ports above 65535 should be rejected");
}

#[test]
fn test_cli_rejects_invalid_host() {
    let result = TestCli::try_parse_from(["tts-gateway", "--host", "not-an-ip"]);
    assert!(result.is_err());
}
