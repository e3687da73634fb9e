//! Exit status of the `tokenops-erc1155-interact` binary.

use std::process::{Command, Output};

const ENV: &[&str] = &[
    "NETWORK",
    "POLYGON_AMOY_RPC",
    "PRIVATE_KEY",
    "GAS_PRICE",
    "CHAIN_ID",
    "OKLINK_AMOY_API",
    "ERC1155_CONTRACT",
];

fn run(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tokenops-erc1155-interact"));
    for var in ENV {
        command.env_remove(var);
    }
    command
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_devnet_run_exits_with_success() {
    let output = run(&["--devnet", "--probe-storage"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_missing_network_settings_exit_with_failure() {
    let output = run(&["--contract", "0x5FbDB2315678afecb367f032d93F642f64180aa3"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_contract_exits_with_failure() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
}
