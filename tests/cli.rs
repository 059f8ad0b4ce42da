//! End-to-end tests that spawn the compiled binary, including runs against
//! a stub `az` placed ahead of the real one on PATH.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Value, json};
use tempfile::TempDir;

fn with_temp_workspace<F>(test: F)
where
    F: FnOnce(&Path),
{
    let temp_dir = TempDir::new().expect("create temp dir");
    test(temp_dir.path());
}

fn agwgen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agwgen"))
}

fn full_input() -> Value {
    json!({
        "fqdns": ["backend.contoso.com"],
        "healthcheck_path": "/health",
        "application_path": "/myapp/*",
        "name": "app1",
        "appgw_rule_name": "app1Rule",
        "application_name": "myapp.contoso.com",
        "application_gateway": "gw1",
        "resource_group": "rg1",
        "subscription": "sub1",
    })
}

fn write_input(workspace: &Path, value: &Value) -> PathBuf {
    let path = workspace.join("input.json");
    fs::write(&path, serde_json::to_string_pretty(value).expect("render input"))
        .expect("write input file");
    path
}

fn run_cli(workspace: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_path(workspace, args, None)
}

/// Run the binary from `workspace`, optionally with `extra_path` prepended
/// to PATH so a stub `az` shadows any real installation.
fn run_cli_with_path(
    workspace: &Path,
    args: &[&str],
    extra_path: Option<&Path>,
) -> (i32, String, String) {
    let mut command = Command::new(agwgen_binary());
    command.args(args).current_dir(workspace);

    if let Some(dir) = extra_path {
        let mut paths = vec![dir.to_path_buf()];
        paths.extend(env::split_paths(&env::var_os("PATH").unwrap_or_default()));
        command.env("PATH", env::join_paths(paths).expect("join PATH"));
    }

    capture(command)
}

/// Run the binary with PATH reduced to one empty directory, so the `az`
/// lookup cannot even start.
#[cfg(unix)]
fn run_cli_without_az(workspace: &Path, args: &[&str]) -> (i32, String, String) {
    let empty_bin = workspace.join("empty-bin");
    fs::create_dir_all(&empty_bin).expect("create empty PATH dir");

    let mut command = Command::new(agwgen_binary());
    command.args(args).current_dir(workspace).env("PATH", &empty_bin);

    capture(command)
}

fn capture(mut command: Command) -> (i32, String, String) {
    let output = command.output().expect("run agwgen CLI");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (code, stdout, stderr)
}

#[cfg(unix)]
fn install_stub_az(workspace: &Path, script_body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin_dir = workspace.join("stub-bin");
    fs::create_dir_all(&bin_dir).expect("create stub bin dir");
    let az = bin_dir.join("az");
    fs::write(&az, format!("#!/bin/sh\n{script_body}\n")).expect("write stub az");
    fs::set_permissions(&az, fs::Permissions::from_mode(0o755)).expect("mark stub executable");
    bin_dir
}

#[test]
fn missing_input_file_exits_one() {
    with_temp_workspace(|workspace| {
        let (code, stdout, _stderr) = run_cli(workspace, &["--file", "missing.json"]);

        assert_eq!(code, 1, "missing file should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error: File does not exist at the given path 'missing.json'"),
            "stdout should name the missing path, got:\n{stdout}"
        );
        assert!(!workspace.join("agw-configuration.json").exists());
    });
}

#[test]
fn unreadable_input_file_exits_one() {
    with_temp_workspace(|workspace| {
        // A directory passes the existence check but cannot be read as a file.
        let dir_as_input = workspace.join("input.json");
        fs::create_dir_all(&dir_as_input).expect("create directory in place of input");

        let (code, stdout, _stderr) = run_cli(workspace, &["-f", dir_as_input.to_str().unwrap()]);

        assert_eq!(code, 1, "unreadable input should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[=] Info: File exists at the given path"),
            "the existence check should pass first, got:\n{stdout}"
        );
        assert!(
            stdout.contains("[-] Error: Failed to read input file"),
            "stdout should surface the read failure, got:\n{stdout}"
        );
        assert!(!workspace.join("agw-configuration.json").exists());
    });
}

#[test]
fn missing_required_key_exits_one_without_output() {
    with_temp_workspace(|workspace| {
        let mut input = full_input();
        input
            .as_object_mut()
            .expect("input literal is an object")
            .remove("resource_group");
        let path = write_input(workspace, &input);

        let (code, stdout, _stderr) = run_cli(workspace, &["-f", path.to_str().unwrap()]);

        assert_eq!(code, 1, "missing key should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error: You didn't provide 'resource_group' inside the json"),
            "stdout should name the missing key, got:\n{stdout}"
        );
        assert!(
            !workspace.join("agw-configuration.json").exists(),
            "no output file may be written on a validation failure"
        );
    });
}

#[test]
fn non_object_input_exits_one() {
    with_temp_workspace(|workspace| {
        let path = workspace.join("input.json");
        fs::write(&path, "[1, 2, 3]").expect("write input file");

        let (code, stdout, _stderr) = run_cli(workspace, &["-f", path.to_str().unwrap()]);

        assert_eq!(code, 1, "non-object input should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error:"),
            "stdout should carry the fatal message, got:\n{stdout}"
        );
    });
}

#[cfg(unix)]
#[test]
fn full_run_writes_the_merged_configuration() {
    with_temp_workspace(|workspace| {
        let gateway_id = "/subscriptions/x/resourceGroups/rg1/providers/Microsoft.Network/applicationGateways/gw1";
        let bin_dir = install_stub_az(workspace, &format!("echo \"{gateway_id}\""));
        let input = write_input(workspace, &full_input());

        let (code, stdout, stderr) = run_cli_with_path(
            workspace,
            &["--file", input.to_str().unwrap()],
            Some(&bin_dir),
        );

        assert_eq!(code, 0, "run should succeed, stdout:\n{stdout}\nstderr:\n{stderr}");
        assert!(stdout.contains("[=] CONFIGURATION FOR BACKEND POOL"));
        assert!(stdout.contains("[=] CONFIGURATION FOR PATH RULE"));
        assert!(
            stdout.contains("Merged JSON has been written to"),
            "stdout should announce the written file, got:\n{stdout}"
        );
        assert!(
            stderr.contains("##vso[task.setvariable variable=name;isOutput=true;]app1"),
            "stderr should carry the pipeline variables, got:\n{stderr}"
        );

        let raw = fs::read_to_string(workspace.join("agw-configuration.json"))
            .expect("read merged output");
        assert!(raw.contains("\n    \"probes\""), "expected 4-space indent:\n{raw}");

        let value: Value = serde_json::from_str(&raw).expect("parse merged output");
        assert_eq!(value["probes"][0]["id"], format!("{gateway_id}/probes/app1HP"));
        assert_eq!(
            value["backendAddressPools"][0]["properties"]["backendAddresses"],
            json!([{"fqdn": "backend.contoso.com"}])
        );
        assert_eq!(
            value["requestRoutingRules"][0]["id"],
            format!("{gateway_id}/requestRoutingRulesapp1HttpsRule")
        );
    });
}

#[cfg(unix)]
#[test]
fn az_exit_code_is_passed_through() {
    with_temp_workspace(|workspace| {
        let bin_dir = install_stub_az(workspace, "echo 'gateway not found' >&2\nexit 3");
        let input = write_input(workspace, &full_input());

        let (code, stdout, _stderr) = run_cli_with_path(
            workspace,
            &["-f", input.to_str().unwrap()],
            Some(&bin_dir),
        );

        assert_eq!(code, 3, "az exit code should pass through, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error:") && stdout.contains("gateway not found"),
            "stdout should surface the az failure, got:\n{stdout}"
        );
        assert!(!workspace.join("agw-configuration.json").exists());
    });
}

#[cfg(unix)]
#[test]
fn missing_az_on_path_exits_one() {
    with_temp_workspace(|workspace| {
        let input = write_input(workspace, &full_input());

        let (code, stdout, _stderr) =
            run_cli_without_az(workspace, &["-f", input.to_str().unwrap()]);

        assert_eq!(code, 1, "unlaunchable az should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error: Failed to launch 'az'"),
            "stdout should name the program that could not start, got:\n{stdout}"
        );
        assert!(
            !workspace.join("agw-configuration.json").exists(),
            "no output file may be written when the lookup never starts"
        );
    });
}

#[cfg(unix)]
#[test]
fn quoted_lookup_output_is_unquoted() {
    with_temp_workspace(|workspace| {
        let gateway_id = "/subscriptions/x/resourceGroups/rg1/providers/Microsoft.Network/applicationGateways/gw1";
        let bin_dir = install_stub_az(workspace, &format!("echo '\"{gateway_id}\"'"));
        let input = write_input(workspace, &full_input());

        let (code, stdout, _stderr) = run_cli_with_path(
            workspace,
            &["-f", input.to_str().unwrap()],
            Some(&bin_dir),
        );

        assert_eq!(code, 0, "quoted lookup output should parse, stdout:\n{stdout}");
        let value: Value = serde_json::from_str(
            &fs::read_to_string(workspace.join("agw-configuration.json")).expect("read output"),
        )
        .expect("parse merged output");
        assert_eq!(value["probes"][0]["id"], format!("{gateway_id}/probes/app1HP"));
    });
}

#[cfg(unix)]
#[test]
fn unwritable_working_directory_exits_one() {
    use std::os::unix::fs::PermissionsExt;

    with_temp_workspace(|workspace| {
        let gateway_id = "/subscriptions/x/resourceGroups/rg1/providers/Microsoft.Network/applicationGateways/gw1";
        let bin_dir = install_stub_az(workspace, &format!("echo \"{gateway_id}\""));
        let input = write_input(workspace, &full_input());

        let locked = workspace.join("locked");
        fs::create_dir_all(&locked).expect("create locked dir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555))
            .expect("drop write permission");
        // Root writes into 0o555 directories regardless, leaving no failure
        // to observe; skip in that case.
        if fs::write(locked.join("write-check"), "").is_ok() {
            return;
        }

        let (code, stdout, _stderr) =
            run_cli_with_path(&locked, &["-f", input.to_str().unwrap()], Some(&bin_dir));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
            .expect("restore write permission");

        assert_eq!(code, 1, "unwritable cwd should exit 1, stdout:\n{stdout}");
        assert!(
            stdout.contains("[-] Error: Failed to write"),
            "stdout should surface the write failure, got:\n{stdout}"
        );
        assert!(!locked.join("agw-configuration.json").exists());
    });
}
