//! Workspace maintenance and developer workflow commands (`cargo xtask`).
//!
//! The `xtask` binary wraps the verification and wasm check commands so the repository can expose
//! stable entrypoints through Cargo aliases.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode, Stdio};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const WEB_CRATE: &str = "platform_host_web";

fn main() -> ExitCode {
    let root = workspace_root();
    let mut args = env::args().skip(1);

    let Some(cmd) = args.next() else {
        print_usage();
        return ExitCode::from(2);
    };

    let rest: Vec<String> = args.collect();

    let result = match cmd.as_str() {
        "verify" => verify(&root, rest),
        "check-web" => check_web(&root),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown xtask command: {other}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_usage() {
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
           verify [fast|full]  fast: fmt check + tests; full: adds clippy and the wasm check\n\
           check-web           Compile the browser adapters for wasm32 (if the target is installed)\n"
    );
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VerifyMode {
    Fast,
    Full,
}

fn parse_verify_mode(args: &[String]) -> Result<VerifyMode, String> {
    match args.first().map(String::as_str).unwrap_or("full") {
        "fast" => Ok(VerifyMode::Fast),
        "full" => Ok(VerifyMode::Full),
        other => Err(format!(
            "invalid verify mode `{other}` (expected `fast` or `full`)"
        )),
    }
}

fn verify_steps(mode: VerifyMode) -> Vec<Vec<&'static str>> {
    let mut steps = vec![
        vec!["fmt", "--all", "--", "--check"],
        vec!["test", "--workspace"],
    ];
    if mode == VerifyMode::Full {
        steps.push(vec![
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ]);
    }
    steps
}

fn verify(root: &Path, args: Vec<String>) -> Result<(), String> {
    let mode = parse_verify_mode(&args)?;
    for step in verify_steps(mode) {
        run(root, "cargo", step)?;
    }
    if mode == VerifyMode::Full {
        check_web(root)?;
    }
    Ok(())
}

fn check_web(root: &Path) -> Result<(), String> {
    if !wasm_target_installed() {
        eprintln!(
            "warn: {WASM_TARGET} target not installed; skipping wasm check (run `rustup target add {WASM_TARGET}`)"
        );
        return Ok(());
    }
    run(
        root,
        "cargo",
        vec!["check", "-p", WEB_CRATE, "--target", WASM_TARGET],
    )
}

fn wasm_target_installed() -> bool {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
    else {
        return false;
    };

    if !output.status.success() {
        return false;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .any(|line| line.trim() == WASM_TARGET)
}

fn run(root: &Path, program: &str, args: Vec<&str>) -> Result<(), String> {
    let owned = args.into_iter().map(ToString::to_string).collect();
    run_owned(root, program, owned)
}

fn run_owned(root: &Path, program: &str, args: Vec<String>) -> Result<(), String> {
    print_command(program, &args);
    let status = Command::new(program)
        .current_dir(root)
        .args(&args)
        .status()
        .map_err(|err| format!("failed to start `{program}`: {err}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("`{program}` exited with status {status}"))
    }
}

fn print_command(program: &str, args: &[String]) {
    if args.is_empty() {
        println!("+ {program}");
        return;
    }

    println!("+ {program} {}", args.join(" "));
}
