use std::{
    io::Write,
    process::{Command, Stdio},
};

fn play(script: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_track-builder"))
        .args(["--seed", "42"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("track-builder binary launches");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("script is written");

    let output = child.wait_with_output().expect("track-builder exits");
    assert!(output.status.success(), "track-builder exited with {:?}", output.status);
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn bare_board_run_derails_at_start() {
    let stdout = play("go\nrun\nquit\n");

    assert!(stdout.contains("Train departs on an incomplete track of 1 cells."));
    assert!(stdout.contains("The train derailed. Round lost."));
}

#[test]
fn unknown_commands_are_reported_and_ignored() {
    let stdout = play("jump\nhelp\n");

    assert!(stdout.contains("unknown command `jump`"));
    assert!(stdout.contains("place <col> <row>"));
}

#[test]
fn same_seed_draws_the_same_board() {
    assert_eq!(play("quit\n"), play("quit\n"));
}
