// Drives the compiled binary through a PTY, covering the real event loop and
// crossterm input handling.
//
// Unix-only and ignored by default; run with
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn test_custom_text_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("minitype");
    let cmd = format!("{} --text hi", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // "hi" plus the space that submits the last word
    p.send("hi ")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC
    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn test_words_session_can_be_restarted_then_quit() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("minitype");
    let cmd = format!("{} --mode words --config 10", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("abc")?;
    p.send("\t")?; // restart
    std::thread::sleep(Duration::from_millis(100));

    p.send("\x03")?; // Ctrl+C
    p.expect(Eof)?;
    Ok(())
}
