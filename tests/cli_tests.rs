//! Integration tests for the command-line entry point
//!
//! These run the compiled binary, so they only exercise paths that do not
//! need a listening socket.

use std::process::Command;

fn bookshelf() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bookshelf"))
}

#[test]
fn test_print_schema_writes_sdl_and_exits() {
    let output = bookshelf()
        .arg("--print-schema")
        .env("DATABASE_PATH", "/nonexistent/dir/never-created.db")
        .output()
        .expect("failed to run bookshelf");

    assert!(output.status.success());
    let sdl = String::from_utf8(output.stdout).unwrap();
    assert!(sdl.contains("type RootQueryType"));
    assert!(sdl.contains("type Mutation"));
    assert!(sdl.contains("type Author"));
    assert!(sdl.contains("type Book"));
    assert!(!std::path::Path::new("/nonexistent/dir/never-created.db").exists());
}

#[test]
fn test_invalid_port_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let output = bookshelf()
        .env("PORT", "not-a-port")
        .env("DATABASE_PATH", dir.path().join("shelf.db"))
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run bookshelf");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid PORT"));
}
