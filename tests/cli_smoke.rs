use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_dxpass")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "dxpass.exe" } else { "dxpass" });
            p
        })
}

#[test]
fn cli_render_help_succeeds() {
    let out = std::process::Command::new(exe())
        .args(["render", "--help"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let help = String::from_utf8_lossy(&out.stdout);
    assert!(help.contains("--chara"));
    assert!(help.contains("--qr-code"));
}

#[test]
fn cli_render_fails_without_resources() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["render", "-c", "1", "-b", "1", "--assets"])
        .arg(dir.join("no-such-resources"))
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}

#[test]
fn cli_accepts_capitalized_pass_level_and_icons() {
    let status = std::process::Command::new(exe())
        .args(["render", "-c", "1", "-b", "1", "-l", "Gold", "-i", "LEVEL", "--assets"])
        .arg(PathBuf::from("target").join("cli_smoke").join("no-such-resources"))
        .status()
        .unwrap();

    // Parsing succeeds; the run then fails on the missing font, not on usage (exit code 2).
    assert_eq!(status.code(), Some(1));
}

#[test]
fn cli_rejects_unknown_pass_level() {
    let status = std::process::Command::new(exe())
        .args(["render", "-c", "1", "-b", "1", "-l", "diamond"])
        .status()
        .unwrap();

    assert!(!status.success());
}
