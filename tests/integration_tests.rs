mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_crush_help() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.args(["crush", "--help"]);
    cmd.assert().success();
}

#[test]
fn test_batch_help() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.args(["batch", "--help"]);
    cmd.assert().success();
}

#[test]
fn test_crush_missing_args() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.arg("crush");
    cmd.assert().failure();
}

#[test]
fn test_batch_missing_args() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.arg("batch");
    cmd.assert().failure();
}

#[test]
fn test_crush_dry_run_png_in_place() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.args(["crush", "logo.png", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "pngcrush -rem alla -brute -reduce logo.png logo.png_tmp",
        ));
}

#[test]
fn test_crush_dry_run_with_type_override() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.args(["crush", "in.dat", "out.dat", "--type", "jpg", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "jpegtran -copy none -optimize in.dat > out.dat",
        ));
}

#[test]
fn test_crush_gif_is_left_untouched() {
    let temp = assert_fs::TempDir::new().unwrap();
    let gif = temp.child("anim.gif");
    gif.write_binary(common::ORIGINAL_BYTES).unwrap();

    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.arg("crush").arg(gif.path());
    cmd.assert().success();

    gif.assert(common::ORIGINAL_BYTES);
    temp.child("anim.gif_tmp").assert(predicate::path::missing());
}

#[test]
fn test_batch_nonexistent_directory() {
    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.args(["batch", "/nonexistent/img-crush-dir"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn test_batch_empty_directory() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("img-crush").unwrap();
    cmd.arg("batch").arg(temp.path());
    cmd.assert().success();
}

#[cfg(unix)]
mod with_tools {
    use super::common;
    use assert_cmd::Command;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn test_check_finds_pngcrush() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_fake_tools(tools.path());

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("check");
        cmd.assert().success();
    }

    #[test]
    fn test_check_reports_missing_tool() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_broken_tools(tools.path());

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("check");
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("pngcrush"));
    }

    #[test]
    fn test_crush_png_in_place() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_fake_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        let png = temp.child("logo.png");
        png.write_binary(common::ORIGINAL_BYTES).unwrap();

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("crush").arg(png.path());
        cmd.assert().success();

        png.assert(common::CRUSHED_BYTES);
        temp.child("logo.png_tmp").assert(predicate::path::missing());
    }

    #[test]
    fn test_crush_jpg_to_destination() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_fake_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        let jpg = temp.child("photo.jpg");
        jpg.write_binary(common::ORIGINAL_BYTES).unwrap();
        let out = temp.child("photo-small.jpg");

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path)
            .arg("crush")
            .arg(jpg.path())
            .arg(out.path());
        cmd.assert().success();

        jpg.assert(common::ORIGINAL_BYTES);
        out.assert(common::CRUSHED_BYTES);
    }

    #[test]
    fn test_crush_without_tools_fails_before_touching_files() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_broken_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        let png = temp.child("logo.png");
        png.write_binary(common::ORIGINAL_BYTES).unwrap();

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("crush").arg(png.path());
        cmd.assert().failure();

        png.assert(common::ORIGINAL_BYTES);
    }

    #[test]
    fn test_batch_recursive_crushes_matching_files() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_fake_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        common::create_image_tree(temp.path());

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path)
            .arg("batch")
            .arg(temp.path())
            .arg("--recursive");
        cmd.assert().success();

        temp.child("a.png").assert(common::CRUSHED_BYTES);
        temp.child("b.JPG").assert(common::CRUSHED_BYTES);
        temp.child("sub/d.png").assert(common::CRUSHED_BYTES);
        temp.child("c.txt").assert(common::ORIGINAL_BYTES);
        temp.child("anim.gif").assert(common::ORIGINAL_BYTES);
    }

    #[test]
    fn test_batch_non_recursive_skips_subdirectories() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_fake_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        common::create_image_tree(temp.path());

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("batch").arg(temp.path());
        cmd.assert().success();

        temp.child("a.png").assert(common::CRUSHED_BYTES);
        temp.child("sub/d.png").assert(common::ORIGINAL_BYTES);
    }

    #[test]
    fn test_batch_reports_failures() {
        let tools = assert_fs::TempDir::new().unwrap();
        let path = common::install_broken_tools(tools.path());
        let temp = assert_fs::TempDir::new().unwrap();
        common::create_image_tree(temp.path());

        let mut cmd = Command::cargo_bin("img-crush").unwrap();
        cmd.env("PATH", path).arg("batch").arg(temp.path());
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("2 of 2 files failed"));

        temp.child("a.png").assert(common::ORIGINAL_BYTES);
        temp.child("b.JPG").assert(common::ORIGINAL_BYTES);
    }
}
