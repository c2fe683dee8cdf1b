#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const ORIGINAL_BYTES: &[u8] = b"original image bytes";
pub const CRUSHED_BYTES: &[u8] = b"crushed";

/// a.png, b.JPG, c.txt, anim.gif, sub/d.png
pub fn create_image_tree(root: &Path) -> Vec<PathBuf> {
    let files = vec![
        root.join("a.png"),
        root.join("b.JPG"),
        root.join("c.txt"),
        root.join("anim.gif"),
        root.join("sub").join("d.png"),
    ];

    fs::create_dir_all(root.join("sub")).unwrap();
    for file in &files {
        fs::write(file, ORIGINAL_BYTES).unwrap();
    }

    files
}

/// Writes stand-in `pngcrush` and `jpegtran` scripts into `dir` and returns
/// a PATH value that finds them first.
///
/// Both scripts write `CRUSHED_BYTES` as their output. Run bare, the
/// pngcrush stand-in prints a banner like the real tool.
#[cfg(unix)]
pub fn install_fake_tools(dir: &Path) -> String {
    let pngcrush = "#!/bin/sh\n\
        if [ $# -eq 0 ]; then echo 'pngcrush 1.8.13'; exit 0; fi\n\
        printf crushed > \"$6\"\n";
    let jpegtran = "#!/bin/sh\nprintf crushed\n";
    install_scripts(dir, pngcrush, jpegtran)
}

/// Stand-ins that print nothing and fail, as a shell does for a missing tool.
#[cfg(unix)]
pub fn install_broken_tools(dir: &Path) -> String {
    let script = "#!/bin/sh\nexit 127\n";
    install_scripts(dir, script, script)
}

#[cfg(unix)]
fn install_scripts(dir: &Path, pngcrush: &str, jpegtran: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    for (name, script) in [("pngcrush", pngcrush), ("jpegtran", jpegtran)] {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    format!("{}:/usr/bin:/bin", dir.display())
}
