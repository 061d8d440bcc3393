// Shared build script utilities for README-to-rustdoc transformation.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Turn a crate's README.md into rustdoc front matter.
///
/// Transformations:
/// 1. Strip the 'src/' prefix from links so rustdoc resolves modules
/// 2. Strip the '.rs' extension so links point at modules, not files
/// 3. Rewrite relative workspace-README links to the repo URL
///
/// The repo URL comes from the workspace Cargo.toml, keeping the README
/// itself URL-agnostic. The result lands in OUT_DIR/README_GENERATED.md
/// for `#![doc = include_str!(...)]`.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme_path = Path::new(crate_dir).join("README.md");
    let Ok(content) = fs::read_to_string(&readme_path) else {
        return; // No README, nothing to process
    };

    let repo_url = workspace_repo_url(crate_dir);

    let mut rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");
    if let Some(url) = &repo_url {
        rustdoc_content = rustdoc_content.replace("](../../README.md", &format!("]({url}"));
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).unwrap();
}

/// Extract the repository URL from the workspace Cargo.toml.
/// Returns None if the file or the field is missing.
fn workspace_repo_url(crate_dir: &str) -> Option<String> {
    let workspace_toml = Path::new(crate_dir)
        .parent()? // crates/
        .parent()? // workspace root
        .join("Cargo.toml");

    let content = fs::read_to_string(workspace_toml).ok()?;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("repository")
            && line.contains('=')
            && let Some(start) = line.find('"')
            && let Some(end) = line.rfind('"')
            && start < end
        {
            return Some(line[start + 1..end].to_string());
        }
    }
    None
}
