use std::fs;
use std::path::Path;

fn main() {
    // Askama templates are read at compile time, but without explicit cargo
    // hints it's easy to end up with a stale binary after editing only HTML.
    let Ok(entries) = fs::read_dir(Path::new("templates")) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("html") {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
