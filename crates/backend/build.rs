use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // OUT_DIR is typically target/<profile>/build/backend-xxx/out;
    // the binary lands two levels up in target/<profile>.
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    let out_path = Path::new(&out_dir);
    let target_dir = match out_path.ancestors().find(|p| p.ends_with(&profile)) {
        Some(dir) => dir.to_path_buf(),
        None => return,
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    let dest_config = target_dir.join("config.toml");

    if source_config.exists() {
        let _ = fs::copy(&source_config, &dest_config);
    }
}
