use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Copy the fallback image next to the built binary so the default
    // relative path resolves against the executable's directory
    let out_dir = env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);

    // Navigate up: out -> file-to-image-xxx -> build -> <profile>
    if let Some(profile_dir) = out_path.ancestors().nth(3) {
        let src = Path::new("assets").join("unknown_file.png");
        let dst_dir = profile_dir.join("assets");
        let dst = dst_dir.join("unknown_file.png");

        println!("cargo:rerun-if-changed=assets/unknown_file.png");
        if src.exists() {
            if let Err(e) = fs::create_dir_all(&dst_dir).and_then(|_| fs::copy(&src, &dst)) {
                println!("cargo:warning=Failed to copy {}: {}", src.display(), e);
            }
        }
    }
}
