use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let include_dir = crate_dir.join("include");
    if let Err(error) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {error}", include_dir.display());
        return;
    }

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("MTG_FFI_H".to_string()),
        ..Default::default()
    };

    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            bindings.write_to_file(include_dir.join("mtg_ffi.h"));
        }
        Err(error) => println!("cargo:warning=C header not generated: {error}"),
    }
}
