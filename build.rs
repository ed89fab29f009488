use std::env::var_os;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (library and tests) link normally.
    if var_os("CARGO_FEATURE_FIRMWARE").is_none() {
        return;
    }

    // cortex-m-rt memory layout, then defmt's symbol table.
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
