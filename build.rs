//! Build script for track-sorter: places the board's `memory.x` and linker scripts.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let target = env::var("TARGET").expect("TARGET is set by cargo");

    let memory_file = if target.starts_with("thumbv8m") {
        // Pico 2 (RP2350, ARM cores)
        "memory-pico2.x"
    } else if target.starts_with("thumbv6m") {
        // Pico 1 / Pico 1W (RP2040)
        "memory-pico1w.x"
    } else {
        // Host builds link nothing extra.
        return;
    };

    let memory_x =
        fs::read_to_string(memory_file).unwrap_or_else(|_| panic!("Failed to read {memory_file}"));
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_file}");

    // Device binaries only; the library itself is linked by them.
    println!("cargo:rustc-link-arg-examples=--nmagic");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");
    println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
}
