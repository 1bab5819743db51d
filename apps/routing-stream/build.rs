//! Build Script for Routing Stream
//!
//! Emits the `coverage` cfg and tracks the checked-in protobuf stubs.
//!
//! The Rust stubs for `routing.v1` live in `packages/schema-gen/rust/routing/v1/`
//! and are regenerated from `packages/proto/routing/v1/routing.proto` with
//! `buf generate`, so a normal build needs neither `buf` nor `protoc`.

use std::env;

fn main() {
    // Rerun build script if it changes
    println!("cargo:rerun-if-changed=build.rs");

    // Rerun if the generated stubs change
    println!("cargo:rerun-if-changed=../../packages/schema-gen/rust/routing/v1/");

    // Emit cfg for coverage detection
    if env::var("CARGO_LLVM_COV").is_ok()
        || env::var("LLVM_PROFILE_FILE").is_ok()
        || env::var("RUSTFLAGS")
            .map(|f| f.contains("instrument-coverage"))
            .unwrap_or(false)
    {
        println!("cargo:rustc-cfg=coverage");
    }
}
