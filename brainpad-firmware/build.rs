//! Linker setup for the Cortex-M target
//!
//! `memory.x` comes from embassy-stm32's `memory-x` feature; this only
//! passes the cortex-m-rt and defmt linker scripts.

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if std::env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
