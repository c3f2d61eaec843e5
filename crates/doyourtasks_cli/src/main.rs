//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `doyourtasks_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("doyourtasks_core ping={}", doyourtasks_core::ping());
    println!(
        "doyourtasks_core version={}",
        doyourtasks_core::core_version()
    );
}
