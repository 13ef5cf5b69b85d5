#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod config;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod error;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod follower;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod logging;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod motion;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod reveal;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod shortcuts;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod theme;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod typewriter;

#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod handlers;
#[cfg(target_arch = "wasm32")]
mod raf;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
