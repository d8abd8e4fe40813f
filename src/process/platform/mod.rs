/*!
 * Platform Selection
 * One process model per target, chosen at build time
 */

#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
mod unix;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod windows;

mod fallback;

pub use fallback::FallbackPlatform;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::LinuxPlatform;
#[cfg(target_os = "macos")]
pub use macos::MacosPlatform;
#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Process model for the target being built
#[cfg(any(target_os = "linux", target_os = "android"))]
pub type NativePlatform = LinuxPlatform;

/// Process model for the target being built
#[cfg(target_os = "macos")]
pub type NativePlatform = MacosPlatform;

/// Process model for the target being built
#[cfg(windows)]
pub type NativePlatform = WindowsPlatform;

/// Process model for the target being built
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    windows
)))]
pub type NativePlatform = FallbackPlatform;

/// The native process model with default settings
pub fn native() -> NativePlatform {
    NativePlatform::default()
}
