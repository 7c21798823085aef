// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Platform Abstraction Module
//!
//! Platform-specific abstractions for operating system functionality.
//!
//! Following hexagonal architecture principles:
//! - **Interface**: `Platform` trait defines the contract
//! - **Implementations**: `UnixPlatform` (POSIX), `WindowsPlatform`
//! - **Selection**: compile-time platform selection via `#[cfg]`
//!
//! The bootstrap crate sits outside the domain/engine layers, so it can
//! access platform-specific APIs directly rather than hiding them behind a
//! port defined in the domain.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixPlatform;

#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Platform-specific errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not supported on this platform: {0}")]
    NotSupported(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Platform error: {0}")]
    Other(String),
}

/// Platform abstraction trait for OS-specific operations the CLI entry
/// point needs before the composition root is built.
#[async_trait]
pub trait Platform: Send + Sync {
    /// System page size in bytes, for buffer sizing.
    fn page_size(&self) -> usize;

    /// Number of logical CPUs available to the process.
    fn cpu_count(&self) -> usize;

    /// Total physical memory in bytes.
    fn total_memory(&self) -> Result<u64, PlatformError>;

    /// Available (free) memory in bytes.
    fn available_memory(&self) -> Result<u64, PlatformError>;

    /// `"\n"` on Unix, `"\r\n"` on Windows.
    fn line_separator(&self) -> &'static str;

    /// `PATH` entry separator: `:` on Unix, `;` on Windows.
    fn path_separator(&self) -> char;

    /// Platform identifier: "linux", "macos", "windows", etc.
    fn platform_name(&self) -> &'static str;

    /// System temp directory.
    fn temp_dir(&self) -> PathBuf;

    /// Whether the process is running with elevated privileges.
    fn is_elevated(&self) -> bool;

    /// Sets Unix permission bits; no-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), PlatformError>;

    /// Whether `path` is executable.
    fn is_executable(&self, path: &Path) -> bool;

    /// Flushes a file's buffers to disk.
    async fn sync_file(&self, file: &tokio::fs::File) -> Result<(), PlatformError>;
}

#[cfg(unix)]
type PlatformImpl = UnixPlatform;

#[cfg(windows)]
type PlatformImpl = WindowsPlatform;

/// Returns the platform implementation for the current OS, selected at
/// compile time.
pub fn create_platform() -> Box<dyn Platform> {
    Box::new(PlatformImpl::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_platform_reports_sane_values() {
        let platform = create_platform();
        assert!(platform.cpu_count() >= 1);
        let page_size = platform.page_size();
        assert!(page_size >= 512 && page_size <= 65536);
        assert!(!platform.platform_name().is_empty());
    }

    #[test]
    fn line_and_path_separators_match_the_current_os() {
        let platform = create_platform();

        #[cfg(unix)]
        {
            assert_eq!(platform.line_separator(), "\n");
            assert_eq!(platform.path_separator(), ':');
        }

        #[cfg(windows)]
        {
            assert_eq!(platform.line_separator(), "\r\n");
            assert_eq!(platform.path_separator(), ';');
        }
    }
}
