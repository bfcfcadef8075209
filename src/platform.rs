use std::path::PathBuf;

/// Per-OS lookups the shell needs. Selected once in `main` and injected, so
/// nothing downstream branches on the OS name.
pub trait PlatformServices {
    fn name(&self) -> &'static str;

    /// Default save location: the user's desktop folder, falling back to the
    /// home directory when no desktop can be resolved.
    fn default_save_dir(&self) -> PathBuf;
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub struct WindowsServices;

impl PlatformServices for WindowsServices {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn default_save_dir(&self) -> PathBuf {
        let home = home_dir();
        // Localized desktop folder names; Windows installs do not always
        // expose the desktop through the known-folder API.
        for name in ["Desktop", "Pulpit", "Bureau", "Escritorio"] {
            let candidate = home.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
        home
    }
}

pub struct MacServices;

impl PlatformServices for MacServices {
    fn name(&self) -> &'static str {
        "macOS"
    }

    fn default_save_dir(&self) -> PathBuf {
        home_dir().join("Desktop")
    }
}

pub struct LinuxServices;

impl PlatformServices for LinuxServices {
    fn name(&self) -> &'static str {
        "Linux"
    }

    fn default_save_dir(&self) -> PathBuf {
        if let Some(desktop) = dirs::desktop_dir() {
            return desktop;
        }
        let fallback = home_dir().join("Desktop");
        if fallback.exists() { fallback } else { home_dir() }
    }
}

pub fn detect() -> Box<dyn PlatformServices> {
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsServices)
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(MacServices)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Box::new(LinuxServices)
    }
}
