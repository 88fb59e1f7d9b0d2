fn main() {
    // --- Windows resource embedding (version info) ---
    // Only for the launcher binary itself, so test harnesses and doc builds
    // don't pick up a second VERSION resource.
    #[cfg(target_os = "windows")]
    if std::env::var("CARGO_BIN_NAME").is_ok() {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "Binary Quest Launcher");
        res.set("ProductName", "Binary Quest");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().expect("failed to compile Windows resources");
    }
}
