//! Fixtures shared by the unit tests.

pub const REGULAR_FONT: &str = "DejaVuSans.ttf";
pub const BOLD_FONT: &str = "DejaVuSans-Bold.ttf";

/// Reads a bundled font from `assets/fonts`, whichever directory the test
/// runner started in.
pub fn font_bytes(name: &str) -> Vec<u8> {
    ["assets/fonts", "../assets/fonts", "../../assets/fonts", "../../../assets/fonts"]
        .iter()
        .map(|dir| std::path::Path::new(dir).join(name))
        .find_map(|path| std::fs::read(path).ok())
        .unwrap_or_else(|| panic!("test font {} not found under assets/fonts", name))
}
