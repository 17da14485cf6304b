//! Color tables: CSS named colors and the utility-class palette.

use pictor_types::Color;

const fn hex(value: u32) -> Color {
    Color::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Looks up a CSS named color (case-insensitive).
pub fn css_named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => hex(0x000000),
        "white" => hex(0xffffff),
        "red" => hex(0xff0000),
        "green" => hex(0x008000),
        "lime" => hex(0x00ff00),
        "blue" => hex(0x0000ff),
        "yellow" => hex(0xffff00),
        "cyan" | "aqua" => hex(0x00ffff),
        "magenta" | "fuchsia" => hex(0xff00ff),
        "gray" | "grey" => hex(0x808080),
        "silver" => hex(0xc0c0c0),
        "maroon" => hex(0x800000),
        "olive" => hex(0x808000),
        "purple" => hex(0x800080),
        "teal" => hex(0x008080),
        "navy" => hex(0x000080),
        "orange" => hex(0xffa500),
        "pink" => hex(0xffc0cb),
        "brown" => hex(0xa52a2a),
        "gold" => hex(0xffd700),
        "indigo" => hex(0x4b0082),
        "violet" => hex(0xee82ee),
        "coral" => hex(0xff7f50),
        "salmon" => hex(0xfa8072),
        "tomato" => hex(0xff6347),
        "crimson" => hex(0xdc143c),
        "orchid" => hex(0xda70d6),
        "plum" => hex(0xdda0dd),
        "khaki" => hex(0xf0e68c),
        "beige" => hex(0xf5f5dc),
        "ivory" => hex(0xfffff0),
        "lavender" => hex(0xe6e6fa),
        "turquoise" => hex(0x40e0d0),
        "skyblue" => hex(0x87ceeb),
        "steelblue" => hex(0x4682b4),
        "royalblue" => hex(0x4169e1),
        "slategray" | "slategrey" => hex(0x708090),
        "darkgray" | "darkgrey" => hex(0xa9a9a9),
        "lightgray" | "lightgrey" => hex(0xd3d3d3),
        "dimgray" | "dimgrey" => hex(0x696969),
        "whitesmoke" => hex(0xf5f5f5),
        "gainsboro" => hex(0xdcdcdc),
        "darkred" => hex(0x8b0000),
        "darkgreen" => hex(0x006400),
        "darkblue" => hex(0x00008b),
        "lightblue" => hex(0xadd8e6),
        "lightgreen" => hex(0x90ee90),
        "forestgreen" => hex(0x228b22),
        "seagreen" => hex(0x2e8b57),
        "chocolate" => hex(0xd2691e),
        "tan" => hex(0xd2b48c),
        "rebeccapurple" => hex(0x663399),
        _ => return None,
    };
    Some(color)
}

const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

fn family(name: &str) -> Option<[u32; 11]> {
    let table = match name {
        "slate" => [
            0xf8fafc, 0xf1f5f9, 0xe2e8f0, 0xcbd5e1, 0x94a3b8, 0x64748b, 0x475569, 0x334155,
            0x1e293b, 0x0f172a, 0x020617,
        ],
        "gray" => [
            0xf9fafb, 0xf3f4f6, 0xe5e7eb, 0xd1d5db, 0x9ca3af, 0x6b7280, 0x4b5563, 0x374151,
            0x1f2937, 0x111827, 0x030712,
        ],
        "zinc" => [
            0xfafafa, 0xf4f4f5, 0xe4e4e7, 0xd4d4d8, 0xa1a1aa, 0x71717a, 0x52525b, 0x3f3f46,
            0x27272a, 0x18181b, 0x09090b,
        ],
        "neutral" => [
            0xfafafa, 0xf5f5f5, 0xe5e5e5, 0xd4d4d4, 0xa3a3a3, 0x737373, 0x525252, 0x404040,
            0x262626, 0x171717, 0x0a0a0a,
        ],
        "red" => [
            0xfef2f2, 0xfee2e2, 0xfecaca, 0xfca5a5, 0xf87171, 0xef4444, 0xdc2626, 0xb91c1c,
            0x991b1b, 0x7f1d1d, 0x450a0a,
        ],
        "orange" => [
            0xfff7ed, 0xffedd5, 0xfed7aa, 0xfdba74, 0xfb923c, 0xf97316, 0xea580c, 0xc2410c,
            0x9a3412, 0x7c2d12, 0x431407,
        ],
        "amber" => [
            0xfffbeb, 0xfef3c7, 0xfde68a, 0xfcd34d, 0xfbbf24, 0xf59e0b, 0xd97706, 0xb45309,
            0x92400e, 0x78350f, 0x451a03,
        ],
        "yellow" => [
            0xfefce8, 0xfef9c3, 0xfef08a, 0xfde047, 0xfacc15, 0xeab308, 0xca8a04, 0xa16207,
            0x854d0e, 0x713f12, 0x422006,
        ],
        "green" => [
            0xf0fdf4, 0xdcfce7, 0xbbf7d0, 0x86efac, 0x4ade80, 0x22c55e, 0x16a34a, 0x15803d,
            0x166534, 0x14532d, 0x052e16,
        ],
        "emerald" => [
            0xecfdf5, 0xd1fae5, 0xa7f3d0, 0x6ee7b7, 0x34d399, 0x10b981, 0x059669, 0x047857,
            0x065f46, 0x064e3b, 0x022c22,
        ],
        "teal" => [
            0xf0fdfa, 0xccfbf1, 0x99f6e4, 0x5eead4, 0x2dd4bf, 0x14b8a6, 0x0d9488, 0x0f766e,
            0x115e59, 0x134e4a, 0x042f2e,
        ],
        "cyan" => [
            0xecfeff, 0xcffafe, 0xa5f3fc, 0x67e8f9, 0x22d3ee, 0x06b6d4, 0x0891b2, 0x0e7490,
            0x155e75, 0x164e63, 0x083344,
        ],
        "sky" => [
            0xf0f9ff, 0xe0f2fe, 0xbae6fd, 0x7dd3fc, 0x38bdf8, 0x0ea5e9, 0x0284c7, 0x0369a1,
            0x075985, 0x0c4a6e, 0x082f49,
        ],
        "blue" => [
            0xeff6ff, 0xdbeafe, 0xbfdbfe, 0x93c5fd, 0x60a5fa, 0x3b82f6, 0x2563eb, 0x1d4ed8,
            0x1e40af, 0x1e3a8a, 0x172554,
        ],
        "indigo" => [
            0xeef2ff, 0xe0e7ff, 0xc7d2fe, 0xa5b4fc, 0x818cf8, 0x6366f1, 0x4f46e5, 0x4338ca,
            0x3730a3, 0x312e81, 0x1e1b4b,
        ],
        "violet" => [
            0xf5f3ff, 0xede9fe, 0xddd6fe, 0xc4b5fd, 0xa78bfa, 0x8b5cf6, 0x7c3aed, 0x6d28d9,
            0x5b21b6, 0x4c1d95, 0x2e1065,
        ],
        "purple" => [
            0xfaf5ff, 0xf3e8ff, 0xe9d5ff, 0xd8b4fe, 0xc084fc, 0xa855f7, 0x9333ea, 0x7e22ce,
            0x6b21a8, 0x581c87, 0x3b0764,
        ],
        "pink" => [
            0xfdf2f8, 0xfce7f3, 0xfbcfe8, 0xf9a8d4, 0xf472b6, 0xec4899, 0xdb2777, 0xbe185d,
            0x9d174d, 0x831843, 0x500724,
        ],
        "rose" => [
            0xfff1f2, 0xffe4e6, 0xfecdd3, 0xfda4af, 0xfb7185, 0xf43f5e, 0xe11d48, 0xbe123c,
            0x9f1239, 0x881337, 0x4c0519,
        ],
        _ => return None,
    };
    Some(table)
}

/// Resolves a palette token such as `blue-500`, `white` or `transparent`.
pub fn palette_color(token: &str) -> Option<Color> {
    match token {
        "transparent" => return Some(Color::TRANSPARENT),
        "black" => return Some(Color::BLACK),
        "white" => return Some(Color::WHITE),
        _ => {}
    }
    let (name, shade) = token.rsplit_once('-')?;
    let shade: u16 = shade.parse().ok()?;
    let index = SHADES.iter().position(|s| *s == shade)?;
    family(name).map(|table| hex(table[index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lookup() {
        assert_eq!(palette_color("blue-500"), Some(Color::rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(palette_color("gray-950"), Some(Color::rgb(0x03, 0x07, 0x12)));
        assert_eq!(palette_color("white"), Some(Color::WHITE));
        assert_eq!(palette_color("blue-550"), None);
        assert_eq!(palette_color("mauve-500"), None);
    }

    #[test]
    fn named_lookup_is_case_insensitive() {
        assert_eq!(css_named_color("Navy"), Some(Color::rgb(0, 0, 128)));
        assert_eq!(css_named_color("nope"), None);
    }
}
