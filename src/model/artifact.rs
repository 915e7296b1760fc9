use super::color::Rgb;
use super::mapping::AnimationFrame;

pub const ENTRIES_PER_LINE: usize = 12;

/// A converted sprite, ready to be rendered as a C/C++ header.
#[derive(Clone, Debug)]
pub struct OutputArtifact {
    /// Sanitized identifier, e.g. `Agumon_Walk_0`.
    pub symbol: String,
    /// File name of the PNG this was converted from.
    pub source_name: String,
    /// Set by the mapped pipeline only.
    pub animation: Option<AnimationFrame>,
    pub width: u32,
    pub height: u32,
    pub key_color: Rgb,
    pub sentinel: u16,
    pub pixels: Vec<u16>,
}

impl OutputArtifact {
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.symbol, extension)
    }

    pub fn define_prefix(&self) -> String {
        self.symbol.to_ascii_uppercase()
    }

    pub fn data_name(&self) -> String {
        format!("{}_data", self.symbol)
    }

    pub fn render(&self) -> String {
        let prefix = self.define_prefix();
        let mut out = String::with_capacity(256 + self.pixels.len() * 8);

        out.push_str("#pragma once\n\n");
        out.push_str("#include <cstdint>\n\n");
        out.push_str(&format!("#define {}_WIDTH {}\n", prefix, self.width));
        out.push_str(&format!("#define {}_HEIGHT {}\n\n", prefix, self.height));

        out.push_str(&format!(
            "// RGB565 format, Converted from {}\n",
            self.source_name
        ));
        if let Some(animation) = &self.animation {
            out.push_str(&format!(
                "// Action: {}, Frame Index: {}\n",
                animation.action, animation.index
            ));
        }
        out.push_str(&format!(
            "// Color key 0x{:04X} (#{}) marks transparent pixels\n",
            self.sentinel,
            self.key_color.to_string().to_ascii_uppercase()
        ));

        out.push_str(&format!(
            "const uint16_t {}[{}] = {{\n",
            self.data_name(),
            self.pixels.len()
        ));
        out.push_str(&format_entries(&self.pixels));
        out.push_str("}; // End of array\n");

        out
    }
}

/// Array body: indented rows of `ENTRIES_PER_LINE` values, no trailing comma.
fn format_entries(pixels: &[u16]) -> String {
    if pixels.is_empty() {
        return String::new();
    }

    let rows: Vec<String> = pixels
        .chunks(ENTRIES_PER_LINE)
        .map(|row| {
            row.iter()
                .map(|value| format!("0x{:04X}", value))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect();

    format!("  {}\n", rows.join(",\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(width: u32, height: u32, animation: Option<AnimationFrame>) -> OutputArtifact {
        OutputArtifact {
            symbol: "Agumon_Walk_0".to_string(),
            source_name: "Agumon_2.png".to_string(),
            animation,
            width,
            height,
            key_color: Rgb::MAGENTA,
            sentinel: 0xF81F,
            pixels: (0..width * height).map(|i| i as u16).collect(),
        }
    }

    #[test]
    fn test_names() {
        let art = artifact(1, 1, None);
        assert_eq!(art.file_name("h"), "Agumon_Walk_0.h");
        assert_eq!(art.define_prefix(), "AGUMON_WALK_0");
        assert_eq!(art.data_name(), "Agumon_Walk_0_data");
    }

    #[test]
    fn test_render_small_mapped() {
        let art = artifact(2, 1, Some(AnimationFrame::new("Walk", 0)));
        let expected = "#pragma once\n\
            \n\
            #include <cstdint>\n\
            \n\
            #define AGUMON_WALK_0_WIDTH 2\n\
            #define AGUMON_WALK_0_HEIGHT 1\n\
            \n\
            // RGB565 format, Converted from Agumon_2.png\n\
            // Action: Walk, Frame Index: 0\n\
            // Color key 0xF81F (#FF00FF) marks transparent pixels\n\
            const uint16_t Agumon_Walk_0_data[2] = {\n  \
            0x0000, 0x0001\n\
            }; // End of array\n";
        assert_eq!(art.render(), expected);
    }

    #[test]
    fn test_render_generic_has_no_action_line() {
        let art = artifact(1, 1, None);
        assert!(!art.render().contains("// Action:"));
    }

    #[test]
    fn test_wraps_at_twelve_entries() {
        let art = artifact(13, 2, None);
        let rendered = art.render();

        let body: Vec<&str> = rendered
            .lines()
            .skip_while(|line| !line.starts_with("const uint16_t"))
            .skip(1)
            .take_while(|line| !line.starts_with("};"))
            .collect();

        assert_eq!(body.len(), 3);
        assert_eq!(body[0].matches("0x").count(), 12);
        assert_eq!(body[1].matches("0x").count(), 12);
        assert_eq!(body[2], "  0x0018, 0x0019");
        assert!(body[0].ends_with("0x000B,"));
        assert!(body[1].starts_with("  0x000C, "));
    }

    #[test]
    fn test_no_trailing_comma_on_exact_multiple() {
        let art = artifact(12, 1, None);
        let rendered = art.render();
        assert!(rendered.contains("0x000B\n}; // End of array\n"));
        assert!(!rendered.contains("0x000B,"));
    }

    #[test]
    fn test_entry_count_matches_dimensions() {
        let art = artifact(7, 5, None);
        let rendered = art.render();
        let entries = rendered
            .lines()
            .filter(|line| line.starts_with("  0x"))
            .map(|line| line.matches("0x").count())
            .sum::<usize>();
        assert_eq!(entries, 35);
        assert!(rendered.contains("Agumon_Walk_0_data[35]"));
    }
}
