use std::fmt;

/// A mapped-pipeline file name split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameName {
    pub subject: String,
    pub frame: u32,
}

/// Why a file name was not accepted as `<subject>_<frame>.png`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unclassified {
    /// The name does not have the `Name_Number.png` shape at all.
    Pattern,
    /// The digits are there but do not fit a frame number.
    FrameNumber(String),
    /// Nothing is left of the name to build an identifier from.
    EmptyName,
}

impl fmt::Display for Unclassified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unclassified::Pattern => write!(f, "Does not match 'Name_Number.png' format"),
            Unclassified::FrameNumber(digits) => {
                write!(f, "Frame number part '{}' not integer", digits)
            }
            Unclassified::EmptyName => write!(f, "File name has no usable stem"),
        }
    }
}

pub fn has_png_extension(file_name: &str) -> bool {
    png_stem(file_name).is_some()
}

/// `Main-BG.png` -> `Main-BG`. `None` unless the extension is `png` in any case.
pub fn png_stem(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    ext.eq_ignore_ascii_case("png").then_some(stem)
}

/// Parses `Agumon_2.png` into subject `Agumon` and frame `2`.
///
/// The subject is everything up to the last underscore, so `Wing_Man_3.png` has
/// subject `Wing_Man`. An empty subject (`_3.png`) is accepted.
pub fn classify_file_name(file_name: &str) -> Result<FrameName, Unclassified> {
    let stem = png_stem(file_name).ok_or(Unclassified::Pattern)?;
    let (subject, digits) = stem.rsplit_once('_').ok_or(Unclassified::Pattern)?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Unclassified::Pattern);
    }

    let frame = digits
        .parse::<u32>()
        .map_err(|_| Unclassified::FrameNumber(digits.to_string()))?;

    Ok(FrameName {
        subject: subject.to_string(),
        frame,
    })
}
