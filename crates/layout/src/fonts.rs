//! Font registry shared between renders.
//!
//! Fonts are registered explicitly with [`FontContext::load_font`]; nothing is
//! discovered implicitly unless the `system-fonts` feature is enabled and
//! [`FontContext::load_system_fonts`] is called.
//!
//! ## Locking
//!
//! Loads are serialized behind a mutex. Parsing happens while only that mutex
//! is held; the parsed faces are then published by swapping the face list
//! under a short write lock. Readers take a [`FontSnapshot`] (an `Arc` of the
//! face list) and never observe a partially registered font.

use pictor_style::{FontStyle, FontWeight};
use pictor_traits::FontError;
use pictor_types::FontId;
use std::sync::{Arc, Mutex, RwLock};

/// Family keywords that never name a concrete face.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
];

/// Vertical metrics in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub strikeout_position: i16,
    pub strikeout_thickness: i16,
}

impl FontMetrics {
    fn from_face(face: &ttf_parser::Face<'_>) -> Self {
        let units_per_em = face.units_per_em();
        let upem = units_per_em as i16;
        let default_thickness = (upem / 14).max(1);
        let underline = face.underline_metrics();
        let strikeout = face.strikeout_metrics();
        Self {
            units_per_em,
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            underline_position: underline.map_or(-(upem / 10), |m| m.position),
            underline_thickness: underline.map_or(default_thickness, |m| m.thickness),
            strikeout_position: strikeout
                .map(|m| m.position)
                .or_else(|| face.x_height().map(|x| x / 2))
                .unwrap_or(upem / 4),
            strikeout_thickness: strikeout.map_or(default_thickness, |m| m.thickness),
        }
    }

    /// Factor converting font units to pixels at `font_size`.
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em.max(1) as f32
    }
}

/// One registered face: the shared font blob plus the metadata used for
/// matching.
pub struct FontInstance {
    pub id: FontId,
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
    /// Face index inside a collection (0 for plain font files).
    pub index: u32,
    pub metrics: FontMetrics,
    data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("style", &self.style)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontInstance {
    /// Creates a lightweight shaping view over the font data.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }

    /// Parses the face for outline extraction.
    pub fn outline_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

pub type FontData = Arc<FontInstance>;

/// Overrides applied to every face of a font blob at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontLoadOptions {
    pub family: Option<String>,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
}

#[derive(Default)]
struct Registry {
    load_lock: Mutex<()>,
    faces: RwLock<Arc<Vec<FontData>>>,
}

/// An explicit, shareable font registry. Cloning is cheap and clones share
/// the same registry.
#[derive(Clone, Default)]
pub struct FontContext {
    inner: Arc<Registry>,
}

impl std::fmt::Debug for FontContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontContext").field("faces", &self.len()).finish()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every face found in `bytes` (a TTF/OTF file or collection)
    /// using the metadata stored in the font.
    pub fn load_font(&self, bytes: impl Into<Vec<u8>>) -> Result<Vec<FontId>, FontError> {
        self.load_font_with(bytes, &FontLoadOptions::default())
    }

    /// Registers the faces in `bytes`, overriding family, weight or style
    /// where `options` sets them.
    pub fn load_font_with(
        &self,
        bytes: impl Into<Vec<u8>>,
        options: &FontLoadOptions,
    ) -> Result<Vec<FontId>, FontError> {
        let _guard = self
            .inner
            .load_lock
            .lock()
            .map_err(|_| FontError::LockPoisoned)?;

        let first_id = self.snapshot()?.len() as u32;
        let data = Arc::new(bytes.into());
        let parsed = parse_faces(&data, first_id, options)?;
        let ids: Vec<FontId> = parsed.iter().map(|face| face.id).collect();

        self.publish(parsed)?;
        log::debug!("Registered {} font face(s): {:?}", ids.len(), ids);
        Ok(ids)
    }

    /// Loads the fonts installed on this machine.
    #[cfg(feature = "system-fonts")]
    pub fn load_system_fonts(&self) -> Result<usize, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let _guard = self
            .inner
            .load_lock
            .lock()
            .map_err(|_| FontError::LockPoisoned)?;
        let mut next_id = self.snapshot()?.len() as u32;
        let mut parsed = Vec::new();
        for info in db.faces() {
            let Some(data) = db.with_face_data(info.id, |data, _| data.to_vec()) else {
                continue;
            };
            match parse_faces(&Arc::new(data), next_id, &FontLoadOptions::default()) {
                Ok(mut faces) => {
                    // A file shared by several faces is read once per face; keep only
                    // the face this entry describes.
                    faces.retain(|face| face.index == info.index);
                    for face in &mut faces {
                        if let Some(face) = Arc::get_mut(face) {
                            face.id = FontId(next_id);
                        }
                        next_id += 1;
                    }
                    parsed.extend(faces);
                }
                Err(e) => log::debug!("Skipping system font {:?}: {}", info.source, e),
            }
        }
        let count = parsed.len();
        self.publish(parsed)?;
        log::debug!("Registered {} system font face(s)", count);
        Ok(count)
    }

    fn publish(&self, parsed: Vec<FontData>) -> Result<(), FontError> {
        let mut faces = self
            .inner
            .faces
            .write()
            .map_err(|_| FontError::LockPoisoned)?;
        let mut next = Vec::with_capacity(faces.len() + parsed.len());
        next.extend(faces.iter().cloned());
        next.extend(parsed);
        *faces = Arc::new(next);
        Ok(())
    }

    /// A consistent view of the registered faces.
    pub fn snapshot(&self) -> Result<FontSnapshot, FontError> {
        let faces = self
            .inner
            .faces
            .read()
            .map_err(|_| FontError::LockPoisoned)?;
        Ok(FontSnapshot {
            faces: Arc::clone(&faces),
        })
    }

    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The face list as it was when the snapshot was taken.
#[derive(Debug, Clone, Default)]
pub struct FontSnapshot {
    faces: Arc<Vec<FontData>>,
}

impl FontSnapshot {
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[FontData] {
        &self.faces
    }

    pub fn get(&self, id: FontId) -> Option<&FontData> {
        self.faces.iter().find(|face| face.id == id)
    }

    /// Picks the face for a CSS `font-family` list, weight and style.
    ///
    /// The first listed family with any registered face wins; generic
    /// families are skipped. Within the family the nearest weight is chosen,
    /// then the closest style. Unknown families fall back to all faces.
    pub fn select(
        &self,
        families: &str,
        weight: u16,
        style: FontStyle,
    ) -> Result<FontData, FontError> {
        if self.faces.is_empty() {
            return Err(FontError::NoFontLoaded);
        }

        let mut candidates: Vec<&FontData> = Vec::new();
        for name in family_names(families) {
            if GENERIC_FAMILIES.contains(&name.to_ascii_lowercase().as_str()) {
                continue;
            }
            candidates = self
                .faces
                .iter()
                .filter(|face| face.family.eq_ignore_ascii_case(name))
                .collect();
            if !candidates.is_empty() {
                break;
            }
        }
        if candidates.is_empty() {
            log::trace!("No face for '{}'; falling back to any loaded face", families);
            candidates = self.faces.iter().collect();
        }

        candidates
            .into_iter()
            .min_by_key(|face| {
                (
                    weight_penalty(weight, face.weight),
                    style_penalty(style, face.style),
                    face.id,
                )
            })
            .cloned()
            .ok_or(FontError::NoFontLoaded)
    }
}

fn parse_faces(
    data: &Arc<Vec<u8>>,
    first_id: u32,
    options: &FontLoadOptions,
) -> Result<Vec<FontData>, FontError> {
    let mut db = fontdb::Database::new();
    let source: Arc<dyn AsRef<[u8]> + Sync + Send> = data.clone();
    db.load_font_source(fontdb::Source::Binary(source));

    let mut faces = Vec::new();
    for info in db.faces() {
        let face = ttf_parser::Face::parse(data, info.index)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;
        if rustybuzz::Face::from_slice(data, info.index).is_none() {
            return Err(FontError::InvalidData(format!(
                "face {} cannot be shaped",
                info.index
            )));
        }

        let family = options
            .family
            .clone()
            .or_else(|| info.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| info.post_script_name.clone());
        let weight = options
            .weight
            .map_or(info.weight.0, |w| w.numeric_value());
        let style = options.style.unwrap_or(match info.style {
            fontdb::Style::Normal => FontStyle::Normal,
            fontdb::Style::Italic => FontStyle::Italic,
            fontdb::Style::Oblique => FontStyle::Oblique,
        });

        log::trace!(
            "Parsed face '{}' weight={} style={:?} index={}",
            family,
            weight,
            style,
            info.index
        );
        faces.push(Arc::new(FontInstance {
            id: FontId(first_id + faces.len() as u32),
            family,
            weight,
            style,
            index: info.index,
            metrics: FontMetrics::from_face(&face),
            data: data.clone(),
        }));
    }

    if faces.is_empty() {
        return Err(FontError::InvalidData(
            "no usable font faces in data".to_string(),
        ));
    }
    Ok(faces)
}

/// Splits a `font-family` value into unquoted names.
fn family_names(families: &str) -> impl Iterator<Item = &str> {
    families
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|name| !name.is_empty())
}

/// Orders available weights the way CSS font matching does.
fn weight_penalty(desired: u16, actual: u16) -> (u8, u16) {
    if actual == desired {
        return (0, 0);
    }
    let below = desired.saturating_sub(actual);
    let above = actual.saturating_sub(desired);
    if (400..=500).contains(&desired) {
        if actual > desired && actual <= 500 {
            (1, above)
        } else if actual < desired {
            (2, below)
        } else {
            (3, above)
        }
    } else if desired < 400 {
        if actual < desired { (1, below) } else { (2, above) }
    } else if actual > desired {
        (1, above)
    } else {
        (2, below)
    }
}

fn style_penalty(desired: FontStyle, actual: FontStyle) -> u8 {
    use FontStyle::*;
    match (desired, actual) {
        (a, b) if a == b => 0,
        (Italic, Oblique) | (Oblique, Italic) => 1,
        (Normal, Oblique) => 1,
        _ => 2,
    }
}
