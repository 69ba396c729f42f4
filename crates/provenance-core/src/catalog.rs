// File: crates/provenance-core/src/catalog.rs

//! Name tables used by the textual heuristics.
//!
//! All tables are ordered: detectors return the first entry found, so
//! position in a table is the tie-break when several names occur.

/// Manufacturers, grouped as phones, camera bodies, lens makers and
/// drone/action/cinema brands.
pub const KNOWN_MAKES: &[&str] = &[
    // Phones
    "Apple", "Samsung", "Google", "Huawei", "Xiaomi", "Oppo", "Vivo", "OnePlus", "Realme",
    "Motorola", "Sony", "LG", "Nokia", "Asus", "Honor", "ZTE", "Meizu", "Lenovo", "Alcatel", "TCL",
    "HTC", "Micromax", "Infinix", "Tecno",
    // Camera bodies
    "Canon", "Nikon", "Fujifilm", "Olympus", "Panasonic", "Leica", "Pentax", "Sigma", "Hasselblad",
    "Ricoh", "Minolta", "Konica", "Casio", "Kodak", "Phase One", "Mamiya", "Yashica", "Contax",
    // Lenses
    "Zeiss", "Carl Zeiss", "Tamron", "Tokina", "Samyang", "Voigtlander", "Voigtländer", "Rokinon",
    "Laowa", "Yongnuo", "Leitz",
    // Drones, action and cinema cameras
    "DJI", "GoPro", "Insta360", "Blackmagic", "RED", "ARRI",
];

/// Makes that only ship dedicated cameras. A match here outranks the
/// generic "captured with" label.
pub const STANDALONE_CAMERA_MAKES: &[&str] = &[
    "Canon", "Nikon", "Fujifilm", "Olympus", "Panasonic", "Leica", "Pentax", "Sigma", "Hasselblad",
    "Ricoh", "Minolta", "Konica", "Casio", "Kodak", "Phase One", "Mamiya", "Yashica", "Contax",
];

pub const EDITING_TOOLS: &[&str] = &[
    "Adobe", "Photoshop", "Lightroom", "GIMP", "Affinity", "Paint.NET", "Corel", "AfterShot", "DxO",
    "Capture One", "Pixelmator", "Acorn", "Krita", "PhotoDirector",
];

/// Strings whose presence anywhere in the text counts as EXIF evidence.
pub const EXIF_MARKERS: &[&str] = &["Exif", "Make", "Model"];

/// Maps any of `triggers` appearing in the text to a coarse model `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelRule {
    pub triggers: &'static [&'static str],
    pub label: &'static str,
}

pub const MODEL_RULES: &[ModelRule] = &[
    ModelRule { triggers: &["iPhone"], label: "iPhone" },
    ModelRule { triggers: &["SM-"], label: "Samsung Galaxy" },
    ModelRule { triggers: &["Pixel"], label: "Pixel" },
    ModelRule { triggers: &["Mate", "P20", "P30"], label: "Huawei Phone" },
    ModelRule { triggers: &["MI ", "Redmi"], label: "Xiaomi Phone" },
];

/// The full set of tables handed to the heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    pub makes: &'static [&'static str],
    pub standalone_cameras: &'static [&'static str],
    pub editing_tools: &'static [&'static str],
    pub model_rules: &'static [ModelRule],
    pub exif_markers: &'static [&'static str],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            makes: KNOWN_MAKES,
            standalone_cameras: STANDALONE_CAMERA_MAKES,
            editing_tools: EDITING_TOOLS,
            model_rules: MODEL_RULES,
            exif_markers: EXIF_MARKERS,
        }
    }
}

impl Catalog {
    /// First make, in table order, that occurs in `text`.
    pub fn find_make(&self, text: &str) -> Option<&'static str> {
        first_contained(self.makes, text)
    }

    /// First editing tool, in table order, that occurs in `text`.
    pub fn find_editing_tool(&self, text: &str) -> Option<&'static str> {
        first_contained(self.editing_tools, text)
    }

    /// Label of the first rule with any trigger in `text`.
    pub fn find_model(&self, text: &str) -> Option<&'static str> {
        self.model_rules
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| text.contains(t)))
            .map(|rule| rule.label)
    }

    /// True if any EXIF marker occurs in `text`.
    pub fn has_exif_marker(&self, text: &str) -> bool {
        self.exif_markers.iter().any(|marker| text.contains(marker))
    }

    pub fn is_standalone_camera(&self, make: &str) -> bool {
        self.standalone_cameras.contains(&make)
    }
}

fn first_contained(table: &'static [&'static str], text: &str) -> Option<&'static str> {
    table.iter().copied().find(|name| text.contains(name))
}
