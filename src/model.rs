use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// DatasetDoc – binary serialization wrapper
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDoc {
    pub dataset: Dataset,
}

impl DatasetDoc {
    /// Save the DatasetDoc to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, b"MANDALAVIZ")?;
        std::io::Write::write_all(&mut writer, &1u32.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        Ok(())
    }

    /// Load a DatasetDoc from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 10];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != b"MANDALAVIZ" {
            anyhow::bail!("Invalid magic bytes: expected 'MANDALAVIZ'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != 1 {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let doc: DatasetDoc =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(doc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Verse
// ────────────────────────────────────────────────────────────────────────────

/// A single verse entry from the source dataset.
///
/// Identity fields come straight from the JSON records. The derived fields
/// (`original_index`, `local_x`, `local_y`) are populated at load / layout
/// time and round-trip through the binary document so a cached dataset does
/// not need re-grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    /// Mandala (collection) number this verse belongs to.
    pub mandala: u32,
    pub sukta: u32,
    pub verse: u32,
    #[serde(default)]
    pub devanagari: Option<String>,
    #[serde(default)]
    pub transliteration: Option<String>,
    #[serde(default, rename = "translation_griffith")]
    pub translation: Option<String>,
    #[serde(default)]
    pub deity: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Position of this verse in the source sequence. Unique in
    /// `[0, verse_count)` and stable for the lifetime of the loaded dataset;
    /// used as permanent identity independent of any later sorting.
    #[serde(default)]
    pub original_index: usize,

    /// Derived: position within the mandala's local coordinate frame,
    /// assigned by the layout engine. Absolute position is
    /// `(mandala.center_x + local_x, mandala.center_y + local_y)`.
    #[serde(default)]
    pub local_x: f64,
    #[serde(default)]
    pub local_y: f64,
}

impl Verse {
    /// Heading shown in the detail dialog, e.g. "Mandala 1 • Sukta 2 • Verse 3".
    pub fn heading(&self) -> String {
        format!(
            "Mandala {} • Sukta {} • Verse {}",
            self.mandala, self.sukta, self.verse
        )
    }

    /// Transliteration with embedded `<BR>` line-break markers (any case)
    /// flattened to single spaces.
    pub fn transliteration_plain(&self) -> String {
        let src = self.transliteration.as_deref().unwrap_or("");
        let mut out = String::with_capacity(src.len());
        let mut rest = src;
        while let Some(pos) = rest
            .as_bytes()
            .windows(4)
            .position(|w| w.eq_ignore_ascii_case(b"<br>"))
        {
            out.push_str(&rest[..pos]);
            out.push(' ');
            rest = &rest[pos + 4..];
        }
        out.push_str(rest);
        out
    }

    /// All tag pill texts for the detail dialog: deity, mood, then free tags.
    pub fn tag_pills(&self) -> Vec<String> {
        let mut pills = Vec::new();
        if let Some(d) = &self.deity {
            pills.push(d.clone());
        }
        if let Some(m) = &self.mood {
            pills.push(m.clone());
        }
        pills.extend(self.tags.iter().cloned());
        pills
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mandala
// ────────────────────────────────────────────────────────────────────────────

/// A mandala: one numbered collection of verses, arranged together on the
/// main circle. Membership is immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mandala {
    /// The grouping key (collection number).
    pub number: u32,
    /// Verses in source order within this mandala.
    pub verses: Vec<Verse>,

    /// Derived: center position on the main circle, assigned by the layout
    /// engine.
    #[serde(default)]
    pub center_x: f64,
    #[serde(default)]
    pub center_y: f64,
}

impl Mandala {
    /// Absolute layout-space position of one of this mandala's verses.
    pub fn verse_position(&self, v: &Verse) -> (f64, f64) {
        (self.center_x + v.local_x, self.center_y + v.local_y)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dataset
// ────────────────────────────────────────────────────────────────────────────

/// The full loaded dataset: mandalas in order of first appearance in the
/// source sequence (not sorted by number).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub mandalas: Vec<Mandala>,
}

impl Dataset {
    /// Build a dataset from verses grouped by mandala number, preserving the
    /// order of first appearance.
    pub fn from_grouped(groups: IndexMap<u32, Vec<Verse>>) -> Self {
        let mandalas = groups
            .into_iter()
            .map(|(number, verses)| Mandala {
                number,
                verses,
                center_x: 0.0,
                center_y: 0.0,
            })
            .collect();
        Self { mandalas }
    }

    /// Total number of verses across all mandalas.
    pub fn verse_count(&self) -> usize {
        self.mandalas.iter().map(|m| m.verses.len()).sum()
    }

    pub fn mandala_by_number(&self, number: u32) -> Option<&Mandala> {
        self.mandalas.iter().find(|m| m.number == number)
    }

    /// Find a verse by its stable `original_index`, together with its mandala.
    pub fn verse_by_original_index(&self, index: usize) -> Option<(&Mandala, &Verse)> {
        for m in &self.mandalas {
            for v in &m.verses {
                if v.original_index == index {
                    return Some((m, v));
                }
            }
        }
        None
    }

    /// Walk all verses in mandala order, calling `cb` for every verse.
    pub fn walk_verses<F>(&self, cb: &mut F)
    where
        F: FnMut(&Mandala, &Verse),
    {
        for m in &self.mandalas {
            for v in &m.verses {
                cb(m, v);
            }
        }
    }
}
