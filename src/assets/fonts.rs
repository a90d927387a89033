use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Family names tried, in order, before falling back to generic sans-serif.
pub const PREFERRED_FAMILIES: [&str; 2] = ["Inter", "Arial"];

const TITLE_WEIGHT: u16 = 700;
const SUBTITLE_WEIGHT: u16 = 600;

#[derive(Clone)]
/// Raw font file bytes plus the face index inside them (non-zero for collections).
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> ThumbResult<Self> {
        if bytes.is_empty() {
            return Err(ThumbError::font("font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    pub fn from_file(path: &Path) -> ThumbResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }
}

/// Faces used for the two text roles: bold title and semibold subtitle.
#[derive(Clone, Debug)]
pub struct FontBook {
    pub title: FontFace,
    pub subtitle: FontFace,
}

impl FontBook {
    /// Use one face for both roles.
    pub fn single(face: FontFace) -> Self {
        Self {
            title: face.clone(),
            subtitle: face,
        }
    }

    /// Load explicit font files; the subtitle face defaults to the title face.
    pub fn from_files(title: &Path, subtitle: Option<&Path>) -> ThumbResult<Self> {
        let title = FontFace::from_file(title)?;
        let subtitle = match subtitle {
            Some(p) => FontFace::from_file(p)?,
            None => title.clone(),
        };
        Ok(Self { title, subtitle })
    }

    /// Query installed system fonts for the preferred families.
    #[tracing::instrument]
    pub fn from_system() -> ThumbResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if db.is_empty() {
            return Err(ThumbError::font("no system fonts found"));
        }

        let title = query_face(&db, TITLE_WEIGHT)?;
        let subtitle = query_face(&db, SUBTITLE_WEIGHT)?;
        Ok(Self { title, subtitle })
    }
}

fn query_face(db: &usvg::fontdb::Database, weight: u16) -> ThumbResult<FontFace> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .map(|name| usvg::fontdb::Family::Name(*name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight(weight),
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| ThumbError::font("no font face matched"))?;

    if let Some(face) = db.face(id) {
        tracing::debug!(
            family = face.families.first().map(|(n, _)| n.as_str()).unwrap_or("?"),
            weight,
            "resolved system font"
        );
    }

    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
    })
    .ok_or_else(|| ThumbError::font("system font face data unavailable"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
