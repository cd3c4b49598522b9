use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use mandalaviz::dataset::parse_dataset;
use mandalaviz::model::DatasetDoc;

#[test]
fn test_binary_serialization() -> Result<()> {
    let json = r#"[
        {"mandala": 1, "sukta": 1, "verse": 1, "devanagari": "अग्निम्", "translation_griffith": "I laud Agni"},
        {"mandala": 1, "sukta": 1, "verse": 2},
        {"mandala": 2, "sukta": 5, "verse": 3, "tags": ["soma"]}
    ]"#;
    let dataset = parse_dataset(json).expect("parse dataset");
    let doc = DatasetDoc { dataset };

    let temp_file = NamedTempFile::new()?;
    let temp_path = temp_file.path();

    doc.save_to_binary(temp_path)?;
    let loaded = DatasetDoc::load_from_binary(temp_path)?;

    assert_eq!(loaded.dataset.mandalas.len(), 2);
    assert_eq!(loaded.dataset.verse_count(), 3);
    let first = &loaded.dataset.mandalas[0].verses[0];
    assert_eq!(first.devanagari.as_deref(), Some("अग्निम्"));
    assert_eq!(first.translation.as_deref(), Some("I laud Agni"));
    assert_eq!(first.original_index, 0);
    let last = loaded.dataset.verse_by_original_index(2).unwrap().1;
    assert_eq!(last.tags, vec!["soma".to_string()]);

    Ok(())
}

#[test]
fn test_binary_load_rejects_bad_magic() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(b"NOTAMANDAL\x01\x00\x00\x00")?;
    temp_file.flush()?;
    assert!(DatasetDoc::load_from_binary(temp_file.path()).is_err());
    Ok(())
}

#[test]
fn test_binary_load_rejects_unknown_version() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(b"MANDALAVIZ")?;
    temp_file.write_all(&99u32.to_le_bytes())?;
    temp_file.flush()?;
    assert!(DatasetDoc::load_from_binary(temp_file.path()).is_err());
    Ok(())
}
