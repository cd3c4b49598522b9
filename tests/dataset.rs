use mandalaviz::dataset::{group_verses, parse_dataset};
use mandalaviz::model::Verse;

fn verse(mandala: u32) -> Verse {
    Verse {
        mandala,
        sukta: 1,
        verse: 1,
        devanagari: None,
        transliteration: None,
        translation: None,
        deity: None,
        mood: None,
        tags: vec![],
        original_index: 0,
        local_x: 0.0,
        local_y: 0.0,
    }
}

#[test]
fn test_parse_dataset_groups_by_first_appearance() {
    // Mandala 10 appears first and must stay first; order is never sorted.
    let json = r#"[
        {"mandala": 10, "sukta": 1, "verse": 1, "translation_griffith": "a"},
        {"mandala": 1, "sukta": 1, "verse": 1},
        {"mandala": 10, "sukta": 1, "verse": 2},
        {"mandala": 3, "sukta": 2, "verse": 1, "deity": "Agni", "tags": ["fire"]}
    ]"#;
    let ds = parse_dataset(json).expect("parse dataset");
    let numbers: Vec<u32> = ds.mandalas.iter().map(|m| m.number).collect();
    assert_eq!(numbers, vec![10, 1, 3]);
    assert_eq!(ds.verse_count(), 4);

    // original_index follows source order, across mandala boundaries.
    assert_eq!(ds.mandalas[0].verses[0].original_index, 0);
    assert_eq!(ds.mandalas[1].verses[0].original_index, 1);
    assert_eq!(ds.mandalas[0].verses[1].original_index, 2);
    assert_eq!(ds.mandalas[2].verses[0].original_index, 3);

    // Renamed / defaulted fields
    assert_eq!(ds.mandalas[0].verses[0].translation.as_deref(), Some("a"));
    assert_eq!(ds.mandalas[2].verses[0].deity.as_deref(), Some("Agni"));
    assert_eq!(ds.mandalas[2].verses[0].tags, vec!["fire".to_string()]);
}

#[test]
fn test_parse_rejects_non_array() {
    assert!(parse_dataset("{\"mandala\": 1}").is_err());
    assert!(parse_dataset("42").is_err());
    assert!(parse_dataset("not json at all").is_err());
}

#[test]
fn test_parse_rejects_empty_array() {
    assert!(parse_dataset("[]").is_err());
}

#[test]
fn test_group_verses_assigns_unique_indices() {
    let verses: Vec<Verse> = [2, 1, 2, 2, 1, 3].iter().map(|&m| verse(m)).collect();
    let ds = group_verses(verses);
    assert_eq!(
        ds.mandalas.iter().map(|m| m.number).collect::<Vec<_>>(),
        vec![2, 1, 3]
    );
    let mut seen = vec![false; ds.verse_count()];
    ds.walk_verses(&mut |_, v| {
        assert!(!seen[v.original_index], "duplicate index {}", v.original_index);
        seen[v.original_index] = true;
    });
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_lookup_helpers() {
    let verses: Vec<Verse> = [1, 1, 2].iter().map(|&m| verse(m)).collect();
    let ds = group_verses(verses);

    assert_eq!(ds.mandala_by_number(2).map(|m| m.verses.len()), Some(1));
    assert!(ds.mandala_by_number(9).is_none());

    let (m, v) = ds.verse_by_original_index(2).expect("index 2 exists");
    assert_eq!(m.number, 2);
    assert_eq!(v.original_index, 2);
    assert!(ds.verse_by_original_index(3).is_none());
}

#[test]
fn test_verse_heading_and_pills() {
    let mut v = verse(3);
    v.sukta = 12;
    v.verse = 7;
    v.deity = Some("Indra".into());
    v.mood = Some("praise".into());
    v.tags = vec!["soma".into(), "dawn".into()];
    assert_eq!(v.heading(), "Mandala 3 • Sukta 12 • Verse 7");
    assert_eq!(v.tag_pills(), vec!["Indra", "praise", "soma", "dawn"]);
}

#[test]
fn test_transliteration_br_markers_flattened() {
    let mut v = verse(1);
    v.transliteration = Some("agním īḷe<BR>puróhitaṁ<br>yajñásya".into());
    assert_eq!(
        v.transliteration_plain(),
        "agním īḷe puróhitaṁ yajñásya"
    );

    v.transliteration = None;
    assert_eq!(v.transliteration_plain(), "");
}
