use crate::kernel::language::LanguageTag;

#[test]
fn from_path_maps_playground_extensions() {
    let cases = [
        ("src/App.tsx", LanguageTag::TypeScript),
        ("src/util.ts", LanguageTag::TypeScript),
        ("src/main.jsx", LanguageTag::JavaScript),
        ("index.js", LanguageTag::JavaScript),
        ("src/index.css", LanguageTag::Css),
        ("styles/theme.scss", LanguageTag::Scss),
        ("package.json", LanguageTag::Json),
        ("public/index.html", LanguageTag::Html),
        ("README.md", LanguageTag::Markdown),
        ("notes.txt", LanguageTag::PlainText),
    ];

    for (path, expected) in cases {
        assert_eq!(LanguageTag::from_path(path), expected, "{path}");
    }
}

#[test]
fn from_path_ignores_extension_case() {
    assert_eq!(LanguageTag::from_path("src/APP.TSX"), LanguageTag::TypeScript);
    assert_eq!(LanguageTag::from_path("Index.Css"), LanguageTag::Css);
}

#[test]
fn from_path_without_extension_is_plaintext() {
    assert_eq!(LanguageTag::from_path("Makefile"), LanguageTag::PlainText);
    assert_eq!(LanguageTag::from_path("config/.env"), LanguageTag::PlainText);
    assert_eq!(LanguageTag::from_path("src.d/LICENSE"), LanguageTag::PlainText);
}

#[test]
fn tag_strings_match_serialized_form() {
    let json = serde_json::to_string(&LanguageTag::TypeScript).unwrap();
    assert_eq!(json, "\"typescript\"");
    assert_eq!(LanguageTag::TypeScript.as_str(), "typescript");
    assert_eq!(LanguageTag::PlainText.as_str(), "plaintext");
}
