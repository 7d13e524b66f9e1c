//! Reading tile documents from disk or stdin and writing rendered output.

use std::{
    fmt, fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::ValueEnum;

use crate::domain::tiles::{TileData, TileList};

use super::error::InfraError;

/// Serialization format of a tile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "toml" => Ok(DocumentFormat::Toml),
            other => Err(format!("unsupported document format `{other}`")),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tile document is read from. `-` on the command line means stdin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentSource {
    #[default]
    Stdin,
    File(PathBuf),
}

impl DocumentSource {
    pub fn from_arg(value: Option<&Path>) -> Self {
        match value {
            Some(path) if path != Path::new("-") => DocumentSource::File(path.to_path_buf()),
            _ => DocumentSource::Stdin,
        }
    }

    /// Explicit format wins, then the file extension, then the configured
    /// fallback, then JSON.
    pub fn resolve_format(
        &self,
        explicit: Option<DocumentFormat>,
        fallback: Option<DocumentFormat>,
    ) -> DocumentFormat {
        explicit
            .or_else(|| match self {
                DocumentSource::File(path) => DocumentFormat::from_path(path),
                DocumentSource::Stdin => None,
            })
            .or(fallback)
            .unwrap_or(DocumentFormat::Json)
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Stdin => "<stdin>".to_string(),
            DocumentSource::File(path) => path.display().to_string(),
        }
    }

    fn read_to_string(&self) -> Result<String, InfraError> {
        match self {
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                io::stdin().lock().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            DocumentSource::File(path) => Ok(fs::read_to_string(path)?),
        }
    }
}

/// Read and decode a tile document.
pub fn read_document(
    source: &DocumentSource,
    format: DocumentFormat,
) -> Result<Vec<TileData>, InfraError> {
    let text = source.read_to_string()?;
    decode_document(&text, format)
}

/// Decode a tile document held in memory.
///
/// The document shape picks the target type before deserializing, so serde
/// errors (for example a missing `title`) reach the caller unchanged:
/// an array is a list of tiles, a table with `tiles` and no `title` is a
/// tile list, and any other table is a single tile.
pub fn decode_document(text: &str, format: DocumentFormat) -> Result<Vec<TileData>, InfraError> {
    match format {
        DocumentFormat::Json => decode_json(text)
            .map_err(|err| InfraError::decode(format.as_str(), err.to_string())),
        DocumentFormat::Toml => decode_toml(text)
            .map_err(|err| InfraError::decode(format.as_str(), err.to_string())),
    }
}

fn decode_json(text: &str) -> Result<Vec<TileData>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.is_array() {
        return serde_json::from_value(value);
    }

    let listed = value
        .as_object()
        .is_some_and(|map| is_tile_list(map.contains_key("tiles"), map.contains_key("title")));
    if listed {
        serde_json::from_value::<TileList>(value).map(|list| list.tiles)
    } else {
        serde_json::from_value::<TileData>(value).map(|tile| vec![tile])
    }
}

fn decode_toml(text: &str) -> Result<Vec<TileData>, toml::de::Error> {
    let table: toml::Table = toml::from_str(text)?;
    let listed = is_tile_list(table.contains_key("tiles"), table.contains_key("title"));
    let value = toml::Value::Table(table);
    if listed {
        value.try_into::<TileList>().map(|list| list.tiles)
    } else {
        value.try_into::<TileData>().map(|tile| vec![tile])
    }
}

fn is_tile_list(has_tiles: bool, has_title: bool) -> bool {
    has_tiles && !has_title
}

/// Write rendered HTML to `target`, or stdout when no target is given.
///
/// Both destinations receive the same bytes: the HTML followed by exactly one
/// trailing newline.
pub fn write_output(target: Option<&Path>, html: &str) -> Result<(), InfraError> {
    let body = terminate_line(html);
    match target {
        Some(path) => fs::write(path, body.as_bytes())?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn terminate_line(html: &str) -> String {
    let mut body = html.trim_end_matches('\n').to_string();
    body.push('\n');
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tiles::LinkData;

    #[test]
    fn format_is_inferred_from_extension() {
        let source = DocumentSource::from_arg(Some(Path::new("tiles/home.toml")));
        assert_eq!(source.resolve_format(None, None), DocumentFormat::Toml);
        assert_eq!(
            source.resolve_format(Some(DocumentFormat::Json), None),
            DocumentFormat::Json
        );
        assert_eq!(
            source.resolve_format(None, Some(DocumentFormat::Json)),
            DocumentFormat::Toml
        );
    }

    #[test]
    fn dash_and_missing_input_mean_stdin() {
        assert_eq!(
            DocumentSource::from_arg(Some(Path::new("-"))),
            DocumentSource::Stdin
        );
        assert_eq!(DocumentSource::from_arg(None), DocumentSource::Stdin);
        assert_eq!(
            DocumentSource::Stdin.resolve_format(None, None),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentSource::Stdin.resolve_format(None, Some(DocumentFormat::Toml)),
            DocumentFormat::Toml
        );
    }

    #[test]
    fn unknown_extension_falls_back_to_json() {
        let source = DocumentSource::from_arg(Some(Path::new("tiles.txt")));
        assert_eq!(source.resolve_format(None, None), DocumentFormat::Json);
    }

    #[test]
    fn toml_document_with_tile_tables() {
        let text = r#"
[[tiles]]
title = "Widget"
url = "/widgets/1"
image_url = "/img/w.png"

[[tiles.links]]
text = "Docs"
url = "/docs"

[[tiles]]
title = "Gadget"
"#;

        let tiles = decode_document(text, DocumentFormat::Toml).expect("toml decodes");
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].image_url(), Some("/img/w.png"));
        assert_eq!(tiles[0].links().map(<[LinkData]>::len), Some(1));
        assert_eq!(tiles[1].url(), None);
    }

    #[test]
    fn toml_document_with_single_tile() {
        let tiles = decode_document("title = \"Solo\"\n", DocumentFormat::Toml)
            .expect("single toml tile decodes");
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].title, "Solo");
    }

    #[test]
    fn json_document_with_single_tile() {
        let tiles = decode_document(
            r#"{"title": "Widget", "imageUrl": "/img/w.png", "links": [{"text": "Docs"}]}"#,
            DocumentFormat::Json,
        )
        .expect("single tile decodes");

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].image_url(), Some("/img/w.png"));
        assert_eq!(tiles[0].links().map(<[LinkData]>::len), Some(1));
    }

    #[test]
    fn json_document_with_tile_array_and_tiles_table() {
        let array = decode_document(
            r#"[{"title": "One"}, {"title": "Two", "url": "/two"}]"#,
            DocumentFormat::Json,
        )
        .expect("tile array decodes");
        assert_eq!(array.len(), 2);
        assert_eq!(array[1].url(), Some("/two"));

        let listed = decode_document(r#"{"tiles": [{"title": "One"}]}"#, DocumentFormat::Json)
            .expect("tiles table decodes");
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn missing_title_is_reported_by_name() {
        let err = decode_document(r#"{"url": "/x"}"#, DocumentFormat::Json)
            .expect_err("missing title");
        assert!(matches!(err, InfraError::Decode { format: "json", .. }));
        assert!(err.to_string().contains("missing field `title`"), "{err}");

        let err = decode_document("url = \"/x\"\n", DocumentFormat::Toml)
            .expect_err("missing toml title");
        assert!(err.to_string().contains("title"), "{err}");

        let err = decode_document(r#"[{"title": "ok"}, {"desc": "no title"}]"#, DocumentFormat::Json)
            .expect_err("missing title in list");
        assert!(err.to_string().contains("missing field `title`"), "{err}");
    }

    #[test]
    fn titled_table_is_a_single_tile_even_with_tiles_key() {
        let tiles = decode_document(r#"{"title": "Solo", "tiles": []}"#, DocumentFormat::Json)
            .expect("titled table decodes");
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].title, "Solo");

        let tiles = decode_document("title = \"Solo\"\ntiles = []\n", DocumentFormat::Toml)
            .expect("titled toml table decodes");
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].title, "Solo");
    }

    #[test]
    fn file_output_ends_with_single_newline() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("tiles.html");

        write_output(Some(&path), "<article></article>").expect("write output");
        assert_eq!(
            fs::read_to_string(&path).expect("read output"),
            "<article></article>\n"
        );

        write_output(Some(&path), "<article></article>\n").expect("rewrite output");
        assert_eq!(
            fs::read_to_string(&path).expect("read output"),
            "<article></article>\n"
        );
    }

    #[test]
    fn malformed_json_reports_decode_error() {
        let err = decode_document("{", DocumentFormat::Json).expect_err("malformed json");
        assert!(matches!(err, InfraError::Decode { format: "json", .. }));
    }
}
