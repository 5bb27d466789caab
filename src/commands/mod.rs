pub mod layers;
pub mod render;
pub mod theme;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use oereb_extract::ExtractConfig;
use oereb_extract::SourceDocument;
use oereb_extract::extract::load_extract;
use oereb_extract::model::{DocumentEncoding, Extract};
use oereb_extract::util::{read_text, sha256_bytes};

use crate::cli::DocumentArgs;

pub struct LoadedExtract {
    pub extract: Extract,
    pub config: ExtractConfig,
    pub encoding: DocumentEncoding,
    pub source_sha256: String,
}

pub fn load(args: &DocumentArgs) -> Result<LoadedExtract> {
    let config = load_config(args)?;

    let raw = read_text(&args.document)?;
    let source_sha256 = sha256_bytes(raw.as_bytes());
    let source = SourceDocument::detect(&raw)
        .with_context(|| format!("failed to detect {}", args.document.display()))?;
    let encoding = source.encoding();

    let extract = load_extract(source, &config.language)
        .with_context(|| format!("failed to load {}", args.document.display()))?;

    info!(
        path = %args.document.display(),
        encoding = encoding.as_str(),
        language = %config.language,
        concerned = extract.concerned_themes.len(),
        restrictions = extract.restrictions.len(),
        "loaded extract"
    );

    Ok(LoadedExtract {
        extract,
        config,
        encoding,
        source_sha256,
    })
}

fn load_config(args: &DocumentArgs) -> Result<ExtractConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config(path)?,
        None => ExtractConfig::default(),
    };

    if let Some(lang) = &args.lang {
        config.language = lang.clone();
    }
    config.hide_logo |= args.hide_logo;
    config.responsible_office_from_restriction |= args.office_from_restriction;
    Ok(config)
}

fn read_config(path: &Path) -> Result<ExtractConfig> {
    let config = ExtractConfig::from_path(path)?;
    info!(
        path = %path.display(),
        themes_with_order = config.subthemes.len(),
        "loaded viewer configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> DocumentArgs {
        DocumentArgs {
            document: PathBuf::from("extract.json"),
            config: None,
            lang: None,
            hide_logo: false,
            office_from_restriction: false,
        }
    }

    #[test]
    fn flags_override_default_config() {
        let mut args = args();
        args.lang = Some("fr".to_string());
        args.hide_logo = true;
        args.office_from_restriction = true;

        let config = load_config(&args).expect("no config file to read");
        assert_eq!(config.language, "fr");
        assert!(config.hide_logo);
        assert!(config.responsible_office_from_restriction);
        assert!(config.subthemes.is_empty());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let mut args = args();
        args.config = Some(PathBuf::from("/nonexistent/oereb-viewer.json"));
        assert!(load_config(&args).is_err());
    }
}
