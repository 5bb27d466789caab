use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use oereb_extract::extract::ExtractView;
use oereb_extract::model::RenderManifest;
use oereb_extract::util::{now_utc_string, to_json_pretty, write_json_pretty};

use crate::cli::RenderArgs;

pub const MANIFEST_VERSION: u32 = 1;

pub fn run(args: RenderArgs) -> Result<()> {
    let loaded = super::load(&args.document)?;
    let view = ExtractView::new(&loaded.extract, &loaded.config).assemble();

    let manifest = RenderManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        source_path: args.document.document.display().to_string(),
        source_sha256: loaded.source_sha256,
        encoding: loaded.encoding,
        language: loaded.config.language.clone(),
        view,
    };

    let sections: Vec<&str> = manifest
        .view
        .sections
        .iter()
        .map(|section| section.kind.as_str())
        .collect();

    match &args.output {
        Some(path) => {
            write_json_pretty(path, &manifest)?;
            info!(
                path = %path.display(),
                sections = %sections.join(","),
                "wrote render manifest"
            );
        }
        None => {
            let data = to_json_pretty(&manifest)?;
            std::io::stdout()
                .lock()
                .write_all(&data)
                .context("failed to write render manifest to stdout")?;
            info!(sections = %sections.join(","), "rendered extract");
        }
    }

    Ok(())
}
