use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use oereb_extract::extract::ExtractView;
use oereb_extract::util::to_json_pretty;

use crate::cli::ThemeArgs;

pub fn run(args: ThemeArgs) -> Result<()> {
    let loaded = super::load(&args.document)?;
    let view = ExtractView::new(&loaded.extract, &loaded.config);

    if view.resolve(&args.code, &args.subcode).is_empty() {
        bail!(
            "no restriction entries for theme {}:{}",
            args.code,
            args.subcode
        );
    }

    let contents = view.theme_contents(&args.code, &args.subcode);
    let placeholders = contents
        .subthemes
        .iter()
        .filter(|subtheme| subtheme.is_placeholder())
        .count();
    if placeholders > 0 {
        warn!(
            theme = %contents.theme_id,
            placeholders,
            "configured subthemes without entries"
        );
    }

    info!(
        theme = %contents.theme_id,
        subtheme_only = contents.is_subtheme_only,
        subthemes = contents.subthemes.len(),
        regulations = contents.regulations.len(),
        legal_bases = contents.legal_bases.len(),
        hints = contents.hints.len(),
        offices = contents.responsible_offices.len(),
        "resolved theme contents"
    );

    let data = to_json_pretty(&contents)?;
    std::io::stdout()
        .lock()
        .write_all(&data)
        .context("failed to write theme contents to stdout")?;
    Ok(())
}
