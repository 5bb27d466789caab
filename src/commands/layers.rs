use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, warn};

use oereb_extract::extract::{
    ExpansionState, ExtractView, InMemoryLayerRegistry, LayerRegistry, SectionKind,
};
use oereb_extract::util::to_json_pretty;

use crate::cli::ThemeArgs;

pub fn run(args: ThemeArgs) -> Result<()> {
    let loaded = super::load(&args.document)?;
    let view = ExtractView::new(&loaded.extract, &loaded.config);

    let mut registry = InMemoryLayerRegistry::default();
    let mut state = ExpansionState::default();
    state.toggle_section(SectionKind::ConcernedThemes, &mut registry);
    let added = state.toggle_theme(&view, &args.code, &args.subcode, &mut registry);

    if added == 0 {
        warn!(
            code = %args.code,
            subcode = %args.subcode,
            "theme has no usable service references"
        );
    }
    info!(phase = ?state.phase(), added, "expanded theme");

    let data = to_json_pretty(&registry.layers())?;
    std::io::stdout()
        .lock()
        .write_all(&data)
        .context("failed to write layers to stdout")?;
    Ok(())
}
