//! `curlrun --list` – show templates in the templates directory.

use anyhow::Result;
use curlrun_core::config::CurlrunConfig;
use curlrun_core::template::TemplateStore;

pub fn run_list(cfg: &CurlrunConfig) -> Result<()> {
    let store = TemplateStore::new(cfg.templates_dir.clone());
    let names = store.list()?;
    if names.is_empty() {
        println!("No templates in {}", store.root().display());
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
