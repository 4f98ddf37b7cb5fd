//! Implementation of the `instagen list` command.

use instagen_adapters::EmbeddedStore;
use instagen_core::{
    application::TemplateStore,
    domain::{TemplateCategory, TemplateRef},
};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let store = EmbeddedStore::new();
    let templates = select(store.list(), args.category.map(TemplateCategory::from));

    // `--output-format json` wins over the per-command format.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Bundled templates:")?;
            for category in TemplateCategory::ALL {
                let in_category: Vec<_> =
                    templates.iter().filter(|t| t.category == category).collect();
                if in_category.is_empty() {
                    continue;
                }
                output.print(&format!("  {category}"))?;
                for t in in_category {
                    output.print(&format!("    {}", t.path()))?;
                }
            }
        }
        ListFormat::List => {
            for t in &templates {
                println!("{}", t.path());
            }
        }
        ListFormat::Json => output.json(&templates)?,
    }

    Ok(())
}

fn select(mut templates: Vec<TemplateRef>, category: Option<TemplateCategory>) -> Vec<TemplateRef> {
    if let Some(category) = category {
        templates.retain(|t| t.category == category);
    }
    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_one_category() {
        let all = EmbeddedStore::new().list();
        let ci = select(all.clone(), Some(TemplateCategory::CiManifest));
        assert!(!ci.is_empty());
        assert!(ci.len() < all.len());
        assert!(ci.iter().all(|t| t.category == TemplateCategory::CiManifest));
    }

    #[test]
    fn no_filter_keeps_everything() {
        let all = EmbeddedStore::new().list();
        assert_eq!(select(all.clone(), None), all);
    }
}
