use packwise_core::templates::builtin_templates;

use crate::commands::{run_with_store, CommandResult, Completed};

/// Writes the built-in master lists into the store so they can be edited.
/// Lists that were already saved are left untouched.
pub fn run() -> CommandResult {
    run_with_store("seed", |_config, repositories| async move {
        let mut seeded = Vec::new();
        let mut kept = Vec::new();
        let saved = repositories.templates.list().await?;

        for template in builtin_templates() {
            let customized = saved
                .iter()
                .any(|existing| existing.id == template.id && *existing != template);
            if customized {
                kept.push(template.id.0.clone());
                continue;
            }
            seeded.push(template.id.0.clone());
            repositories.templates.save(template).await?;
        }

        tracing::info!(
            event_name = "cli.templates.seeded",
            seeded = seeded.len(),
            kept = kept.len(),
            "seeded built-in templates"
        );

        Completed::new(format!("seeded {} templates, kept {} customized", seeded.len(), kept.len()))
            .with_data(serde_json::json!({ "seeded": seeded, "kept": kept }))
    })
}
