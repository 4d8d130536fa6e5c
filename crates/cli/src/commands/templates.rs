use serde::Serialize;

use crate::commands::{run_with_store, CommandResult, Completed};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSummary {
    id: String,
    name: String,
    description: String,
    item_count: usize,
    essential_count: usize,
}

pub fn run() -> CommandResult {
    run_with_store("templates", |_config, repositories| async move {
        let templates = repositories.templates.list().await?;
        let summaries: Vec<TemplateSummary> = templates
            .iter()
            .map(|template| TemplateSummary {
                id: template.id.0.clone(),
                name: template.name.clone(),
                description: template.description.clone(),
                item_count: template.items.len(),
                essential_count: template.essential_count(),
            })
            .collect();

        Completed::new(format!("{} templates available", summaries.len())).with_data(summaries)
    })
}
