use apigen::{
    GeneratorOptions,
    codegen::{self, ApiModule, ArtifactStatus, EmitReport},
    load::load,
    parse::{Document, Tag},
    table::{self, FLAT_MODULE},
};
use miette::{IntoDiagnostic, Result};

mod config;

use self::config::Main;

#[tokio::main]
async fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());
    let options = main.options;

    println!("Generating API client code from `{}`...", options.location);
    let document = load(&options.location).await.into_diagnostic()?;
    println!(
        "Loaded schema document with {} path{}",
        document.paths.len(),
        plural(document.paths.len()),
    );

    let (table, modules) = if options.group_by_tag {
        let tags = select_tags(&document, &options);
        if tags.is_empty() {
            if options.modules.is_empty() {
                println!("The document declares no matching tags; nothing to generate");
            } else {
                println!(
                    "warning: no tags match the requested modules ({}); nothing to generate",
                    options.modules.join(", ")
                );
            }
            return Ok(());
        }
        println!("Generating {} module{}...", tags.len(), plural(tags.len()));

        let table = table::build(&document, &tags, &options);
        let mut modules = Vec::with_capacity(tags.len());
        for tag in &tags {
            let stubs = codegen::generate(&document, &table, tag, &options);
            if stubs.is_empty() {
                println!(
                    "warning: no operations are tagged `{}`; skipping its module",
                    tag.name
                );
                continue;
            }
            modules.push(ApiModule {
                key: codegen::format_key(&tag.name, options.camel_case_keys),
                tag_name: tag.name.clone(),
                stubs,
            });
        }
        (table, modules)
    } else {
        let table = table::build(&document, &[], &options);
        let stubs = codegen::generate_ungrouped(&document, &table, &options);
        if stubs.is_empty() {
            println!("The document declares no operations; nothing to generate");
            return Ok(());
        }
        let module = ApiModule {
            key: codegen::format_key(FLAT_MODULE, options.camel_case_keys),
            tag_name: FLAT_MODULE.to_owned(),
            stubs,
        };
        (table, vec![module])
    };

    let report = codegen::emit(&table, &modules, &options);
    print_report(&report);

    println!(
        "API client generation complete: {} written, {} skipped, {} failed",
        report.written(),
        report.skipped(),
        report.failed(),
    );
    Ok(())
}

/// The tags selected for this run: the allow-list when one was given,
/// otherwise every tag minus the deny-list.
fn select_tags(document: &Document, options: &GeneratorOptions) -> Vec<Tag> {
    if options.modules.is_empty() {
        document
            .tags
            .iter()
            .filter(|tag| !options.exclude.contains(&tag.name))
            .cloned()
            .collect()
    } else {
        document
            .tags
            .iter()
            .filter(|tag| options.modules.contains(&tag.name))
            .cloned()
            .collect()
    }
}

fn print_report(report: &EmitReport) {
    for outcome in report.outcomes() {
        let path = outcome.path.display();
        match &outcome.status {
            ArtifactStatus::Written => println!("Generated `{path}`"),
            ArtifactStatus::SkippedExists => {
                println!("`{path}` already exists; pass --overwrite to replace it");
            }
            ArtifactStatus::DirectoryError(message) => {
                println!("error: failed to create the directory for `{path}`: {message}");
            }
            ArtifactStatus::WriteError(message) => {
                println!("error: failed to write `{path}`: {message}");
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
