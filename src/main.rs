use clap::Parser;
use jsonform::cli::{Cli, Command};
use jsonform::config::Settings;
use jsonform::{demo, Form, Page, Renderer};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    if cli.strict {
        settings.strict = true;
    }

    let repository = Arc::new(demo::repository(&settings)?);
    info!(schemas = repository.len(), strict = settings.strict, "Loaded demo schemas");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Names => {
            let mut names: Vec<String> = repository.names().into_iter().collect();
            names.sort();
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Schema { name } => {
            let schema = repository.get_schema_by_name(&name)?;
            serde_json::to_writer_pretty(&mut out, schema.as_ref())?;
            writeln!(out)?;
        }
        Command::Render { name, title } => {
            let page = Page::new(title.unwrap_or_else(|| name.clone()));
            let form = Form::new(name.clone())
                .schema_name(name)
                .submit("POST", "/users")
                .on_success("function (x) { console.log(x); }");

            let renderer = Renderer::embedded(repository)?;
            renderer.render(&mut out, &page, &[form])?;
        }
    }

    Ok(())
}
