use std::process;

use tilecard::{
    application::{error::AppError, tiles::TileRenderer},
    config,
    domain::tiles::{TileData, validate_tiles},
    infra::{
        documents::{self, DocumentSource},
        error::InfraError,
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(source = report.source, error = %report.chain(), "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(source = report.source, error = %report.chain(), "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        InfraError::configuration(format!("failed to load configuration: {err}"))
    })?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Render(config::RenderArgs::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Render(args) => run_render(&settings, args),
        config::Command::Check(args) => run_check(&settings, args),
    }
}

fn run_render(settings: &config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let tiles = read_tiles(settings, &args.input)?;
    let document = TileRenderer::new().render_document(&tiles)?;
    documents::write_output(args.output.as_deref(), &document.html())?;
    Ok(())
}

fn run_check(settings: &config::Settings, args: config::CheckArgs) -> Result<(), AppError> {
    let tiles = read_tiles(settings, &args.input)?;
    validate_tiles(&tiles)?;
    info!(tiles = tiles.len(), "tile document is valid");
    documents::write_output(None, &format!("{} tile(s) valid", tiles.len()))?;
    Ok(())
}

fn read_tiles(
    settings: &config::Settings,
    input: &config::InputArgs,
) -> Result<Vec<TileData>, AppError> {
    let source = DocumentSource::from_arg(input.input.as_deref());
    let format = source.resolve_format(input.format, settings.input.format);
    info!(source = %source.describe(), format = %format, "reading tile document");
    Ok(documents::read_document(&source, format)?)
}
