#[cfg(feature = "cairo-backend")]
use health_scatter::api::{ScatterChart, ScatterChartConfig};
#[cfg(feature = "cairo-backend")]
use health_scatter::core::AxisField;
#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_DATA_PATH: &str = "assets/data/data.csv";
#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "target/scatter.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    data_path: PathBuf,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    clicks: Vec<AxisField>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use health_scatter::render::{CairoSurface, SurfaceStyle};

    let _ = health_scatter::telemetry::init_tracing_with_fallback("warn,health_scatter=info");
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            ScatterChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ScatterChartConfig::default(),
    };

    let surface = CairoSurface::new(config.canvas, SurfaceStyle::default())
        .map_err(|err| format!("surface init failed: {err}"))?;
    let mut chart = ScatterChart::from_csv_path(surface, &args.data_path, config).map_err(|err| {
        format!(
            "failed to mount chart from `{}`: {err}",
            args.data_path.display()
        )
    })?;

    for field in &args.clicks {
        let change = chart
            .click_label(*field)
            .map_err(|err| format!("click on `{field}` failed: {err}"))?;
        println!("clicked {field}: {change:?}");
    }

    let surface = chart.surface_mut();
    surface.settle();
    let stats = surface
        .draw()
        .map_err(|err| format!("draw failed: {err}"))?;

    if let Some(parent) = args.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("failed to create output dir `{}`: {err}", parent.display())
            })?;
        }
    }
    surface
        .write_png(&args.output_path)
        .map_err(|err| err.to_string())?;

    println!(
        "wrote {} ({} circles, {} texts, {} lines)",
        args.output_path.display(),
        stats.circles_drawn,
        stats.texts_drawn,
        stats.lines_drawn
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut data_path = PathBuf::from(DEFAULT_DATA_PATH);
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut config_path: Option<PathBuf> = None;
    let mut clicks = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data".to_owned())?;
                data_path = PathBuf::from(value);
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--click" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --click".to_owned())?;
                let field = value.parse::<AxisField>().map_err(|err| err.to_string())?;
                clicks.push(field);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        data_path,
        output_path,
        config_path,
        clicks,
    })
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_scatter_png -- [options]\n\n\
         Options:\n\
         \x20 --data <path>     CSV dataset (default: {DEFAULT_DATA_PATH})\n\
         \x20 --output <path>   PNG to write (default: {DEFAULT_OUTPUT_PATH})\n\
         \x20 --config <path>   JSON chart config\n\
         \x20 --click <field>   caption to click before drawing, repeatable\n\
         \x20                   (poverty, age, income, healthcare, smokes, obesity)\n\
         \x20 -h, --help        show this help"
    )
}
