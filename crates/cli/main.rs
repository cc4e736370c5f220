mod output;
mod reports;

use config::{Config, ConfigError};
use dataset::{Dataset, LoadError};
use output::get_outputs;
use reports::{Context, Report};

use clap::builder::PossibleValuesParser;
use clap::Parser;
use env_logger::Env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use log::{debug, error, info, warn};

/// Sales and profit charts from the superstore dataset
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short = 'c',
        long = "config",
        default_value = config::DEFAULT_CONFIG_FILE,
        help = "config file, defaults are used when it does not exist"
    )]
    config: PathBuf,

    #[arg(long = "data", help = "dataset csv file, overrides the config")]
    data: Option<PathBuf>,

    #[arg(long = "images", help = "output directory for charts, overrides the config")]
    images: Option<PathBuf>,

    #[arg(
        short = 'r',
        long = "report",
        value_parser = PossibleValuesParser::new(["all", "trend", "product", "profit"]),
        default_value = "all",
        help = "report to generate"
    )]
    report: String,

    #[arg(
        long = "detail",
        help = "write each chart's summary table as csv into DIR, e.g. --detail detail"
    )]
    detail: Option<PathBuf>,

    #[arg(long = "print", action=clap::ArgAction::SetTrue, help="print each chart's summary table")]
    print: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error loading data: {0}")]
    Load(#[from] LoadError),
    #[error("cannot create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("{0} report(s) failed")]
    Reports(usize),
}

fn run(args: Args) -> Result<(), AppError> {
    let mut conf = Config::load_or_default(&args.config)?;
    if let Some(data) = args.data {
        conf.data = data;
    }
    if let Some(images) = args.images {
        conf.images = images;
    }
    debug!("config: {:?}", conf);

    let dataset = Dataset::load(&conf.data)?;
    info!("dataset loaded: {} records", dataset.height());
    if dataset.is_empty() {
        warn!("{:?} has no records, charts will be empty", conf.data);
    }

    let mut dirs = vec![conf.images.clone()];
    dirs.extend(args.detail.clone());
    for path in dirs {
        fs::create_dir_all(&path).map_err(|source| AppError::CreateDir { path, source })?;
    }

    let outputs = get_outputs(args.print, args.detail);
    let ctx = Context {
        dataset: &dataset,
        images: &conf.images,
        style: &conf.style,
        outputs: &outputs,
    };
    // PossibleValuesParser 已经限定了取值
    let selected = Report::from_str(&args.report).unwrap_or_default();

    let mut failed = 0;
    for report in selected {
        if let Err(e) = reports::run(report, &ctx) {
            error!("{} report stopped: {}", report, e);
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(AppError::Reports(failed));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reports::fixture;
    use std::ffi::OsString;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["sales-report"]);
        assert_eq!(args.config, PathBuf::from(".sales-report.yml"));
        assert_eq!(args.report, "all");
        assert!(args.data.is_none());
        assert!(!args.print);
        assert!(Args::try_parse_from(["sales-report", "--report", "sales"]).is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let data = fixture::write(dir.path(), &fixture::sample());
        let images = dir.path().join("out").join("images");
        let argv: Vec<OsString> = vec![
            "sales-report".into(),
            "--config".into(),
            dir.path().join("missing.yml").into(),
            "--data".into(),
            data.into(),
            "--images".into(),
            images.clone().into(),
            "--report".into(),
            "profit".into(),
        ];
        run(Args::parse_from(argv)).unwrap();
        assert!(images.join("Chart_5_Discount_vs_Profit.png").exists());
        assert!(images.join("Chart_6_Profit_by_State.png").exists());
        assert!(!images.join("Chart_1_Sales_Profit_Monthly.png").exists());
    }

    #[test]
    fn test_run_missing_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let args = Args {
            config: dir.path().join("missing.yml"),
            data: Some(dir.path().join("nope.csv")),
            images: Some(images.clone()),
            report: "all".to_string(),
            detail: None,
            print: false,
        };
        let err = run(args).unwrap_err();
        assert!(matches!(err, AppError::Load(LoadError::NotFound(_))));
        assert!(!images.exists());
    }

    #[test]
    fn test_run_bad_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bad.yml");
        fs::write(&config, "style: [not, a, map]").unwrap();
        let args = Args::parse_from([
            "sales-report",
            "--config",
            config.to_str().unwrap(),
        ]);
        assert!(matches!(run(args), Err(AppError::Config(_))));
    }
}
