use crate::reports::ReportError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;

/// Somewhere a chart's summary table goes besides the picture.
pub trait Output {
    fn output(&self, stem: &str, df: &DataFrame) -> Result<(), ReportError>;
}

/// Prints the table to stdout.
pub struct PolarOutput;

impl Output for PolarOutput {
    fn output(&self, stem: &str, df: &DataFrame) -> Result<(), ReportError> {
        println!("{}\n{}", stem, df);
        Ok(())
    }
}

/// Writes `<dir>/<stem>.csv`.
pub struct CsvOutput {
    dir: PathBuf,
}

impl CsvOutput {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        CsvOutput { dir: dir.into() }
    }
}

impl Output for CsvOutput {
    fn output(&self, stem: &str, df: &DataFrame) -> Result<(), ReportError> {
        let path = self.dir.join(format!("{}.csv", stem));
        let mut file = File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        let mut df = df.clone();
        CsvWriter::new(&mut file).finish(&mut df)?;
        info!("detail csv file written: {:?}", path);
        Ok(())
    }
}

pub fn get_outputs(print: bool, detail: Option<PathBuf>) -> Vec<Box<dyn Output>> {
    let mut outputs: Vec<Box<dyn Output>> = vec![];
    if print {
        outputs.push(Box::new(PolarOutput));
    }
    if let Some(dir) = detail {
        outputs.push(Box::new(CsvOutput::new(dir)));
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output() {
        let dir = tempfile::tempdir().unwrap();
        let df = df!(
            "State" => ["Texas", "Ohio"],
            "Profit" => [-25.5, -10.0],
        )
        .unwrap();
        CsvOutput::new(dir.path()).output("Chart_6_Profit_by_State", &df).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("Chart_6_Profit_by_State.csv")).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["State", "Profit"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Texas");
    }

    #[test]
    fn test_get_outputs() {
        assert!(get_outputs(false, None).is_empty());
        assert_eq!(get_outputs(true, Some(PathBuf::from("detail"))).len(), 2);
    }
}
