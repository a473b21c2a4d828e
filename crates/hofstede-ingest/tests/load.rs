//! Integration tests for loading a dataset from disk.

use std::io::Write;

use hofstede_ingest::{DatasetSource, IngestError, load_dataset};
use hofstede_model::Dimension;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
ctr,country,pdi,idv,mas,uai,ltowvs,ivr
AFE,Africa East,64,27,41,52,32,40
ARA,Arab countries,80,38,53,68,23,34
ARG,Argentina,49,46,56,86,20,62
AUL,Australia,38,90,61,51,21,71
BAN,Bangladesh,80,20,55,60,47,20
BEL,Belgium,65,75,54,94,82,57
BRA,Brazil,69,38,49,76,44,59
BUL,Bulgaria,70,30,40,85,69,16
CAN,Canada,39,80,52,48,36,68
ECA,Ecuador,78,8,63,67,#NULL!,#NULL!
";

fn write_sample(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn loads_and_filters_published_layout() {
    let file = write_sample(SAMPLE);
    let source = DatasetSource::File(file.path().to_path_buf());
    let table = load_dataset(&source).unwrap();

    assert_eq!(table.len(), 9);
    assert_eq!(table.dropped_rows(), 1);

    let records = table.records().unwrap();
    let belgium = records
        .iter()
        .find(|record| record.country_name == "Belgium")
        .unwrap();
    assert_eq!(belgium.country_code, "BEL");
    assert_eq!(belgium.scores.get(Dimension::Uai), 94);
    assert!(records.iter().all(|record| record.country_name != "Ecuador"));
}

#[test]
fn loads_renamed_headers_with_bom() {
    let file = write_sample(
        "\u{feff}CTR , Country ,PDI,IDV,MAS,UAI,LTOWVS,IVR\nNOR,Norway,31,69,8,50,35,55\n",
    );
    let table = load_dataset(&DatasetSource::File(file.path().to_path_buf())).unwrap();
    assert_eq!(table.country_names().unwrap(), vec!["Norway"]);
}

#[test]
fn reports_missing_dimension_column() {
    let file = write_sample("ctr,country,pdi,idv,mas,uai,ltowvs\nNOR,Norway,31,69,8,50,35\n");
    let err = load_dataset(&DatasetSource::File(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "ivr"));
}

#[test]
fn loading_twice_yields_identical_tables() {
    let file = write_sample(SAMPLE);
    let source = DatasetSource::File(file.path().to_path_buf());
    let first = load_dataset(&source).unwrap();
    let second = load_dataset(&source).unwrap();
    assert!(first.frame().equals(second.frame()));
}
