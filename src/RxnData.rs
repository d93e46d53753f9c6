/// Typed reaction records, the error taxonomy of the core, and schema
/// validation of the raw table.
pub mod records;
/// Phase token cleanup: coefficient stripping, case folding, alternate
/// spelling normalization, and abbreviation/name/formula cross-references.
///
/// # Examples
/// ```
/// use RxnDB::RxnData::normalizer::{strip_coefficients, PhaseDictionary};
/// let tokens: Vec<String> = vec!["2h2o".to_string(), "10sio2".to_string()];
/// assert_eq!(strip_coefficients(&tokens), vec!["h2o", "sio2"]);
/// let dict = PhaseDictionary::new();
/// assert_eq!(dict.name_for("ky"), Some("kyanite"));
/// ```
pub mod normalizer;
/// The phase -> reaction-id inverted indices built once from the table.
pub mod phase_index;
/// The query engine: every filter the explorer UI asks for, with the
/// empty-input-means-unrestricted convention.
///
/// # Examples
/// ```no_run
/// use RxnDB::RxnData::processor::{CombineMethod, RxnProcessor};
/// use RxnDB::Utils::load_from_file::LoadData;
/// let ld = LoadData::new("data/hp11_rxndb.json".to_string());
/// let records = ld.load_records().unwrap();
/// let mut processor = RxnProcessor::new(records).unwrap();
/// let rows = processor.filter_by_reactants(&["ky".to_string()]);
/// let grouping = processor.build_groups(CombineMethod::And);
/// println!("{} similarity groups", grouping.n_groups);
/// ```
pub mod processor;
/// Similarity grouping of the whole table with deterministic group colors.
pub mod similarity;
/// Midpoints of reaction curves, the anchors for plot labels.
pub mod midpoints;
