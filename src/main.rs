#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod RxnData;
#[allow(non_snake_case)]
pub mod Utils;
pub mod library_manager;

use Examples::rxndb_examples::rxndb_examples;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let task: usize = 0;
    rxndb_examples(task);
}
